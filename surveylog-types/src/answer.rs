use serde::{Deserialize, Serialize};

use crate::decoded::{parse_int, width_mismatch};
use crate::row::{self, Escaping, Field};
use crate::{CodecError, Decoded};

/// Answer flag: the answer was deleted and only kept for history.
pub const ANSWER_DELETED: i64 = 1;

/// Field names of a full-scope answer row, in row order.
pub const ANSWER_FIELDS: [&str; 13] = [
    "uid",
    "type",
    "text",
    "value",
    "lat",
    "lon",
    "time_begin",
    "time_end",
    "time_zone_delta",
    "dst_delta",
    "unit",
    "flags",
    "stored",
];

/// Field names of a public-scope answer row, in row order.
pub const PUBLIC_ANSWER_FIELDS: [&str; 10] = [
    "uid",
    "text",
    "value",
    "lat",
    "lon",
    "time_begin",
    "time_end",
    "time_zone_delta",
    "dst_delta",
    "unit",
];

/// Which subset of answer fields is read or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// All fields, as stored by the backend.
    #[default]
    Full,

    /// Without `type`, `flags` and `stored`, as handed to external consumers.
    Public,
}

impl Scope {
    /// Field names serialized in this scope, in row order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Full => &ANSWER_FIELDS,
            Self::Public => &PUBLIC_ANSWER_FIELDS,
        }
    }
}

/// One answer of a session.
///
/// `question_type`, `flags` and `stored` are backend-only: they are `Some` for
/// full-scope answers and `None` for public-scope answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub uid: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,

    pub text: String,
    pub value: i64,
    pub lat: i64,
    pub lon: i64,
    pub time_begin: i64,
    pub time_end: i64,
    pub time_zone_delta: i64,
    pub dst_delta: i64,
    pub unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored: Option<i64>,
}

impl Answer {
    /// Create a blank full-scope answer for a question.
    pub fn new(uid: impl Into<String>, question_type: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            question_type: Some(question_type.into()),
            flags: Some(0),
            stored: Some(0),
            ..Self::default()
        }
    }

    /// Set the storage timestamp.
    pub fn with_stored(self, stored: i64) -> Self {
        Self {
            stored: Some(stored),
            ..self
        }
    }

    /// Set the answer flags.
    pub fn with_flags(self, flags: i64) -> Self {
        Self {
            flags: Some(flags),
            ..self
        }
    }

    /// The scope this answer belongs to, judged by its backend-only fields.
    pub fn scope(&self) -> Scope {
        if self.question_type.is_some() || self.flags.is_some() || self.stored.is_some() {
            Scope::Full
        } else {
            Scope::Public
        }
    }

    /// Restrict this answer to the given scope.
    ///
    /// Narrowing to [`Scope::Public`] drops `type`, `flags` and `stored`. Widening to
    /// [`Scope::Full`] leaves the answer as is.
    pub fn into_scope(self, scope: Scope) -> Self {
        match scope {
            Scope::Full => self,
            Scope::Public => Self {
                question_type: None,
                flags: None,
                stored: None,
                ..self
            },
        }
    }

    /// Check if the answer carries the [`ANSWER_DELETED`] flag.
    pub fn is_deleted(&self) -> bool {
        self.flags.is_some_and(|flags| flags & ANSWER_DELETED != 0)
    }

    /// Decode an answer from a session-file line.
    ///
    /// The line must have the full-scope width of 13 fields in either scope;
    /// [`Scope::Public`] drops the backend-only fields after decoding.
    ///
    /// ```
    /// use surveylog_types::{Answer, Decoded, Scope};
    ///
    /// let line = "q1:INT::42:0:0:0:0:0:0::0:1700000000";
    /// let answer = Answer::decode(line, Scope::Full).unwrap().record().unwrap();
    /// assert_eq!(answer.value, 42);
    ///
    /// let header = Answer::decode("survey/abc123", Scope::Full).unwrap();
    /// assert!(matches!(header, Decoded::NotARecord { found: 1, expected: 13 }));
    /// ```
    pub fn decode(line: &str, scope: Scope) -> Result<Decoded<Self>, CodecError> {
        Self::decode_with(line, scope, Escaping::Legacy)
    }

    /// Decode an answer with an explicit escaping mode.
    pub fn decode_with(
        line: &str,
        scope: Scope,
        escaping: Escaping,
    ) -> Result<Decoded<Self>, CodecError> {
        let parts = row::decode_with(line, escaping);
        if let Some(mismatch) = width_mismatch(&parts, ANSWER_FIELDS.len()) {
            return Ok(mismatch);
        }

        let text = |i: usize| parts[i].trim().to_string();
        let int = |i: usize| parse_int(ANSWER_FIELDS[i], &parts[i]);

        let answer = Self {
            uid: text(0),
            question_type: Some(text(1)),
            text: text(2),
            value: int(3)?,
            lat: int(4)?,
            lon: int(5)?,
            time_begin: int(6)?,
            time_end: int(7)?,
            time_zone_delta: int(8)?,
            dst_delta: int(9)?,
            unit: text(10),
            flags: Some(int(11)?),
            stored: Some(int(12)?),
        };

        Ok(Decoded::Record(answer.into_scope(scope)))
    }

    /// Encode this answer as a session-file line.
    ///
    /// Only the fields of `scope` are written; absent backend-only fields are
    /// written as empty strings in [`Scope::Full`].
    pub fn encode(&self, scope: Scope) -> String {
        self.encode_with(scope, Escaping::Legacy)
    }

    /// Encode this answer with an explicit escaping mode.
    pub fn encode_with(&self, scope: Scope, escaping: Escaping) -> String {
        row::encode_with(&self.fields(scope), escaping)
    }

    /// The row fields of this answer in the given scope.
    pub fn fields(&self, scope: Scope) -> Vec<Field> {
        let mut fields = vec![Field::from(&self.uid)];
        if scope == Scope::Full {
            fields.push(Field::from(self.question_type.clone()));
        }
        fields.extend([
            Field::from(&self.text),
            Field::Int(self.value),
            Field::Int(self.lat),
            Field::Int(self.lon),
            Field::Int(self.time_begin),
            Field::Int(self.time_end),
            Field::Int(self.time_zone_delta),
            Field::Int(self.dst_delta),
            Field::from(&self.unit),
        ]);
        if scope == Scope::Full {
            fields.push(Field::from(self.flags));
            fields.push(Field::from(self.stored));
        }
        fields
    }
}
