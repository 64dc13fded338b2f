use serde::{Deserialize, Serialize};

use crate::decoded::{parse_int, width_mismatch};
use crate::row::{self, Escaping, Field};
use crate::{CodecError, Decoded, QuestionType, ValueError};

/// Field names of a question row, in row order.
pub const QUESTION_FIELDS: [&str; 12] = [
    "uid",
    "question_text",
    "question_html",
    "type",
    "flags",
    "default_value",
    "min_value",
    "max_value",
    "decimal_places",
    "num_choices",
    "choices",
    "unit",
];

/// Separator of the items in the `choices` field.
pub const CHOICE_SEPARATOR: char = ',';

/// Question flags.
///
/// The low four bits select how integer input is formatted as a duration.
pub mod flags {
    pub const SEC: i64 = 1;
    pub const MIN: i64 = 2;
    pub const HOUR: i64 = 4;
    pub const DAY: i64 = 8;

    pub const MIN_SEC: i64 = MIN | SEC;
    pub const HOUR_MIN: i64 = HOUR | MIN;
    pub const HOUR_MIN_SEC: i64 = HOUR | MIN | SEC;
    // Existing surveys store this combination as 13 (DAY | HOUR | SEC).
    pub const DAY_HOUR_MIN: i64 = 13;
    pub const DAY_HOUR_MIN_SEC: i64 = DAY | HOUR | MIN | SEC;

    /// The question is initialised automatically.
    pub const AUTO_POPULATE: i64 = 16;
    /// The question is not shown and can only be completed by auto population.
    pub const HIDDEN: i64 = 32;
    /// Auto population picks a random value in the valid range.
    pub const RANDOM_INITIAL_VALUE: i64 = 64;
    /// An answer is required.
    pub const MANDATORY: i64 = 128;
}

/// A question definition, one line of a survey file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub uid: String,
    pub question_text: String,
    pub question_html: String,

    #[serde(rename = "type")]
    pub question_type: String,

    pub flags: i64,
    pub default_value: String,
    pub min_value: i64,
    pub max_value: i64,
    pub decimal_places: i64,
    pub num_choices: i64,

    /// Choice labels. Items are not escaped, so they cannot contain a comma.
    pub choices: Vec<String>,

    pub unit: String,
}

impl Question {
    /// Create a question with the given uid and type tag.
    pub fn new(uid: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            uid: uid.into(),
            question_type: question_type.to_string(),
            ..Self::default()
        }
    }

    /// Resolve the type tag of this question.
    pub fn kind(&self) -> Result<QuestionType, ValueError> {
        self.question_type.parse()
    }

    /// Check if all bits of `flag` are set.
    pub fn has_flag(&self, flag: i64) -> bool {
        self.flags & flag == flag
    }

    pub fn is_mandatory(&self) -> bool {
        self.has_flag(flags::MANDATORY)
    }

    pub fn is_hidden(&self) -> bool {
        self.has_flag(flags::HIDDEN)
    }

    /// Decode a question from a survey-file line.
    ///
    /// ```
    /// use surveylog_types::Question;
    ///
    /// let line = "q1:Pick one:<p>Pick one</p>:SINGLECHOICE:0::0:0:0:3:red,green,blue:";
    /// let question = Question::decode(line).unwrap().record().unwrap();
    /// assert_eq!(question.choices, ["red", "green", "blue"]);
    /// ```
    pub fn decode(line: &str) -> Result<Decoded<Self>, CodecError> {
        Self::decode_with(line, Escaping::Legacy)
    }

    /// Decode a question with an explicit escaping mode.
    pub fn decode_with(line: &str, escaping: Escaping) -> Result<Decoded<Self>, CodecError> {
        let parts = row::decode_with(line, escaping);
        if let Some(mismatch) = width_mismatch(&parts, QUESTION_FIELDS.len()) {
            return Ok(mismatch);
        }

        let text = |i: usize| parts[i].trim().to_string();
        let int = |i: usize| parse_int(QUESTION_FIELDS[i], &parts[i]);

        Ok(Decoded::Record(Self {
            uid: text(0),
            question_text: text(1),
            question_html: text(2),
            question_type: text(3),
            flags: int(4)?,
            default_value: text(5),
            min_value: int(6)?,
            max_value: int(7)?,
            decimal_places: int(8)?,
            num_choices: int(9)?,
            choices: split_choices(parts[10].trim()),
            unit: text(11),
        }))
    }

    /// Encode this question as a survey-file line.
    pub fn encode(&self) -> String {
        self.encode_with(Escaping::Legacy)
    }

    /// Encode this question with an explicit escaping mode.
    pub fn encode_with(&self, escaping: Escaping) -> String {
        row::encode_with(&self.fields(), escaping)
    }

    /// The row fields of this question.
    pub fn fields(&self) -> Vec<Field> {
        let choices = self.choices.join(CHOICE_SEPARATOR.to_string().as_str());
        vec![
            Field::from(&self.uid),
            Field::from(&self.question_text),
            Field::from(&self.question_html),
            Field::from(&self.question_type),
            Field::Int(self.flags),
            Field::from(&self.default_value),
            Field::Int(self.min_value),
            Field::Int(self.max_value),
            Field::Int(self.decimal_places),
            Field::Int(self.num_choices),
            Field::Text(choices),
            Field::from(&self.unit),
        ]
    }
}

fn split_choices(field: &str) -> Vec<String> {
    if field.is_empty() {
        Vec::new()
    } else {
        field.split(CHOICE_SEPARATOR).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question() -> Question {
        Question {
            question_text: "How do you commute?".to_string(),
            question_html: "<b>How</b> do you commute?".to_string(),
            flags: flags::MANDATORY,
            default_value: "walk".to_string(),
            num_choices: 3,
            choices: vec!["walk".to_string(), "bike".to_string(), "car".to_string()],
            ..Question::new("commute", QuestionType::SingleChoice)
        }
    }

    #[test]
    fn round_trip() {
        let question = choice_question();
        let line = question.encode();
        assert_eq!(
            line,
            "commute:How do you commute?:<b>How</b> do you commute?:SINGLECHOICE:128:walk:0:0:0:3:walk,bike,car:"
        );
        assert_eq!(Question::decode(&line).unwrap(), Decoded::Record(question));
    }

    #[test]
    fn colons_in_text_round_trip() {
        let question = Question {
            question_text: "Time: when did you wake up?".to_string(),
            default_value: "07:30".to_string(),
            ..Question::new("wake", QuestionType::DayTime)
        };
        let decoded = Question::decode(&question.encode()).unwrap().record();
        assert_eq!(decoded, Some(question));
    }

    #[test]
    fn empty_choices() {
        let question = Question::decode("q:text:html:TEXT:0::0:0:0:0::")
            .unwrap()
            .record()
            .unwrap();
        assert!(question.choices.is_empty());
    }

    #[test]
    fn blank_numbers_are_zero() {
        let question = Question::decode("q:text:html:INT: :: :: : :: cm")
            .unwrap()
            .record()
            .unwrap();
        assert_eq!(question.flags, 0);
        assert_eq!(question.min_value, 0);
        assert_eq!(question.max_value, 0);
        assert_eq!(question.decimal_places, 0);
        assert_eq!(question.num_choices, 0);
        assert_eq!(question.unit, "cm");
    }

    #[test]
    fn wrong_width_is_not_a_record() {
        assert_eq!(
            Question::decode("uid:text").unwrap(),
            Decoded::NotARecord {
                found: 2,
                expected: 12
            }
        );
        assert!(!Question::decode("").unwrap().is_record());
    }

    #[test]
    fn non_integer_is_an_error() {
        let err = Question::decode("q:text:html:INT:0::low:0:0:0::").unwrap_err();
        assert_eq!(err.field(), "min_value");
    }

    #[test]
    fn flags_and_kind() {
        let question = choice_question();
        assert!(question.is_mandatory());
        assert!(!question.is_hidden());
        assert_eq!(question.kind(), Ok(QuestionType::SingleChoice));

        let unknown = Question {
            question_type: "SLIDER".to_string(),
            ..question
        };
        assert!(unknown.kind().is_err());
    }
}
