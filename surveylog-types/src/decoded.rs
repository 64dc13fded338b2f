use crate::CodecError;

/// Outcome of decoding one line against a fixed-width schema.
///
/// Header lines and corrupted lines are expected in session files, so a
/// field-count mismatch is reported as [`Decoded::NotARecord`] rather than as an
/// error. It is never a partially filled record.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The line matched the schema width.
    Record(T),

    /// The line had `found` fields where the schema needs `expected`.
    NotARecord { found: usize, expected: usize },
}

impl<T> Decoded<T> {
    /// Check if a record was decoded.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Get the decoded record, if any.
    pub fn record(self) -> Option<T> {
        match self {
            Self::Record(record) => Some(record),
            Self::NotARecord { .. } => None,
        }
    }

    /// Transform the decoded record.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Self::Record(record) => Decoded::Record(f(record)),
            Self::NotARecord { found, expected } => Decoded::NotARecord { found, expected },
        }
    }
}

/// Parse an integer field. A blank field counts as `0`.
pub(crate) fn parse_int(field: &'static str, text: &str) -> Result<i64, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| CodecError::InvalidInteger {
            field,
            text: text.to_string(),
        })
}

/// Compare the field count of a decoded row against a schema width.
pub(crate) fn width_mismatch<T>(parts: &[String], expected: usize) -> Option<Decoded<T>> {
    (parts.len() != expected).then_some(Decoded::NotARecord {
        found: parts.len(),
        expected,
    })
}
