//! Colon-delimited rows, the line format of session and survey files.
//!
//! A row is an ordered list of scalar fields joined with `:`. Colons inside a
//! field are written as `\:`.
//!
//! # Escaping
//!
//! [`Escaping::Legacy`] is the format the session files are written in. It escapes
//! the colon only, never the backslash, so the two characters `\:` on disk are
//! either an escaped colon or a field ending in `\` followed by the delimiter.
//! Decoding always reads them as an escaped colon. That ambiguity is part of
//! the stored format and is kept as is. [`Escaping::Strict`] also escapes the
//! backslash (`\\`) and round-trips every string, but it is not readable by
//! consumers of the legacy format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field delimiter.
pub const DELIMITER: char = ':';

/// Escape character.
pub const ESCAPE: char = '\\';

/// How literal delimiters (and backslashes) inside a field are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escaping {
    /// Escape `:` as `\:` and nothing else.
    #[default]
    Legacy,

    /// Escape `:` as `\:` and `\` as `\\`.
    Strict,
}

/// A single scalar field of a row, before it is rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// No value; rendered as the empty string.
    Absent,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Field {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i64> for Field {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for Field {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Encode fields into a single row using [`Escaping::Legacy`].
///
/// ```
/// use surveylog_types::row::{self, Field};
///
/// let line = row::encode(&[Field::from("a:b"), Field::Int(3), Field::Absent, Field::Bool(true)]);
/// assert_eq!(line, r"a\:b:3::true");
/// ```
pub fn encode(fields: &[Field]) -> String {
    encode_with(fields, Escaping::Legacy)
}

/// Encode fields into a single row.
pub fn encode_with(fields: &[Field], escaping: Escaping) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        escape_into(&mut line, &field.to_string(), escaping);
    }
    line
}

fn escape_into(out: &mut String, value: &str, escaping: Escaping) {
    for c in value.chars() {
        match c {
            DELIMITER => {
                out.push(ESCAPE);
                out.push(DELIMITER);
            }
            ESCAPE if escaping == Escaping::Strict => {
                out.push(ESCAPE);
                out.push(ESCAPE);
            }
            _ => out.push(c),
        }
    }
}

/// Decode a row into its fields using [`Escaping::Legacy`].
///
/// Surrounding line terminators are dropped. An empty line yields a single
/// empty field; rejecting it is left to the schema width check of the caller.
///
/// ```
/// use surveylog_types::row;
///
/// assert_eq!(row::decode("a\\:b:3::true\n"), vec!["a:b", "3", "", "true"]);
/// assert_eq!(row::decode(""), vec![""]);
/// ```
pub fn decode(line: &str) -> Vec<String> {
    decode_with(line, Escaping::Legacy)
}

/// Decode a row into its fields.
pub fn decode_with(line: &str, escaping: Escaping) -> Vec<String> {
    let line = line.trim_matches(['\r', '\n']);

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match (escaping, chars.peek().copied()) {
                (_, Some(DELIMITER)) => {
                    current.push(DELIMITER);
                    chars.next();
                }
                (Escaping::Strict, Some(next)) => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push(ESCAPE),
            },
            DELIMITER => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<Field> {
        values.iter().map(|v| Field::from(*v)).collect()
    }

    #[test]
    fn encode_scalars() {
        let line = encode(&[
            Field::from("q1"),
            Field::Absent,
            Field::Int(-7),
            Field::Bool(false),
            Field::from(None::<i64>),
        ]);
        assert_eq!(line, "q1::-7:false:");
    }

    #[test]
    fn round_trip_without_colons() {
        let values = ["uid", "", "some text", "42", "a,b,c", " padded "];
        assert_eq!(decode(&encode(&texts(&values))), values);
    }

    #[test]
    fn round_trip_with_colons() {
        for value in ["12:30", ":", "::", "a:b:c", ":leading", "trailing:"] {
            assert_eq!(decode(&encode(&texts(&[value]))), vec![value]);
        }
    }

    #[test]
    fn decode_trims_line_terminators() {
        assert_eq!(decode("a:b\r\n"), vec!["a", "b"]);
        assert_eq!(decode("a:b\n"), vec!["a", "b"]);
    }

    #[test]
    fn decode_empty_line() {
        assert_eq!(decode(""), vec![""]);
        assert_eq!(decode("\n"), vec![""]);
    }

    #[test]
    fn decode_keeps_other_backslashes() {
        assert_eq!(decode(r"C:\\dir"), vec!["C", r"\\dir"]);
        assert_eq!(decode(r"end\"), vec![r"end\"]);
    }

    #[test]
    fn legacy_escaped_colon_ambiguity() {
        // A field ending in a backslash swallows the following delimiter.
        let encoded = encode(&texts(&[r"a\", "b"]));
        assert_eq!(encoded, r"a\:b");
        assert_eq!(decode(&encoded), vec!["a:b"]);
    }

    #[test]
    fn strict_round_trips_backslashes() {
        let values = [r"a\:b", r"\", r"C:\dir\", "plain"];
        let encoded = encode_with(&texts(&values), Escaping::Strict);
        assert_eq!(decode_with(&encoded, Escaping::Strict), values);
    }

    #[test]
    fn strict_escapes_backslash() {
        let fields = texts(&[r"a\b:c"]);
        assert_eq!(encode_with(&fields, Escaping::Strict), r"a\\b\:c");
        assert_eq!(encode_with(&fields, Escaping::Legacy), r"a\b\:c");
    }
}
