use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValueError;

/// Unit written by answers holding seconds (times, ranges, durations).
pub const UNIT_SECONDS: &str = "seconds";

/// Unit written by LATLON answers.
pub const UNIT_DEGREES: &str = "degrees";

/// The type tag of a question, selecting how its answer is stored.
///
/// Tags are written in session and survey files as upper-case strings such
/// as `INT` or `TIMERANGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum QuestionType {
    /// Integer in `value`.
    Int,
    /// Fixed-point number encoded as an integer in `value`.
    FixedPoint,
    /// Comma-separated choices in `text` (checkboxes).
    MultiChoice,
    /// Comma-separated choices in `text` (select).
    MultiSelect,
    /// Coordinates in `lat` and `lon`.
    LatLon,
    /// UNIX time in `time_begin`.
    DateTime,
    /// Seconds since midnight in `time_begin`.
    DayTime,
    /// Range within a day in `time_begin` and `time_end`.
    TimeRange,
    /// File upload. Has no answer representation.
    Upload,
    Text,
    /// Single checkbox; `text` holds the OFF or ON choice.
    Checkbox,
    Hidden,
    TextArea,
    Email,
    Password,
    SingleChoice,
    SingleSelect,
    /// Ascending comma-separated fixed-point values in `text`.
    FixedPointSequence,
    /// Ascending comma-separated day times in `text`.
    DayTimeSequence,
    /// Ascending comma-separated UNIX times in `text`.
    DateTimeSequence,
    /// Duration within 24 hours, in seconds, in `value`.
    Duration24,
    /// Free-form text collected by a dialog.
    DialogDataCrawler,
}

impl QuestionType {
    /// All question types, in the order of their numeric codes.
    pub const ALL: [QuestionType; 22] = [
        Self::Int,
        Self::FixedPoint,
        Self::MultiChoice,
        Self::MultiSelect,
        Self::LatLon,
        Self::DateTime,
        Self::DayTime,
        Self::TimeRange,
        Self::Upload,
        Self::Text,
        Self::Checkbox,
        Self::Hidden,
        Self::TextArea,
        Self::Email,
        Self::Password,
        Self::SingleChoice,
        Self::SingleSelect,
        Self::FixedPointSequence,
        Self::DayTimeSequence,
        Self::DateTimeSequence,
        Self::Duration24,
        Self::DialogDataCrawler,
    ];

    /// The tag as written in session files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::FixedPoint => "FIXEDPOINT",
            Self::MultiChoice => "MULTICHOICE",
            Self::MultiSelect => "MULTISELECT",
            Self::LatLon => "LATLON",
            Self::DateTime => "DATETIME",
            Self::DayTime => "DAYTIME",
            Self::TimeRange => "TIMERANGE",
            Self::Upload => "UPLOAD",
            Self::Text => "TEXT",
            Self::Checkbox => "CHECKBOX",
            Self::Hidden => "HIDDEN",
            Self::TextArea => "TEXTAREA",
            Self::Email => "EMAIL",
            Self::Password => "PASSWORD",
            Self::SingleChoice => "SINGLECHOICE",
            Self::SingleSelect => "SINGLESELECT",
            Self::FixedPointSequence => "FIXEDPOINT_SEQUENCE",
            Self::DayTimeSequence => "DAYTIME_SEQUENCE",
            Self::DateTimeSequence => "DATETIME_SEQUENCE",
            Self::Duration24 => "DURATION24",
            Self::DialogDataCrawler => "DIALOG_DATA_CRAWLER",
        }
    }

    /// The unit a value of this type is written with, if it sets one.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::LatLon => Some(UNIT_DEGREES),
            Self::DateTime
            | Self::DayTime
            | Self::TimeRange
            | Self::DayTimeSequence
            | Self::DateTimeSequence
            | Self::Duration24 => Some(UNIT_SECONDS),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older controllers wrote the crawler tag with its C prefix.
        if s == "QTYPE_DIALOG_DATA_CRAWLER" {
            return Ok(Self::DialogDataCrawler);
        }
        Self::ALL
            .into_iter()
            .find(|qtype| qtype.as_str() == s)
            .ok_or_else(|| ValueError::UnknownType(s.to_string()))
    }
}

impl From<QuestionType> for &'static str {
    fn from(qtype: QuestionType) -> Self {
        qtype.as_str()
    }
}

impl TryFrom<String> for QuestionType {
    type Error = ValueError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
