//! Record codec for survey session logs.
//!
//! This crate provides the line format and record types of session and survey files:
//! - `row` - Colon-delimited, colon-escaped rows of scalar fields
//! - `Answer` and `Question` - Fixed-schema records decoded from and encoded to rows
//! - `QuestionType` - The type tags selecting how an answer stores its value
//! - `Value` and the dispatcher - Typed answer values read from and written to records
//! - `uid` - Question id normalisation for grouped questions

pub mod row;
pub use row::{Escaping, Field};

mod decoded;
pub use decoded::Decoded;

mod answer;
pub use answer::{ANSWER_DELETED, ANSWER_FIELDS, Answer, PUBLIC_ANSWER_FIELDS, Scope};

mod question;
pub use question::{CHOICE_SEPARATOR, QUESTION_FIELDS, Question, flags};

mod question_type;
pub use question_type::{QuestionType, UNIT_DEGREES, UNIT_SECONDS};

mod value;
pub use value::Value;

mod dispatch;
pub use dispatch::{LIST_SEPARATOR, resolve_type, set_answer};

pub mod uid;

mod time;
pub use time::hhmmss;

mod error;
pub use error::{CodecError, ValueError};
