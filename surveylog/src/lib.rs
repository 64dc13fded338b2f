//! # surveylog
//!
//! Session-log records and host hooks for a survey engine.
//!
//! This crate re-exports the record codec from `surveylog-types` and adds the
//! pieces a session host needs around it:
//!
//! - `SessionController` - The survey logic hooks (next questions, analysis)
//! - `read_answers` / `write_answers` / `read_questions` - Whole session and survey files
//! - `format_error` - Printable error traces for reporting across the host boundary
//!
//! ## Usage
//!
//! ```rust
//! use surveylog::{Answer, Decoded, Scope, Value, set_answer};
//!
//! let answer = set_answer("q1", "TIMERANGE", &Value::from([3600, 7200]), Some(1_700_000_000)).unwrap();
//! let line = answer.encode(Scope::Full);
//! assert_eq!(line, "q1:TIMERANGE::0:0:0:3600:7200:0:0:seconds:0:1700000000");
//!
//! let decoded = Answer::decode(&line, Scope::Full).unwrap();
//! assert_eq!(decoded, Decoded::Record(answer));
//! ```
//!
//! ## Logging
//!
//! The codec itself never logs. The hook runners and file readers in this crate
//! emit `tracing` events; installing a subscriber is up to the host.

// Re-export all types from surveylog-types
pub use surveylog_types::*;

mod hooks;
pub use hooks::{
    Action, HookContext, NextQuestions, SessionController, Status, analyse, format_error,
    next_questions,
};

mod session;
pub use session::{
    ReaderOptions, SessionError, SessionLog, SkippedLine, read_answers, read_questions,
    write_answers,
};

// Scripted controller for testing hosts without survey logic
mod scripted;
pub use scripted::{ScriptedController, ScriptedControllerError};
