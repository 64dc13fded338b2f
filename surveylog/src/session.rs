use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Answer, CodecError, Decoded, Escaping, Question, Scope};

/// Options for reading and writing session and survey files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
    pub escaping: Escaping,
    pub scope: Scope,
    /// Keep answers flagged as deleted.
    pub keep_deleted: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            escaping: Escaping::Legacy,
            scope: Scope::Full,
            keep_deleted: true,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escaping(mut self, escaping: Escaping) -> Self {
        self.escaping = escaping;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_keep_deleted(mut self, keep_deleted: bool) -> Self {
        self.keep_deleted = keep_deleted;
        self
    }
}

/// A line that was not a record of the expected schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    /// Number of fields found on the line.
    pub fields: usize,
    pub text: String,
}

/// Error type for reading session and survey files.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Line {line}: {source}")]
    Codec {
        line: usize,
        #[source]
        source: CodecError,
    },
}

impl SessionError {
    /// 1-based number of the offending line.
    pub fn line(&self) -> usize {
        match self {
            Self::Codec { line, .. } => *line,
        }
    }
}

/// The answers of a session file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionLog {
    /// Header and other non-record lines, in file order.
    pub skipped: Vec<SkippedLine>,
    pub answers: Vec<Answer>,
}

impl SessionLog {
    /// The first skipped line, which holds the survey id in session files.
    pub fn header(&self) -> Option<&str> {
        self.skipped.first().map(|line| line.text.as_str())
    }

    /// The most recent non-deleted answer for a question.
    pub fn answer(&self, uid: &str) -> Option<&Answer> {
        self.answers
            .iter()
            .rev()
            .find(|answer| answer.uid == uid && !answer.is_deleted())
    }
}

/// Read the answers of a session file.
///
/// Lines that do not have the answer schema width are collected as skipped
/// lines. Blank lines are ignored.
#[instrument(skip_all, fields(scope = ?options.scope))]
pub fn read_answers(input: &str, options: &ReaderOptions) -> Result<SessionLog, SessionError> {
    let mut log = SessionLog::default();

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        if text.trim().is_empty() {
            continue;
        }

        match Answer::decode_with(text, options.scope, options.escaping)
            .map_err(|source| SessionError::Codec { line, source })?
        {
            Decoded::Record(answer) if answer.is_deleted() && !options.keep_deleted => {
                debug!(line, uid = %answer.uid, "dropping deleted answer");
            }
            Decoded::Record(answer) => log.answers.push(answer),
            Decoded::NotARecord { found, expected } => {
                debug!(line, found, expected, "skipping non-answer line");
                log.skipped.push(SkippedLine {
                    line,
                    fields: found,
                    text: text.to_string(),
                });
            }
        }
    }

    debug!(
        answers = log.answers.len(),
        skipped = log.skipped.len(),
        "read session answers"
    );
    Ok(log)
}

/// Write answers as session-file lines, after an optional header line.
pub fn write_answers(header: Option<&str>, answers: &[Answer], options: &ReaderOptions) -> String {
    let mut out = String::new();
    if let Some(header) = header {
        out.push_str(header);
        out.push('\n');
    }
    for answer in answers {
        if answer.is_deleted() && !options.keep_deleted {
            continue;
        }
        out.push_str(&answer.encode_with(options.scope, options.escaping));
        out.push('\n');
    }
    out
}

/// Read the questions of a survey file, skipping lines of any other width.
#[instrument(skip_all)]
pub fn read_questions(input: &str, escaping: Escaping) -> Result<Vec<Question>, SessionError> {
    let mut questions = Vec::new();

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        if text.trim().is_empty() {
            continue;
        }

        match Question::decode_with(text, escaping)
            .map_err(|source| SessionError::Codec { line, source })?
        {
            Decoded::Record(question) => questions.push(question),
            Decoded::NotARecord { found, expected } => {
                debug!(line, found, expected, "skipping non-question line");
            }
        }
    }

    Ok(questions)
}
