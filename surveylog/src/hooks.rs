use std::fmt;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::{debug, instrument, warn};

use crate::Answer;

/// The session action that triggered a hook call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "ACTION_SESSION_NEXTQUESTIONS")]
    NextQuestions,
    #[serde(rename = "ACTION_SESSION_ADDANSWER")]
    AddAnswer,
    #[serde(rename = "ACTION_SESSION_DELETEANSWER")]
    DeleteAnswer,
    #[serde(rename = "ACTION_SESSION_ANALYSIS")]
    Analysis,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextQuestions => "ACTION_SESSION_NEXTQUESTIONS",
            Self::AddAnswer => "ACTION_SESSION_ADDANSWER",
            Self::DeleteAnswer => "ACTION_SESSION_DELETEANSWER",
            Self::Analysis => "ACTION_SESSION_ANALYSIS",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome severity reported by a next-questions hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Status {
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
}

/// Session context handed to every hook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookContext {
    /// Survey id and hashed version, as `<survey_id>/<hash>`.
    pub survey_id: String,
    pub session_id: String,
    pub action: Action,
    /// Answers affected by `action`; positive for additions, negative for deletions.
    pub affected_count: i64,
}

impl HookContext {
    pub fn new(survey_id: impl Into<String>, session_id: impl Into<String>, action: Action) -> Self {
        Self {
            survey_id: survey_id.into(),
            session_id: session_id.into(),
            action,
            affected_count: 0,
        }
    }

    /// Set the number of affected answers.
    pub fn with_affected_count(mut self, affected_count: i64) -> Self {
        self.affected_count = affected_count;
        self
    }
}

/// Result of a next-questions hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextQuestions {
    pub status: Status,
    pub message: String,
    /// Answered and total question counts.
    #[serde(default)]
    pub progress: [usize; 2],
    /// Question ids to ask next, in order. Empty when the survey is finished.
    pub next_questions: Vec<String>,
}

impl NextQuestions {
    /// An informational result asking the given questions next.
    pub fn ask(next_questions: Vec<String>) -> Self {
        Self {
            next_questions,
            ..Self::default()
        }
    }

    /// An informational result ending the survey.
    pub fn finished(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set the status and message.
    pub fn with_status(mut self, status: Status, message: impl Into<String>) -> Self {
        self.status = status;
        self.message = message.into();
        self
    }

    /// Set the progress counters.
    pub fn with_progress(mut self, answered: usize, total: usize) -> Self {
        self.progress = [answered, total];
        self
    }

    /// Check if no further questions are asked.
    pub fn is_finished(&self) -> bool {
        self.next_questions.is_empty()
    }
}

/// Survey logic driven by the session host.
///
/// Both hooks receive every question id of the survey and the full-scope
/// answers given so far. Deleted answers are filtered out by [`next_questions`]
/// and [`analyse`] before the controller sees them.
pub trait SessionController {
    /// The error type for this controller.
    type Error: Into<anyhow::Error>;

    /// Decide which questions to ask next.
    fn next_questions(
        &self,
        questions: &[String],
        answers: &[Answer],
        context: &HookContext,
    ) -> Result<NextQuestions, Self::Error>;

    /// Build the analysis report of a session. The report is opaque JSON.
    fn analyse(
        &self,
        questions: &[String],
        answers: &[Answer],
        context: &HookContext,
    ) -> Result<serde_json::Value, Self::Error>;
}

/// Run the next-questions hook of `controller` for a session.
#[instrument(
    skip_all,
    fields(session_id = %context.session_id, action = %context.action)
)]
pub fn next_questions<C: SessionController>(
    controller: &C,
    questions: &[String],
    answers: &[Answer],
    context: &HookContext,
) -> anyhow::Result<NextQuestions> {
    let answers = live_answers(answers);
    debug!(
        questions = questions.len(),
        answers = answers.len(),
        "invoking next questions hook"
    );

    let next = controller
        .next_questions(questions, &answers, context)
        .map_err(Into::into)?;

    match next.status {
        Status::Info => debug!(next = ?next.next_questions, "next questions"),
        Status::Warn | Status::Error => {
            warn!(status = ?next.status, message = %next.message, "next questions hook reported a problem")
        }
    }
    Ok(next)
}

/// Run the analysis hook of `controller` for a session.
#[instrument(
    skip_all,
    fields(session_id = %context.session_id, action = %context.action)
)]
pub fn analyse<C: SessionController>(
    controller: &C,
    questions: &[String],
    answers: &[Answer],
    context: &HookContext,
) -> anyhow::Result<serde_json::Value> {
    let answers = live_answers(answers);
    debug!(
        questions = questions.len(),
        answers = answers.len(),
        "invoking analysis hook"
    );
    controller
        .analyse(questions, &answers, context)
        .map_err(Into::into)
}

fn live_answers(answers: &[Answer]) -> Vec<Answer> {
    answers
        .iter()
        .filter(|answer| !answer.is_deleted())
        .cloned()
        .collect()
}

/// Render an error and its chain of causes as a printable trace.
///
/// ```
/// use anyhow::Context;
///
/// let err = Err::<(), _>(anyhow::anyhow!("bad value"))
///     .context("loading session")
///     .unwrap_err();
/// assert_eq!(surveylog::format_error(&err), "Error: loading session\nCaused by: bad value");
/// ```
pub fn format_error(err: &anyhow::Error) -> String {
    err.chain()
        .enumerate()
        .map(|(i, cause)| {
            if i == 0 {
                format!("Error: {cause}")
            } else {
                format!("Caused by: {cause}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
