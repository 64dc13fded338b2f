//! Scripted controller for driving sessions without survey logic.
//!
//! `ScriptedController` answers the hooks with pre-defined results. This is
//! useful for testing hosts and session files.
//!
//! # Example
//!
//! ```rust
//! use surveylog::{Action, HookContext, ScriptedController, SessionController};
//!
//! let controller = ScriptedController::new().with_next(["q2"]);
//! let questions = vec!["q1".to_string(), "q2".to_string()];
//! let context = HookContext::new("demo/abc", "session", Action::NextQuestions);
//!
//! let next = controller.next_questions(&questions, &[], &context).unwrap();
//! assert_eq!(next.next_questions, ["q2"]);
//! assert_eq!(next.progress, [0, 2]);
//! ```

use crate::{Answer, HookContext, NextQuestions, SessionController, Status};

/// A controller that returns pre-configured hook results.
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    next: Option<NextQuestions>,
    report: Option<serde_json::Value>,
}

/// Error type for ScriptedController.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedControllerError {
    #[error("No next questions scripted")]
    MissingNextQuestions,

    #[error("No analysis report scripted")]
    MissingReport,

    #[error("Scripted next question '{0}' is not part of the survey")]
    UnknownQuestion(String),
}

impl ScriptedController {
    /// Create a controller with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the given questions next.
    pub fn with_next<I, S>(mut self, next_questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next = Some(NextQuestions::ask(
            next_questions.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Report the survey as finished.
    pub fn with_finished(mut self, message: impl Into<String>) -> Self {
        self.next = Some(NextQuestions::finished(message));
        self
    }

    /// Attach a status and message to the scripted next questions.
    pub fn with_status(mut self, status: Status, message: impl Into<String>) -> Self {
        self.next = Some(self.next.unwrap_or_default().with_status(status, message));
        self
    }

    /// Return the given analysis report.
    pub fn with_report(mut self, report: serde_json::Value) -> Self {
        self.report = Some(report);
        self
    }
}

impl SessionController for ScriptedController {
    type Error = ScriptedControllerError;

    fn next_questions(
        &self,
        questions: &[String],
        answers: &[Answer],
        _context: &HookContext,
    ) -> Result<NextQuestions, Self::Error> {
        let next = self
            .next
            .clone()
            .ok_or(ScriptedControllerError::MissingNextQuestions)?;

        if let Some(unknown) = next
            .next_questions
            .iter()
            .find(|uid| !questions.contains(uid))
        {
            return Err(ScriptedControllerError::UnknownQuestion(unknown.clone()));
        }

        Ok(next.with_progress(answers.len(), questions.len()))
    }

    fn analyse(
        &self,
        _questions: &[String],
        _answers: &[Answer],
        _context: &HookContext,
    ) -> Result<serde_json::Value, Self::Error> {
        self.report
            .clone()
            .ok_or(ScriptedControllerError::MissingReport)
    }
}
