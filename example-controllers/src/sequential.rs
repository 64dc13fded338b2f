use surveylog::{Answer, HookContext, NextQuestions, SessionController, uid};
use tracing::debug;

/// Asks every question once, in survey order.
///
/// A question counts as answered when an answer exists for its id or, for
/// grouped questions such as `ESS_1__10`, for its normalised base id.
#[derive(Debug, Clone)]
pub struct Sequential {
    batch_size: usize,
}

impl Default for Sequential {
    fn default() -> Self {
        Self { batch_size: 1 }
    }
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask up to `batch_size` questions per call.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn is_answered(question: &str, answers: &[Answer]) -> bool {
        let base = uid::normalise(question);
        answers
            .iter()
            .any(|answer| answer.uid == question || answer.uid == base)
    }
}

impl SessionController for Sequential {
    type Error = anyhow::Error;

    fn next_questions(
        &self,
        questions: &[String],
        answers: &[Answer],
        _context: &HookContext,
    ) -> anyhow::Result<NextQuestions> {
        let open: Vec<&String> = questions
            .iter()
            .filter(|question| !Self::is_answered(question, answers))
            .collect();
        let answered = questions.len() - open.len();
        debug!(answered, open = open.len(), "sequential progress");

        let next = if open.is_empty() {
            NextQuestions::finished("Survey finished!")
        } else {
            NextQuestions::ask(
                open.into_iter()
                    .take(self.batch_size)
                    .cloned()
                    .collect(),
            )
        };
        Ok(next.with_progress(answered, questions.len()))
    }

    fn analyse(
        &self,
        _questions: &[String],
        _answers: &[Answer],
        _context: &HookContext,
    ) -> anyhow::Result<serde_json::Value> {
        anyhow::bail!("Sequential controller does not analyse sessions")
    }
}
