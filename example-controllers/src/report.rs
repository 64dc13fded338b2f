use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use surveylog::{Answer, HookContext, NextQuestions, SessionController, Value};
use tracing::{debug, warn};

/// Version of the report layout.
pub const REPORT_VERSION: u32 = 1;

/// Builds a JSON analysis report of a session.
///
/// The report lists the typed value of every answer, keyed by question id.
/// Answers whose value cannot be read are listed under `errors` instead, so a
/// single malformed answer does not fail the whole report.
///
/// ```
/// use example_controllers::Report;
/// use surveylog::{Action, HookContext, SessionController, Value, set_answer};
///
/// let answers = vec![set_answer("age", "INT", &Value::from(42), Some(0)).unwrap()];
/// let context = HookContext::new("demo/abc", "s1", Action::Analysis);
/// let report = Report::new().analyse(&["age".to_string()], &answers, &context).unwrap();
/// assert_eq!(report["answers"]["age"], 42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Report {
    created: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed creation time instead of the current time.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

impl SessionController for Report {
    type Error = anyhow::Error;

    fn next_questions(
        &self,
        _questions: &[String],
        _answers: &[Answer],
        _context: &HookContext,
    ) -> anyhow::Result<NextQuestions> {
        Ok(NextQuestions::finished("Nothing to ask"))
    }

    fn analyse(
        &self,
        questions: &[String],
        answers: &[Answer],
        context: &HookContext,
    ) -> anyhow::Result<serde_json::Value> {
        let mut values: BTreeMap<&str, Value> = BTreeMap::new();
        let mut errors: BTreeMap<&str, String> = BTreeMap::new();

        // Later answers replace earlier ones.
        for answer in answers {
            match answer.get_value(None) {
                Ok(value) => {
                    errors.remove(answer.uid.as_str());
                    values.insert(answer.uid.as_str(), value);
                }
                Err(err) => {
                    warn!(uid = %answer.uid, error = %err, "unreadable answer");
                    values.remove(answer.uid.as_str());
                    errors.insert(answer.uid.as_str(), err.to_string());
                }
            }
        }

        let answered = questions
            .iter()
            .filter(|uid| values.contains_key(uid.as_str()))
            .count();
        debug!(answered, errors = errors.len(), "built session report");

        let created = self.created.unwrap_or_else(Utc::now);
        Ok(json!({
            "created": created.to_rfc3339_opts(SecondsFormat::Secs, true),
            "version": REPORT_VERSION,
            "survey_id": context.survey_id,
            "session_id": context.session_id,
            "progress": [answered, questions.len()],
            "answers": values,
            "errors": errors,
        }))
    }
}
