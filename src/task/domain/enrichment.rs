//! Value types exchanged with the external enrichment service.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Largest number of enriched records merged from one batch.
pub const MAX_BATCH: usize = 10;

/// Non-empty list of raw task lines typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTaskBatch(Vec<String>);

impl RawTaskBatch {
    /// Splits free text into one raw task per non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyInput`] when no line has content.
    pub fn parse(input: &str) -> Result<Self, TaskDomainError> {
        Self::from_lines(input.lines())
    }

    /// Builds a batch from pre-split lines, trimming and dropping blanks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyInput`] when no line has content.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, TaskDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let texts: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect();
        if texts.is_empty() {
            return Err(TaskDomainError::EmptyInput);
        }
        Ok(Self(texts))
    }

    /// Returns the raw lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of raw lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a batch holds at least one line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Request sent to the enrichment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequest {
    task_texts: Vec<String>,
    is_initial_load: bool,
}

impl EnrichmentRequest {
    /// Creates a request for the given batch.
    ///
    /// `is_initial_load` asks the service to order the first three records
    /// so they fit a combined duration budget.
    #[must_use]
    pub fn new(batch: &RawTaskBatch, is_initial_load: bool) -> Self {
        Self {
            task_texts: batch.lines().to_vec(),
            is_initial_load,
        }
    }

    /// Returns the raw task texts in submission order.
    #[must_use]
    pub fn task_texts(&self) -> &[String] {
        &self.task_texts
    }

    /// Returns whether the initial-load hint is set.
    #[must_use]
    pub const fn is_initial_load(&self) -> bool {
        self.is_initial_load
    }
}

/// One record returned by the enrichment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTask {
    /// Cleaned-up task description.
    pub text: String,
    /// Estimated duration in minutes.
    pub estimated_minutes: u32,
    /// Short framing of the task.
    pub goal: String,
    /// Constraint that keeps the task bounded.
    pub rule: String,
    /// First concrete action.
    pub do_this: String,
    /// Priority suggested by the service. The planner orders by position
    /// instead and never reads this value.
    pub priority: u32,
}

impl EnrichedTask {
    /// Creates a record with the given text and duration and empty guidance.
    #[must_use]
    pub fn new(text: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            text: text.into(),
            estimated_minutes,
            goal: String::new(),
            rule: String::new(),
            do_this: String::new(),
            priority: 0,
        }
    }

    /// Sets the goal, rule, and first action.
    #[must_use]
    pub fn with_guidance(
        mut self,
        goal: impl Into<String>,
        rule: impl Into<String>,
        do_this: impl Into<String>,
    ) -> Self {
        self.goal = goal.into();
        self.rule = rule.into();
        self.do_this = do_this.into();
        self
    }

    /// Checks that the record carries a usable task text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the text is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.text.trim().is_empty() {
            return Err(TaskDomainError::EmptyTaskText);
        }
        Ok(())
    }

    /// Sets the service-suggested priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }
}

/// Response body returned by the enrichment service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnrichmentResponse {
    /// Enriched records in priority order.
    pub tasks: Vec<EnrichedTask>,
}
