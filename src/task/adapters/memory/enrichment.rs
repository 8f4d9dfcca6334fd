//! Scripted enrichment service that replays canned responses.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::{EnrichedTask, EnrichmentRequest},
    ports::{EnrichmentError, EnrichmentResult, TaskEnrichmentService},
};

#[derive(Debug)]
enum Step {
    Respond(EnrichmentResult<Vec<EnrichedTask>>),
    Echo { estimated_minutes: u32 },
}

/// Enrichment service that answers from a queue of prepared steps.
///
/// Requests are recorded so tests can check what the planner asked for.
/// An exhausted queue answers with [`EnrichmentError::Empty`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedEnrichmentService {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    steps: VecDeque<Step>,
    requests: Vec<EnrichmentRequest>,
}

impl ScriptedEnrichmentService {
    /// Creates a service with no prepared responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    #[must_use]
    pub fn respond_with(self, tasks: Vec<EnrichedTask>) -> Self {
        self.push(Step::Respond(Ok(tasks)));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn fail_with(self, error: EnrichmentError) -> Self {
        self.push(Step::Respond(Err(error)));
        self
    }

    /// Queues a response that turns each raw line into a task of the given
    /// duration, in submission order.
    #[must_use]
    pub fn echo(self, estimated_minutes: u32) -> Self {
        self.push(Step::Echo { estimated_minutes });
        self
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<EnrichmentRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, step: Step) {
        if let Ok(mut state) = self.state.lock() {
            state.steps.push_back(step);
        }
    }
}

fn echo_tasks(request: &EnrichmentRequest, estimated_minutes: u32) -> Vec<EnrichedTask> {
    request
        .task_texts()
        .iter()
        .zip(1_u32..)
        .map(|(text, priority)| EnrichedTask::new(text.clone(), estimated_minutes).with_priority(priority))
        .collect()
}

#[async_trait]
impl TaskEnrichmentService for ScriptedEnrichmentService {
    async fn enrich(&self, request: EnrichmentRequest) -> EnrichmentResult<Vec<EnrichedTask>> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| EnrichmentError::unavailable(std::io::Error::other(err.to_string())))?;
        let step = state.steps.pop_front();
        let response = match step {
            Some(Step::Respond(result)) => result,
            Some(Step::Echo { estimated_minutes }) => Ok(echo_tasks(&request, estimated_minutes)),
            None => Err(EnrichmentError::Empty),
        };
        state.requests.push(request);
        response
    }
}
