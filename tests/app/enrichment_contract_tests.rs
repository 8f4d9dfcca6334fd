//! Requests the planner sends through the enrichment port.

use std::sync::Arc;

use async_trait::async_trait;
use bitetask::{
    storage::adapters::InMemoryKeyValueStore,
    task::{
        adapters::{KeyValueTaskStore, memory::InMemoryTaskStore},
        domain::{EnrichedTask, EnrichmentRequest, PlanMode},
        ports::{EnrichmentError, EnrichmentResult, TaskEnrichmentService},
        services::{PlanOutcome, PlanRequest, PlanningError, PlanningService, TaskBoardService},
    },
};
use mockable::DefaultClock;
use mockall::{Sequence, mock};
use rstest::rstest;

mock! {
    pub Enrichment {}

    #[async_trait]
    impl TaskEnrichmentService for Enrichment {
        async fn enrich(&self, request: EnrichmentRequest) -> EnrichmentResult<Vec<EnrichedTask>>;
    }
}

fn guided(text: &str, minutes: u32) -> EnrichedTask {
    EnrichedTask::new(text, minutes).with_guidance("Finish it", "One tab only", "Open the file")
}

async fn planner(
    mock: MockEnrichment,
) -> (
    Arc<TaskBoardService<DefaultClock>>,
    PlanningService<MockEnrichment, DefaultClock>,
) {
    let board = Arc::new(
        TaskBoardService::init(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock)).await,
    );
    let service = PlanningService::new(Arc::clone(&board), Arc::new(mock));
    (board, service)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_then_incremental_hints() -> eyre::Result<()> {
    let mut mock = MockEnrichment::new();
    let mut order = Sequence::new();
    mock.expect_enrich()
        .withf(|request| request.is_initial_load() && request.task_texts() == ["draft", "email"])
        .times(1)
        .in_sequence(&mut order)
        .returning(|_| Ok(vec![guided("Draft the memo", 25), guided("Answer Sam", 5)]));
    mock.expect_enrich()
        .withf(|request| !request.is_initial_load() && request.task_texts() == ["call bank"])
        .times(1)
        .in_sequence(&mut order)
        .returning(|_| Ok(vec![guided("Call the bank", 10)]));
    let (board, service) = planner(mock).await;

    service.submit(&PlanRequest::parse("draft\n\n email \n")?).await?;
    let outcome = service.submit(&PlanRequest::parse("call bank")?).await?;

    assert!(matches!(
        outcome,
        PlanOutcome::Merged {
            mode: PlanMode::Incremental,
            ..
        }
    ));
    let top: Vec<String> = board.top_tasks().iter().map(|t| t.text().to_owned()).collect();
    assert_eq!(top, ["Draft the memo", "Answer Sam"]);
    let backlog = board.bottom_tasks();
    assert_eq!(backlog.len(), 1);
    assert!(backlog.iter().all(|t| t.do_this() == "Open the file" && t.priority() == 3));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_failure_is_reported_once() -> eyre::Result<()> {
    let mut mock = MockEnrichment::new();
    mock.expect_enrich()
        .times(1)
        .returning(|_| Err(EnrichmentError::Malformed("expected a task list".into())));
    let (board, service) = planner(mock).await;

    let result = service.submit(&PlanRequest::parse("anything")?).await;

    assert!(matches!(
        result,
        Err(PlanningError::EnrichmentFailed(EnrichmentError::Malformed(_)))
    ));
    assert!(board.snapshot().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merged_plan_reaches_key_value_store() -> eyre::Result<()> {
    let mut mock = MockEnrichment::new();
    mock.expect_enrich()
        .returning(|request| {
            Ok(request
                .task_texts()
                .iter()
                .map(|text| guided(text, 20))
                .collect())
        });
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let store = Arc::new(KeyValueTaskStore::new(Arc::clone(&kv)));
    let board = Arc::new(TaskBoardService::init(store, Arc::new(DefaultClock)).await);
    let service = PlanningService::new(Arc::clone(&board), Arc::new(mock));

    service.submit(&PlanRequest::parse("a\nb\nc\nd")?).await?;
    board.flush().await;

    let blob = kv
        .peek("bitetask_tasks")
        .ok_or_else(|| eyre::eyre!("task list was not saved"))?;
    let saved: serde_json::Value = serde_json::from_str(&blob)?;
    assert_eq!(saved.as_array().map(Vec::len), Some(4));
    Ok(())
}
