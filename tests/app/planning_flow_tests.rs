//! Onboarding, first plan, and follow-up batches through the app.

use std::sync::Arc;

use super::helpers::{Harness, focus_ids};
use bitetask::{
    app::AppError,
    onboarding::domain::{OnboardingStep, ProblemOption},
    storage::adapters::InMemoryKeyValueStore,
    task::{
        domain::{BoardChange, PlanMode, Rejection, TaskStatus},
        ports::EnrichmentError,
        services::{PlanOutcome, PlanRequest, PlanningError},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_run_produces_focus_board() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    assert_eq!(app.onboarding().current_step(), OnboardingStep::Problem);

    app.onboarding().select_problem(Some(ProblemOption::CantFocus));
    app.onboarding().set_current_step(OnboardingStep::AiProcessing);
    let outcome = app
        .submit_tasks(&PlanRequest::parse("write report\nreply to email\nbook dentist\nplan trip")?)
        .await?;
    app.finish_onboarding();

    assert!(matches!(
        outcome,
        PlanOutcome::Merged {
            mode: PlanMode::Bootstrap,
            ..
        }
    ));
    assert_eq!(app.onboarding().current_step(), OnboardingStep::Main);
    assert_eq!(app.onboarding().state().plan_generation_count, 1);
    assert_eq!(app.board().top_tasks().len(), 3);
    assert_eq!(app.board().bottom_tasks().len(), 1);
    assert_eq!(app.board().total_minutes(), 45);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_plan_after_onboarding_counts_generation() -> eyre::Result<()> {
    let harness = Harness::echoing(3);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb")?).await?;
    app.finish_onboarding();

    app.submit_tasks(&PlanRequest::parse("c")?).await?;
    assert_eq!(app.onboarding().state().plan_generation_count, 1);

    app.submit_tasks(&PlanRequest::parse("fresh")?.start_fresh())
        .await?;
    assert_eq!(app.onboarding().state().plan_generation_count, 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_day_and_refilling_focus() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc\nd\ne")?).await?;

    let focus = focus_ids(&app);
    for id in &focus[..2] {
        assert!(app.complete_task(*id)?.change.is_applied());
    }
    let refill = app.add_next_tasks()?;

    assert_eq!(refill.affected().len(), 2);
    assert_eq!(app.board().top_tasks().len(), 3);
    assert!(app.board().bottom_tasks().is_empty());
    assert_eq!(app.onboarding().state().completed_task_count, 2);
    assert!(app.clear_completed()?.is_applied());
    assert_eq!(app.board().completed_count(), 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_operations_pass_through() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc\nd")?).await?;
    let top = focus_ids(&app)[0];
    let bottom = app.board().bottom_tasks()[0].id();

    assert_eq!(
        app.promote_task(bottom)?,
        BoardChange::Unchanged(Rejection::FocusSlotsFull)
    );
    assert!(app.swap_tasks(top, bottom)?.is_applied());
    assert!(app.demote_task(bottom)?.is_applied());
    assert!(app.promote_task(top)?.is_applied());
    assert!(app.delete_task(top)?.is_applied());
    assert_eq!(
        app.board().task(bottom).map(|task| task.status()),
        Some(TaskStatus::Bottom)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planning_failure_surfaces_and_leaves_board() -> eyre::Result<()> {
    let harness = Harness::echoing(0);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;

    let result = app.submit_tasks(&PlanRequest::parse("a")?).await;

    assert!(matches!(
        result,
        Err(AppError::Planning(PlanningError::EnrichmentFailed(
            EnrichmentError::Empty
        )))
    ));
    assert!(app.board().snapshot().is_empty());
    assert_eq!(app.onboarding().state().plan_generation_count, 0);
    Ok(())
}
