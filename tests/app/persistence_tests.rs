//! Restarting the app over durable stores.

use std::sync::Arc;

use super::helpers::{Harness, focus_ids};
use bitetask::{
    config::AppConfig,
    entitlement::domain::PaywallSignal,
    onboarding::domain::OnboardingStep,
    storage::adapters::InMemoryKeyValueStore,
    task::services::PlanRequest,
};
use camino::Utf8Path;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restart_restores_board_and_onboarding() -> eyre::Result<()> {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::clone(&kv)).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc\nd")?).await?;
    app.finish_onboarding();
    let first = focus_ids(&app)[0];
    app.complete_task(first)?;
    app.flush().await;
    let before = app.board().snapshot();
    drop(app);

    let restarted = harness.app(kv).await;

    assert_eq!(restarted.board().snapshot(), before);
    assert_eq!(restarted.onboarding().current_step(), OnboardingStep::Main);
    assert_eq!(restarted.board().completed_tasks()[0].id(), first);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_store_survives_restart() -> eyre::Result<()> {
    let temp = tempfile::tempdir()?;
    let data_dir = Utf8Path::from_path(temp.path())
        .ok_or_else(|| eyre::eyre!("temp dir path is not UTF-8"))?
        .join("bitetask");
    let config = AppConfig::default().with_data_dir(data_dir.clone());
    let harness = Harness::echoing(1);

    let app = harness
        .app_with_config(Arc::new(config.open_store()?), config.clone())
        .await;
    app.submit_tasks(&PlanRequest::parse("write\nread\nrest")?).await?;
    app.finish_onboarding();
    app.flush().await;
    let before = app.board().snapshot();
    drop(app);

    assert!(data_dir.join("bitetask_tasks.json").exists());
    let restarted = harness
        .app_with_config(Arc::new(config.open_store()?), config)
        .await;
    assert_eq!(restarted.board().snapshot(), before);
    assert_eq!(restarted.onboarding().state().plan_generation_count, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restart_past_threshold_starts_locked() -> eyre::Result<()> {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::clone(&kv)).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc")?).await?;
    let mut last = PaywallSignal::Unchanged;
    for id in focus_ids(&app) {
        last = app.complete_task(id)?.paywall;
    }
    assert_eq!(last, PaywallSignal::Show);
    app.flush().await;
    drop(app);

    let restarted = harness.app(kv).await;

    assert!(restarted.is_locked());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_task_blob_starts_empty() -> eyre::Result<()> {
    let kv = Arc::new(InMemoryKeyValueStore::with_entry("bitetask_tasks", "not json"));
    let harness = Harness::echoing(1);

    let app = harness.app(kv).await;

    assert!(app.board().snapshot().is_empty());
    app.submit_tasks(&PlanRequest::parse("a")?).await?;
    assert_eq!(app.board().top_tasks().len(), 1);
    Ok(())
}
