//! Completion paywall behaviour through the app.

use std::sync::Arc;

use super::helpers::{Harness, PRODUCT, TestApp, focus_ids};
use bitetask::{
    app::AppError,
    config::AppConfig,
    entitlement::domain::{PaywallSignal, PurchaseOutcome},
    storage::adapters::InMemoryKeyValueStore,
    task::services::PlanRequest,
};
use rstest::rstest;

fn complete_focus(app: &TestApp) -> eyre::Result<Vec<PaywallSignal>> {
    let mut signals = Vec::new();
    for id in focus_ids(app) {
        signals.push(app.complete_task(id)?.paywall);
    }
    Ok(signals)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn third_completion_locks_board() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc\nd")?).await?;

    let signals = complete_focus(&app)?;

    assert_eq!(
        signals,
        [
            PaywallSignal::Unchanged,
            PaywallSignal::Unchanged,
            PaywallSignal::Show
        ]
    );
    assert!(app.is_locked());
    assert!(matches!(app.add_next_tasks(), Err(AppError::Locked)));
    assert!(matches!(
        app.submit_tasks(&PlanRequest::parse("e")?).await,
        Err(AppError::Locked)
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purchase_unlocks_and_silences_paywall() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc\nd")?).await?;
    complete_focus(&app)?;

    assert_eq!(app.purchase(PRODUCT).await, PurchaseOutcome::Purchased);

    assert!(!app.is_locked());
    assert!(app.add_next_tasks()?.is_applied());
    let last = focus_ids(&app)[0];
    assert_eq!(app.complete_task(last)?.paywall, PaywallSignal::Unchanged);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_purchase_keeps_lock() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc")?).await?;
    complete_focus(&app)?;
    harness.entitlement.cancel_next_purchase();

    assert_eq!(app.purchase(PRODUCT).await, PurchaseOutcome::Cancelled);
    assert!(app.is_locked());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restore_unlocks_owned_subscription() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc")?).await?;
    complete_focus(&app)?;
    harness.entitlement.set_owned_on_account(true);

    assert!(app.restore().await?);
    assert!(!app.is_locked());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entitled_user_is_never_locked() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    harness.entitlement.set_entitled(true);
    let app = harness.app(Arc::new(InMemoryKeyValueStore::new())).await;
    app.submit_tasks(&PlanRequest::parse("a\nb\nc")?).await?;

    let signals = complete_focus(&app)?;

    assert!(signals.iter().all(|signal| *signal == PaywallSignal::Unchanged));
    assert!(!app.is_locked());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_threshold_is_used() -> eyre::Result<()> {
    let harness = Harness::echoing(1);
    let config = AppConfig::default().with_paywall_threshold(1);
    let app = harness
        .app_with_config(Arc::new(InMemoryKeyValueStore::new()), config)
        .await;
    app.submit_tasks(&PlanRequest::parse("a\nb")?).await?;

    let first = focus_ids(&app)[0];
    assert_eq!(app.complete_task(first)?.paywall, PaywallSignal::Show);
    Ok(())
}
