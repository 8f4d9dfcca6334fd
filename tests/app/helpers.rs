//! Shared helpers for application tests.

use std::sync::Arc;

use bitetask::{
    app::{AppParts, FocusApp},
    config::AppConfig,
    entitlement::adapters::InMemoryEntitlementProvider,
    storage::ports::KeyValueStore,
    task::{adapters::memory::ScriptedEnrichmentService, domain::TaskId},
};
use mockable::DefaultClock;
use tracing_subscriber::EnvFilter;

/// Product sold by the test entitlement provider.
pub const PRODUCT: &str = "bitetask.pro.monthly";

/// Application wired with in-memory collaborators.
pub type TestApp = FocusApp<ScriptedEnrichmentService, InMemoryEntitlementProvider, DefaultClock>;

/// Collaborators kept by a test to script and inspect the app.
pub struct Harness {
    /// Scripted enrichment responses.
    pub enrichment: ScriptedEnrichmentService,
    /// Entitlement provider handle.
    pub entitlement: InMemoryEntitlementProvider,
}

impl Harness {
    /// Creates a harness whose enrichment echoes `batches` submissions.
    pub fn echoing(batches: usize) -> Self {
        init_tracing();
        let enrichment = (0..batches).fold(ScriptedEnrichmentService::new(), |service, _| {
            service.echo(15)
        });
        Self {
            enrichment,
            entitlement: InMemoryEntitlementProvider::new([PRODUCT]),
        }
    }

    /// Builds an app over `store` with the default configuration.
    pub async fn app<K>(&self, store: Arc<K>) -> TestApp
    where
        K: KeyValueStore + 'static,
    {
        self.app_with_config(store, AppConfig::default()).await
    }

    /// Builds an app over `store` with `config`.
    pub async fn app_with_config<K>(&self, store: Arc<K>, config: AppConfig) -> TestApp
    where
        K: KeyValueStore + 'static,
    {
        FocusApp::init(AppParts {
            store,
            enrichment: Arc::new(self.enrichment.clone()),
            entitlement: Arc::new(self.entitlement.clone()),
            clock: Arc::new(DefaultClock),
            config,
        })
        .await
    }
}

/// Routes `tracing` output to the test writer, filtered by `RUST_LOG`.
pub fn init_tracing() {
    // Another test in this binary may have installed it already.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .unwrap_or_default();
}

/// Returns the ids of the focus tasks in display order.
pub fn focus_ids(app: &TestApp) -> Vec<TaskId> {
    app.board().top_tasks().iter().map(|task| task.id()).collect()
}
