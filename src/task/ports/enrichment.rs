//! Port for the external service that turns raw text into task records.

use crate::task::domain::{EnrichedTask, EnrichmentRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for enrichment calls.
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;

/// External enrichment contract.
///
/// Implementations return records in priority order, at most ten of them.
#[async_trait]
pub trait TaskEnrichmentService: Send + Sync {
    /// Enriches the raw task texts in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichmentError::NotConfigured`] when the service has no
    /// endpoint or credentials, and another [`EnrichmentError`] variant for
    /// any failed, malformed, or empty response.
    async fn enrich(&self, request: EnrichmentRequest) -> EnrichmentResult<Vec<EnrichedTask>>;
}

/// Errors returned by enrichment service implementations.
#[derive(Debug, Clone, Error)]
pub enum EnrichmentError {
    /// The service is missing required configuration.
    #[error("enrichment service is not configured: {0}")]
    NotConfigured(String),

    /// The service could not be reached or answered with a failure.
    #[error("enrichment request failed: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with something that is not a task list.
    #[error("malformed enrichment response: {0}")]
    Malformed(String),

    /// The service answered with no tasks.
    #[error("enrichment returned no tasks")]
    Empty,
}

impl EnrichmentError {
    /// Wraps a transport or service failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns whether retrying the same input may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        !matches!(self, Self::NotConfigured(_))
    }
}
