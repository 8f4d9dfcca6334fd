//! Bitetask: a three-slot focus board fed by an AI planning step.
//!
//! Raw task text is turned into estimated, prioritised tasks by an
//! enrichment service and merged into a board that keeps at most three
//! tasks in focus. Completing tasks eventually raises a subscription
//! paywall.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, providers)
//!
//! # Modules
//!
//! - [`task`]: Task board, list transitions, and enrichment orchestration
//! - [`onboarding`]: First-run flow and plan bookkeeping
//! - [`entitlement`]: Subscription provider and the completion paywall
//! - [`storage`]: Key-value persistence for JSON blobs
//! - [`config`]: Runtime configuration
//! - [`app`]: The service graph built at startup

pub mod app;
pub mod config;
pub mod entitlement;
pub mod onboarding;
pub mod storage;
pub mod task;
