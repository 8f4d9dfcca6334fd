//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Raw input contained no non-blank lines.
    #[error("task input must contain at least one non-blank line")]
    EmptyInput,

    /// An enriched record carried an empty task text.
    #[error("enriched task text must not be empty")]
    EmptyTaskText,
}

