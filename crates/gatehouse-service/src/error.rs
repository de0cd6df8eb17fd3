//! # Service Error Type
//!
//! Workflow-level errors. Graceful conditions (lot full, unknown plate,
//! failed ticket update) are **not** errors but outcome variants, so
//! everything here is genuinely fatal to the current workflow.

use thiserror::Error;

use gatehouse_core::{CoreError, PromptError, StoreError};

/// Errors that abort a parking workflow.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Fare computation rejected its input.
    #[error(transparent)]
    Fare(#[from] CoreError),

    /// Operator input could not be read.
    #[error("prompt failed: {0}")]
    Prompt(#[from] PromptError),

    /// A storage collaborator failed.
    #[error("storage failure: {0}")]
    Store(#[source] StoreError),
}

/// Result type for workflow operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
