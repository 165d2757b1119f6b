//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required field was missing when creating a task
    #[error("Validation error: {0}")]
    Validation(String),

    /// A committed ordering would break the permutation/identity invariant.
    /// Signals a programming defect rather than a recoverable condition.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
