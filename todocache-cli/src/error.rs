//! CLI error types.

use thiserror::Error;

use todocache::app::AppError;
use todocache::todo::ValidationError;
use todocache::TodoError;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Application failed to start or shut down.
    #[error("application error: {0}")]
    App(#[from] AppError),

    /// A todo operation failed.
    #[error("todo operation failed: {0}")]
    Todo(#[from] TodoError),

    /// Demo input failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}
