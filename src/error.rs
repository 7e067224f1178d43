//! Error types for Baldosa operations

use thiserror::Error;

/// Result type for Baldosa operations
pub type Result<T> = std::result::Result<T, BaldosaError>;

/// Errors that can occur during Baldosa operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BaldosaError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Size mismatch between operands
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// The parallel multiplier failed to execute
    #[error("Execution error: {0}")]
    Execution(String),
}
