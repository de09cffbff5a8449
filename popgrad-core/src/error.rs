use thiserror::Error;

/// Custom error type for the PopGrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum PopGradError {
    #[error("Shape mismatch: expected population of size {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Invalid matrix specification: {reason}")]
    InvalidMatrixSpec { reason: String },

    #[error("Cannot create an empty population in operation {operation}")]
    EmptyPopulation { operation: String },

    #[error("Invalid initialisation parameters: {0}")]
    InvalidInitialization(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PopGradError {
    /// Shorthand used by every operation that compares two population sizes.
    pub(crate) fn shape_mismatch(expected: usize, actual: usize, operation: &str) -> Self {
        PopGradError::ShapeMismatch {
            expected,
            actual,
            operation: operation.to_string(),
        }
    }
}
