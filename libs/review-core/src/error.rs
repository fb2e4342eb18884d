//! Error types for review-core.

use thiserror::Error;

/// Result type alias using AlgorithmError.
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Errors raised by the scheduling layer.
#[derive(Debug, Error)]
pub enum AlgorithmError {
    #[error("unknown algorithm type: {0}")]
    UnknownAlgorithm(String),
}
