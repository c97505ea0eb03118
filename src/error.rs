//! Error types for the up-sample / filter / interpolate engine.

use thiserror::Error;

use crate::types::DType;

#[derive(Debug, Error)]
pub enum UflError {
    /// Missing or out-of-range configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Element type does not match the engine precision.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: DType, actual: DType },

    /// Output buffer length disagrees with the query length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad job file: {0}")]
    Config(#[from] serde_json::Error),
}

pub type UflResult<T> = Result<T, UflError>;
