#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Error types for the load driver

use thiserror::Error;

/// Result type alias for load test operations
pub type Result<T> = std::result::Result<T, LoadTestError>;

/// Errors that can occur while configuring or running a load test
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadTestError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Concurrency level above the safety limit
    #[error("concurrency level {0} exceeds maximum {1}")]
    ConcurrencyTooHigh(usize, usize),

    /// Fewer requests than concurrent workers at some level
    #[error("{requests} requests per level cannot keep {concurrency} workers busy")]
    TooFewRequests { requests: usize, concurrency: usize },

    /// Endpoint argument not in `name=path` form
    #[error("invalid endpoint '{0}': expected NAME=/path")]
    InvalidEndpoint(String),

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    ClientBuildFailed(String),

    /// A worker task failed to complete
    #[error("load worker failed: {0}")]
    WorkerFailed(String),

    /// Failed to write the report or measurement log
    #[error("failed to write {0}: {1}")]
    WriteFailed(String, String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for LoadTestError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for LoadTestError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
