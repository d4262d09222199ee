use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the base URI of the statement server.
pub const URI_ENV_VAR: &str = "LATBENCH_URI";

/// Base URI used when `LATBENCH_URI` is not set.
pub const DEFAULT_URI: &str = "http://127.0.0.1:7687";

/// Header carrying the per-session id on every statement request.
pub const SESSION_HEADER: &str = "x-session-id";

/// Error types for latbench operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {0}: {1}")]
    HttpError(u16, String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Failed to write report: {0}")]
    Output(String),

    #[error("Worker {worker} failed at iteration {iteration}: {source}")]
    WorkerFailed {
        worker: usize,
        iteration: usize,
        #[source]
        source: Box<BenchError>,
    },

    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

/// JSON error envelope returned by the server for all error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request body for `POST /statement`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRequest {
    pub statement: String,
}

/// Success body for `POST /statement`: one inner vector per result row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementResponse {
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// Latency of a single statement invocation.
///
/// `network + wait` need not add up to `overall`: overall also covers local
/// encoding and decoding work on the caller's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    /// Time between start and end of the method call.
    pub overall: Duration,
    /// Time between start of send and end of receive.
    pub network: Duration,
    /// Time between end of send and start of receive.
    pub wait: Duration,
}

impl LatencySample {
    pub fn new(overall: Duration, network: Duration, wait: Duration) -> Self {
        Self { overall, network, wait }
    }
}

/// Result type for latbench operations
pub type Result<T> = std::result::Result<T, BenchError>;
