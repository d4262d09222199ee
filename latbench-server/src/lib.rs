use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use latbench_common::{ErrorResponse, StatementRequest, StatementResponse, SESSION_HEADER};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

pub mod config;
pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub delay: Duration,
    /// Number of statements answered successfully since startup.
    pub statements_served: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(delay: Duration) -> Self {
        Self { delay, statements_served: Arc::new(AtomicU64::new(0)) }
    }

    pub fn served(&self) -> u64 {
        self.statements_served.load(Ordering::Relaxed)
    }
}

/// Mock statement server
///
/// Accepts any statement text and answers after the configured delay. It
/// exists so the benchmark harness can be driven end to end without a real
/// database behind it.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(config.delay);
        Self { config, state }
    }

    /// Handle on the server's shared state; clones see the live counter.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Get the server's configured address
    pub fn address(&self) -> SocketAddr {
        self.config.address
    }

    /// Create the application router with the given state
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/statement", post(handle_statement))
            .route("/health", get(handle_health))
            .with_state(state)
    }

    /// Run the server, signalling `ready_tx` with the bound address once accepting connections
    pub async fn run(self, ready_tx: tokio::sync::oneshot::Sender<SocketAddr>) -> Result<(), Box<dyn std::error::Error>> {
        let app = Self::create_router(self.state);
        let listener = tokio::net::TcpListener::bind(self.config.address).await?;
        let local_addr = listener.local_addr()?;
        ready_tx.send(local_addr).ok();
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

/// Rows the mock returns for `statement`.
///
/// A `MERGE ... RETURN id(...)` yields a single id row so that callers
/// seeding a node can read its id back; everything else yields no rows.
pub fn rows_for(statement: &str) -> Vec<Vec<serde_json::Value>> {
    let upper = statement.trim_start().to_ascii_uppercase();
    if upper.starts_with("MERGE") && upper.contains("RETURN ID(") {
        vec![vec![json!(0)]]
    } else {
        Vec::new()
    }
}

/// Handler for POST /statement. Answers with the statement's rows after the configured delay.
pub async fn handle_statement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<StatementRequest>,
) -> Response {
    if request.statement.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Statement must not be empty");
    }

    let session = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    trace!(session, statement = %request.statement, "statement received");

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    state.statements_served.fetch_add(1, Ordering::Relaxed);
    let rows = rows_for(&request.statement);
    (StatusCode::OK, Json(StatementResponse { rows })).into_response()
}

/// Handler for GET /health
pub async fn handle_health() -> StatusCode {
    StatusCode::OK
}
