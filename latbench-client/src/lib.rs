use latbench_common::{
    BenchError, ErrorResponse, LatencySample, Result, StatementRequest, StatementResponse,
    DEFAULT_URI, SESSION_HEADER, URI_ENV_VAR,
};
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// latbench client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URI of the statement server, e.g. `http://127.0.0.1:7687`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: DEFAULT_TIMEOUT }
    }

    /// Read the base URI from `LATBENCH_URI`, falling back to [`DEFAULT_URI`].
    pub fn from_env() -> Self {
        let base_url = std::env::var(URI_ENV_VAR).unwrap_or_else(|_| DEFAULT_URI.to_string());
        Self::new(base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URI)
    }
}

/// A statement result paired with the latency observed while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub latency: LatencySample,
}

/// latbench Client
///
/// One client is one session: it owns its own connection pool and sends the
/// same session id with every request.
pub struct Client {
    pub config: ClientConfig,
    session_id: Uuid,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BenchError::NetworkError(e.to_string()))?;
        let session_id = Uuid::new_v4();
        debug!(%session_id, base_url = %config.base_url, "opened session");
        Ok(Self { config, session_id, http_client })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Build the statement endpoint URL from the configured base.
    pub fn build_statement_url(&self) -> String {
        format!("{}/statement", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the health endpoint URL from the configured base.
    pub fn build_health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }

    /// Execute a statement and return its rows.
    pub async fn run(&self, statement: &str) -> Result<StatementResponse> {
        self.run_timed(statement).await.map(|timed| timed.value)
    }

    /// Execute a statement, measuring overall, network and wait latency.
    ///
    /// `wait` runs from the moment the request is handed to the HTTP stack
    /// until the response head arrives; the stack does not report when the
    /// request body finished writing, so upload time is part of it.
    pub async fn run_timed(&self, statement: &str) -> Result<Timed<StatementResponse>> {
        let started = Instant::now();

        let request = self
            .http_client
            .post(self.build_statement_url())
            .header(SESSION_HEADER, self.session_id.to_string())
            .json(&StatementRequest { statement: statement.to_string() });

        let sent_at = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| BenchError::NetworkError(e.to_string()))?;
        let head_at = Instant::now();

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(status, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BenchError::NetworkError(e.to_string()))?;
        let received_at = Instant::now();

        let value: StatementResponse = serde_json::from_slice(&bytes)
            .map_err(|e| BenchError::InvalidResponse(e.to_string()))?;

        let latency = LatencySample::new(
            started.elapsed(),
            received_at - sent_at,
            head_at - sent_at,
        );
        Ok(Timed { value, latency })
    }

    /// Returns `Ok(())` when the server answers its health endpoint.
    pub async fn health(&self) -> Result<()> {
        let response = self
            .http_client
            .get(self.build_health_url())
            .send()
            .await
            .map_err(|e| BenchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(status, response).await);
        }
        Ok(())
    }
}

async fn parse_error_response(status: reqwest::StatusCode, response: reqwest::Response) -> BenchError {
    let error_msg = response
        .json::<ErrorResponse>()
        .await
        .map(|r| r.error)
        .unwrap_or_else(|_| format!("Server returned status: {}", status));

    BenchError::HttpError(status.as_u16(), error_msg)
}
