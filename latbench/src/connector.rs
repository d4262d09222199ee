use latbench_client::{Client, ClientConfig};
use latbench_common::{BenchError, LatencySample, Result};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// One isolated connection to the system under test.
///
/// A session is created on the coordinator thread and then moved onto the
/// worker thread that owns it for the rest of the batch.
pub trait Session: Send {
    /// Execute `statement` once and report how long it took.
    fn execute(&mut self, statement: &str) -> Result<LatencySample>;
}

/// Opens sessions; shared by reference across the coordinator's threads.
pub trait Connector: Sync {
    type Session: Session;

    fn connect(&self) -> Result<Self::Session>;
}

/// Connects workers to a statement server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    config: ClientConfig,
}

impl HttpConnector {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl Connector for HttpConnector {
    type Session = HttpSession;

    fn connect(&self) -> Result<HttpSession> {
        HttpSession::open(self.config.clone())
    }
}

/// An HTTP session with its own client and its own single-threaded runtime,
/// so nothing is shared with other workers.
///
/// Opening a session calls the health endpoint, which leaves a live
/// connection in the client's pool before any statement is timed.
pub struct HttpSession {
    runtime: Runtime,
    client: Client,
}

impl HttpSession {
    pub fn open(config: ClientConfig) -> Result<Self> {
        let runtime = current_thread_runtime()?;
        let client = Client::new(config)?;
        runtime.block_on(client.health())?;
        debug!(session = %client.session_id(), "session connected");
        Ok(Self { runtime, client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Block on an arbitrary client call inside this session's runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

impl Session for HttpSession {
    fn execute(&mut self, statement: &str) -> Result<LatencySample> {
        let timed = self.runtime.block_on(self.client.run_timed(statement))?;
        Ok(timed.latency)
    }
}

fn current_thread_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BenchError::Runtime(e.to_string()))
}
