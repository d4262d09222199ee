use std::net::SocketAddr;
use std::time::Duration;

/// Address the mock server binds to when none is given.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:7687";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    /// Artificial service time added to every statement.
    pub delay: Duration,
}
