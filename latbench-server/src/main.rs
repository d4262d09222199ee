use clap::Parser;
use latbench_server::config::DEFAULT_ADDRESS;
use latbench_server::{Server, ServerConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "latbench-server", about = "Mock statement server for latbench")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    address: SocketAddr,

    /// Artificial service time per statement, in microseconds.
    #[arg(long, default_value_t = 0)]
    delay_us: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig {
        address: args.address,
        delay: Duration::from_micros(args.delay_us),
    };

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();

    // Print "Listening on <addr>" once the server signals it is bound.
    tokio::spawn(async move {
        if let Ok(addr) = ready_rx.await {
            println!("Listening on {}", addr);
        }
    });

    Server::new(config).run(ready_tx).await?;
    Ok(())
}
