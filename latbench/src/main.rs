use clap::Parser;
use latbench::cli::{Args, EXIT_FAILURE, EXIT_USAGE};
use latbench::config::RunConfig;
use latbench::connector::HttpConnector;
use latbench::coordinator::Benchmark;
use latbench::defaults::{DefaultOperations, SeededOperations};
use latbench::report::{self, Style};
use latbench_client::ClientConfig;
use std::io::{IsTerminal, Write};
use std::process;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        // Help goes to stdout and is not an error.
        let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
        e.print().ok();
        process::exit(code);
    });

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let style = if !args.no_color && stdout.is_terminal() { Style::Ansi } else { Style::Plain };
    let mut out = stdout.lock();

    let processors = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    if let Err(e) = report::render_banner(&mut out, processors) {
        eprintln!("{e}");
        process::exit(EXIT_FAILURE);
    }

    let client_config = ClientConfig::from_env();

    let statements = if args.statements.is_empty() {
        writeln!(out, "No statements specified, using defaults").ok();
        SeededOperations::new(client_config.clone())
            .default_operations()
            .unwrap_or_else(|e| {
                eprintln!("Failed to prepare default statements: {e}");
                process::exit(EXIT_FAILURE);
            })
    } else {
        args.statements
    };

    let config = RunConfig::new(statements, args.times, args.parallels).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(EXIT_USAGE);
    });

    let benchmark = Benchmark::new(config, HttpConnector::new(client_config));
    if let Err(e) = benchmark.run(&mut out, style) {
        eprintln!("Benchmark failed: {e}");
        process::exit(EXIT_FAILURE);
    }
}
