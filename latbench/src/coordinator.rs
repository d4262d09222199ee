use latbench_common::{BenchError, LatencySample, Result};
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::connector::Connector;
use crate::report::{self, Style};
use crate::worker::Worker;

/// Everything measured for one statement at one parallelism level.
///
/// The three latency vectors are sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub statement: String,
    pub parallelism: usize,
    pub run_count: usize,
    /// Wall clock from the first worker start to the last worker join.
    pub elapsed: Duration,
    pub overall: Vec<Duration>,
    pub network: Vec<Duration>,
    pub wait: Vec<Duration>,
}

impl AggregateResult {
    /// Total number of requests issued across all workers.
    pub fn requests(&self) -> usize {
        self.parallelism.saturating_mul(self.run_count)
    }

    pub fn sample_count(&self) -> usize {
        self.overall.len()
    }

    /// Requests per second over the whole batch.
    pub fn throughput(&self) -> f64 {
        self.requests() as f64 / self.elapsed.as_secs_f64()
    }
}

/// Run `statement` on `parallelism` workers, `run_count` times each, and
/// aggregate the samples once every worker has finished.
///
/// Sessions are opened before the clock starts. Each worker writes into its
/// own `run_count`-long slice of a shared arena, so no locking is needed.
/// If any worker fails, the batch fails with the first error in worker order.
pub fn run_all<C: Connector>(
    connector: &C,
    parallelism: usize,
    run_count: usize,
    statement: &str,
) -> Result<AggregateResult> {
    if parallelism == 0 {
        return Err(BenchError::InvalidConfig("parallelism must be at least 1".to_string()));
    }
    if run_count == 0 {
        return Err(BenchError::InvalidConfig("run count must be at least 1".to_string()));
    }
    let total = parallelism.checked_mul(run_count).ok_or_else(|| {
        BenchError::InvalidConfig(format!("{parallelism} clients × {run_count} runs does not fit in memory"))
    })?;
    let mut arena: Vec<Option<LatencySample>> = Vec::new();
    arena
        .try_reserve_exact(total)
        .map_err(|e| BenchError::InvalidConfig(format!("cannot hold {total} samples: {e}")))?;
    arena.resize(total, None);

    debug!(statement, parallelism, run_count, "connecting workers");
    let sessions = (0..parallelism)
        .map(|_| connector.connect())
        .collect::<Result<Vec<_>>>()?;

    let start = Instant::now();
    let outcomes: Vec<Result<()>> = thread::scope(|scope| {
        let handles: Vec<_> = sessions
            .into_iter()
            .zip(arena.chunks_mut(run_count))
            .enumerate()
            .map(|(id, (session, slots))| {
                let worker = Worker::new(id, session, statement);
                thread::Builder::new()
                    .name(format!("latbench-worker-{id}"))
                    .spawn_scoped(scope, move || worker.run(slots))
            })
            .collect();

        // Join everything before looking at any outcome.
        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| match handle {
                Ok(handle) => handle
                    .join()
                    .unwrap_or(Err(BenchError::WorkerPanicked { worker: id })),
                Err(e) => Err(BenchError::Runtime(format!("failed to spawn worker {id}: {e}"))),
            })
            .collect()
    });
    let elapsed = start.elapsed();

    for outcome in outcomes {
        outcome?;
    }

    let samples: Vec<LatencySample> = arena.into_iter().flatten().collect();
    if samples.len() != total {
        return Err(BenchError::Runtime(format!("{} of {total} samples recorded", samples.len())));
    }

    let mut overall: Vec<Duration> = samples.iter().map(|s| s.overall).collect();
    let mut network: Vec<Duration> = samples.iter().map(|s| s.network).collect();
    let mut wait: Vec<Duration> = samples.iter().map(|s| s.wait).collect();
    overall.sort_unstable();
    network.sort_unstable();
    wait.sort_unstable();

    Ok(AggregateResult {
        statement: statement.to_string(),
        parallelism,
        run_count,
        elapsed,
        overall,
        network,
        wait,
    })
}

/// Progress through a sweep. Every batch is announced before it runs and
/// reported once it has finished.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    Started { statement: &'a str, parallelism: usize },
    Finished(&'a AggregateResult),
}

/// Sweeps every configured statement across every parallelism level.
pub struct Benchmark<C> {
    config: RunConfig,
    connector: C,
}

impl<C: Connector> Benchmark<C> {
    pub fn new(config: RunConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Run each batch in turn, handing `on_event` a `Started` event before it
    /// and a `Finished` event after it. Stops at the first failure.
    pub fn run_events<F>(&self, mut on_event: F) -> Result<()>
    where
        F: FnMut(BatchEvent<'_>) -> Result<()>,
    {
        for statement in self.config.statements() {
            for &parallelism in self.config.parallels() {
                on_event(BatchEvent::Started { statement, parallelism })?;
                let result = run_all(&self.connector, parallelism, self.config.run_count(), statement)?;
                info!(
                    statement = %result.statement,
                    parallelism,
                    tx_per_second = result.throughput(),
                    "batch complete"
                );
                on_event(BatchEvent::Finished(&result))?;
            }
        }
        Ok(())
    }

    /// Like [`Benchmark::run_events`], seeing only finished batches.
    pub fn run_with<F>(&self, mut on_result: F) -> Result<()>
    where
        F: FnMut(&AggregateResult) -> Result<()>,
    {
        self.run_events(|event| match event {
            BatchEvent::Started { .. } => Ok(()),
            BatchEvent::Finished(result) => on_result(result),
        })
    }

    /// Run the sweep, writing each batch's header to `out` as it starts and
    /// its report as soon as it finishes.
    pub fn run<W: Write>(&self, out: &mut W, style: Style) -> Result<()> {
        self.run_events(|event| match event {
            BatchEvent::Started { statement, .. } => report::render_header(statement, out),
            BatchEvent::Finished(result) => report::render(result, out, style),
        })
    }
}
