use latbench_common::{BenchError, Result};

/// Invocations per worker when `--times` is not given.
pub const DEFAULT_RUN_COUNT: usize = 10_000;

/// Largest parallelism level in the default sweep.
pub const DEFAULT_MAX_PARALLELISM: usize = 16;

/// Percentiles shown in every report, in percent.
pub const PERCENTILES: [f64; 16] = [
    0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 95.0, 98.0, 99.0, 99.5, 99.9, 100.0,
];

/// Rows highlighted in the percentile table.
pub const EMPHASIZED_PERCENTILES: [f64; 4] = [50.0, 90.0, 99.0, 99.9];

/// Powers of two from 1 up to [`DEFAULT_MAX_PARALLELISM`]: `1, 2, 4, 8, 16`.
pub fn default_parallels() -> Vec<usize> {
    std::iter::successors(Some(1usize), |n| Some(n * 2))
        .take_while(|&n| n <= DEFAULT_MAX_PARALLELISM)
        .collect()
}

/// What to benchmark and how hard.
///
/// Immutable once built. Parallelism levels are sorted ascending and
/// de-duplicated so the sweep always climbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    statements: Vec<String>,
    run_count: usize,
    parallels: Vec<usize>,
}

impl RunConfig {
    pub fn new(statements: Vec<String>, run_count: usize, mut parallels: Vec<usize>) -> Result<Self> {
        if run_count == 0 {
            return Err(BenchError::InvalidConfig("run count must be at least 1".to_string()));
        }
        if parallels.is_empty() {
            return Err(BenchError::InvalidConfig("at least one parallelism level is required".to_string()));
        }
        if parallels.contains(&0) {
            return Err(BenchError::InvalidConfig("parallelism levels must be at least 1".to_string()));
        }
        parallels.sort_unstable();
        parallels.dedup();
        if let Some(&widest) = parallels.last() {
            if widest.checked_mul(run_count).is_none() {
                return Err(BenchError::InvalidConfig(format!(
                    "{widest} clients × {run_count} runs is too many samples"
                )));
            }
        }
        Ok(Self { statements, run_count, parallels })
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn run_count(&self) -> usize {
        self.run_count
    }

    pub fn parallels(&self) -> &[usize] {
        &self.parallels
    }
}
