use latbench_common::{BenchError, LatencySample, Result};
use tracing::{debug, warn};

use crate::connector::Session;

/// Runs one statement repeatedly on a single session.
pub struct Worker<'a, S> {
    id: usize,
    session: S,
    statement: &'a str,
}

impl<'a, S: Session> Worker<'a, S> {
    pub fn new(id: usize, session: S, statement: &'a str) -> Self {
        Self { id, session, statement }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Execute the statement once per slot, in order, writing each sample
    /// into its slot.
    ///
    /// Stops at the first failed invocation; that slot and every later one
    /// stay `None`.
    pub fn run(mut self, slots: &mut [Option<LatencySample>]) -> Result<()> {
        debug!(worker = self.id, runs = slots.len(), "worker started");
        for (iteration, slot) in slots.iter_mut().enumerate() {
            match self.session.execute(self.statement) {
                Ok(sample) => *slot = Some(sample),
                Err(e) => {
                    warn!(worker = self.id, iteration, error = %e, "worker stopped");
                    return Err(BenchError::WorkerFailed {
                        worker: self.id,
                        iteration,
                        source: Box::new(e),
                    });
                }
            }
        }
        debug!(worker = self.id, "worker finished");
        Ok(())
    }
}
