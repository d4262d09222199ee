use latbench_client::ClientConfig;
use latbench_common::Result;
use tracing::debug;

use crate::connector::HttpSession;

/// Supplies statements when none are given on the command line.
pub trait DefaultOperations {
    fn default_operations(&self) -> Result<Vec<String>>;
}

/// A fixed list of statements.
#[derive(Debug, Clone, Default)]
pub struct StaticOperations(pub Vec<String>);

impl DefaultOperations for StaticOperations {
    fn default_operations(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Statements that run before the defaults so that the lookups have a node to find.
pub const SEED_STATEMENTS: [&str; 2] = [
    "CREATE CONSTRAINT ON (a:Thing) ASSERT a.foo IS UNIQUE",
    "MERGE (a:Thing {foo:'bar'}) RETURN id(a)",
];

/// Sizes of the `UNWIND range(...)` statements.
pub const UNWIND_SIZES: [u32; 4] = [0, 1, 10, 100];

/// Seeds the server with a single node, then benchmarks a mix of pure
/// computation and lookups against it.
#[derive(Debug, Clone)]
pub struct SeededOperations {
    config: ClientConfig,
}

impl SeededOperations {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Default statements given the seeded node id, if the server returned one.
    pub fn statements(node_id: Option<i64>) -> Vec<String> {
        let mut statements: Vec<String> = UNWIND_SIZES
            .iter()
            .map(|n| format!("UNWIND range(1, {n}) AS z RETURN z"))
            .collect();
        if let Some(id) = node_id {
            statements.push(format!("MATCH (a) WHERE id(a) = {id} RETURN a"));
        }
        statements.push("MATCH (a:Thing) WHERE a.foo = 'bar' RETURN a".to_string());
        statements
    }
}

impl DefaultOperations for SeededOperations {
    fn default_operations(&self) -> Result<Vec<String>> {
        let session = HttpSession::open(self.config.clone())?;
        let [constraint, merge] = SEED_STATEMENTS;
        session.block_on(session.client().run(constraint))?;
        let seeded = session.block_on(session.client().run(merge))?;

        let node_id = seeded
            .rows
            .first()
            .and_then(|row| row.first())
            .and_then(|value| value.as_i64());
        debug!(?node_id, "seeded default statements");
        Ok(Self::statements(node_id))
    }
}
