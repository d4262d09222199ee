pub mod cli;
pub mod config;
pub mod connector;
pub mod coordinator;
pub mod defaults;
pub mod percentile;
pub mod report;
pub mod worker;
