use clap::{ArgAction, Parser};

use crate::config::{default_parallels, DEFAULT_RUN_COUNT};

/// Exit code for unknown options and malformed values.
pub const EXIT_USAGE: i32 = 1;

/// Exit code when a batch cannot be completed.
pub const EXIT_FAILURE: i32 = 2;

const ENVIRONMENT_HELP: &str = "\
Environment:
  LATBENCH_URI - base URI of the statement server, e.g. http://127.0.0.1:7687
  RUST_LOG     - log filter for diagnostics written to stderr (default: warn)";

/// Test performance of one or more statements against a statement server.
#[derive(Parser, Debug)]
#[command(name = "latbench", disable_help_flag = true, after_help = ENVIRONMENT_HELP)]
pub struct Args {
    /// Statements to benchmark; built-in defaults are used when none are given
    #[arg(value_name = "STATEMENT")]
    pub statements: Vec<String>,

    /// Number of times each client executes each statement
    #[arg(
        short = 'x',
        long = "times",
        value_name = "COUNT",
        default_value_t = DEFAULT_RUN_COUNT,
        value_parser = parse_positive,
    )]
    pub times: usize,

    /// Comma separated list of parallel client counts
    #[arg(
        short = 'p',
        long = "parallels",
        value_name = "VALUES",
        value_delimiter = ',',
        default_values_t = default_parallels(),
        value_parser = parse_positive,
    )]
    pub parallels: Vec<usize>,

    /// Do not highlight key figures with ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Display this help text
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    pub help: Option<bool>,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
