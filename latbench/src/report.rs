use latbench_common::{BenchError, Result};
use std::io::{self, Write};
use std::time::Duration;

use crate::config::{EMPHASIZED_PERCENTILES, PERCENTILES};
use crate::coordinator::AggregateResult;
use crate::percentile::percentile_duration;

const RULE: &str = "------------------------------------------------------";
const TABLE_HEADER: &str = " percentile |   overall   |   network   |     wait    ";
const TABLE_RULE: &str = "------------|-------------|-------------|-------------";

/// Whether emphasized text is highlighted with ANSI escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Ansi,
    Plain,
}

impl Style {
    fn emphasize(self, text: &str) -> String {
        match self {
            Style::Ansi => format!("\x1b[32;1m{text}\x1b[0m"),
            Style::Plain => text.to_string(),
        }
    }
}

fn output_error(e: io::Error) -> BenchError {
    BenchError::Output(e.to_string())
}

/// Print the tool banner and the latency definitions.
pub fn render_banner<W: Write>(out: &mut W, processors: usize) -> Result<()> {
    write_banner(out, processors).map_err(output_error)
}

fn write_banner<W: Write>(out: &mut W, processors: usize) -> io::Result<()> {
    writeln!(out, "latbench: statement latency benchmark")?;
    writeln!(out)?;
    writeln!(out, "This machine has {processors} processors")?;
    writeln!(out)?;
    writeln!(out, "Latency measurements:")?;
    writeln!(out, "  overall = time between start and end of method call")?;
    writeln!(out, "  network = time between start of send and end of receive")?;
    writeln!(out, "  wait    = time between end of send and start of receive")?;
    writeln!(out)
}

/// Announce the statement a batch is about to measure.
///
/// Flushed straight away so a long batch shows what it is running.
pub fn render_header<W: Write>(statement: &str, out: &mut W) -> Result<()> {
    write_header(statement, out).map_err(output_error)
}

fn write_header<W: Write>(statement: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, " {statement}")?;
    out.flush()
}

/// Print the summary and percentile table for a finished batch; follows
/// [`render_header`].
pub fn render<W: Write>(result: &AggregateResult, out: &mut W, style: Style) -> Result<()> {
    write_result(result, out, style).map_err(output_error)
}

fn write_result<W: Write>(result: &AggregateResult, out: &mut W, style: Style) -> io::Result<()> {
    let clients = if result.parallelism == 1 { "client" } else { "clients" };
    let tx = style.emphasize(&format!("{} tx/s", format_decimal(result.throughput())));
    writeln!(
        out,
        "   × {} runs × {} {clients} = {tx}",
        format_thousands(result.run_count as u64),
        result.parallelism,
    )?;
    writeln!(
        out,
        "    ({} requests in {:.1}s)",
        format_thousands(result.requests() as u64),
        result.elapsed.as_secs_f64(),
    )?;

    writeln!(out, "{RULE}")?;
    writeln!(out, "{TABLE_HEADER}")?;
    writeln!(out, "{TABLE_RULE}")?;
    for p in PERCENTILES {
        let fraction = p / 100.0;
        let cells = [&result.overall, &result.network, &result.wait]
            .map(|samples| percentile_duration(samples, fraction).unwrap_or_default())
            .map(|latency| format!("{:>11}", format_micros(latency)));
        let [overall, network, wait] = cells;

        let mut row = [format!("{p:5.1}%"), overall, network, wait];
        if EMPHASIZED_PERCENTILES.contains(&p) {
            row = row.map(|cell| style.emphasize(&cell));
        }
        writeln!(out, "     {} | {} | {} | {}", row[0], row[1], row[2], row[3])?;
    }
    writeln!(out)
}

/// Microseconds with thousands separators and one decimal, e.g. `1,234.5µs`.
pub fn format_micros(latency: Duration) -> String {
    format!("{}µs", format_decimal(latency.as_secs_f64() * 1_000_000.0))
}

/// `12345` → `12,345`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// One decimal place with thousands separators: `1234.56` → `1,234.6`.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.1}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let sign = if value < 0.0 && fixed != "0.0" { "-" } else { "" };
    match whole.parse::<u64>() {
        Ok(n) => format!("{sign}{}.{frac}", format_thousands(n)),
        Err(_) => format!("{sign}{fixed}"),
    }
}
