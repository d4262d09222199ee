use latbench::coordinator::AggregateResult;
use latbench::report::{format_decimal, format_micros, format_thousands, render, render_banner, render_header, Style};
use std::time::Duration;

fn micros(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|&us| Duration::from_micros(us)).collect()
}

fn result(parallelism: usize, run_count: usize, elapsed: Duration) -> AggregateResult {
    AggregateResult {
        statement: "UNWIND range(1, 10) AS z RETURN z".to_string(),
        parallelism,
        run_count,
        elapsed,
        overall: micros(&[10, 20, 30, 40]),
        network: micros(&[8, 16, 24, 32]),
        wait: micros(&[1_000, 2_000, 3_000, 4_000]),
    }
}

fn rendered(result: &AggregateResult, style: Style) -> String {
    let mut out = Vec::new();
    render_header(&result.statement, &mut out).unwrap();
    render(result, &mut out, style).unwrap();
    String::from_utf8(out).unwrap()
}

// --- formatting helpers ---

#[test]
fn test_format_thousands() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1_000), "1,000");
    assert_eq!(format_thousands(160_000), "160,000");
    assert_eq!(format_thousands(1_234_567), "1,234,567");
}

#[test]
fn test_format_decimal() {
    assert_eq!(format_decimal(0.0), "0.0");
    assert_eq!(format_decimal(0.04), "0.0");
    assert_eq!(format_decimal(999.96), "1,000.0");
    assert_eq!(format_decimal(1234.56), "1,234.6");
    assert_eq!(format_decimal(-1234.5), "-1,234.5");
}

#[test]
fn test_format_micros() {
    assert_eq!(format_micros(Duration::from_nanos(1_500)), "1.5µs");
    assert_eq!(format_micros(Duration::from_micros(1_500)), "1,500.0µs");
    assert_eq!(format_micros(Duration::from_millis(2)), "2,000.0µs");
    assert_eq!(format_micros(Duration::ZERO), "0.0µs");
}

// --- render ---

#[test]
fn test_render_summary_lines() {
    let text = rendered(&result(2, 5, Duration::from_secs(2)), Style::Plain);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[1], " UNWIND range(1, 10) AS z RETURN z");
    assert_eq!(lines[2], "   × 5 runs × 2 clients = 5.0 tx/s");
    assert_eq!(lines[3], "    (10 requests in 2.0s)");
}

#[test]
fn test_header_is_separate_from_the_report() {
    let mut header = Vec::new();
    render_header("RETURN 1", &mut header).unwrap();
    assert_eq!(
        String::from_utf8(header).unwrap(),
        "------------------------------------------------------\n RETURN 1\n"
    );

    let mut body = Vec::new();
    render(&result(2, 5, Duration::from_secs(2)), &mut body, Style::Plain).unwrap();
    let body = String::from_utf8(body).unwrap();
    assert!(body.starts_with("   × 5 runs × 2 clients = "));
    assert!(!body.contains("UNWIND"));
}

#[test]
fn test_render_single_client_with_thousands() {
    let text = rendered(&result(1, 10_000, Duration::from_millis(4_000)), Style::Plain);
    assert!(text.contains("   × 10,000 runs × 1 client = 2,500.0 tx/s\n"));
    assert!(text.contains("    (10,000 requests in 4.0s)\n"));
}

#[test]
fn test_render_percentile_table() {
    let text = rendered(&result(1, 4, Duration::from_secs(1)), Style::Plain);

    assert!(text.contains(" percentile |   overall   |   network   |     wait    \n"));
    assert!(text.contains("------------|-------------|-------------|-------------\n"));

    let rows: Vec<&str> = text.lines().filter(|l| l.ends_with("µs")).collect();
    assert_eq!(rows.len(), 16);
    assert_eq!(rows[0], "       0.0% |      10.0µs |       8.0µs |   1,000.0µs");
    assert_eq!(rows[5], "      50.0% |      25.0µs |      20.0µs |   2,500.0µs");
    assert_eq!(rows[15], "     100.0% |      40.0µs |      32.0µs |   4,000.0µs");
    assert!(text.ends_with("\n\n"), "a blank line closes every batch");
}

#[test]
fn test_render_plain_has_no_escapes() {
    let text = rendered(&result(1, 4, Duration::from_secs(1)), Style::Plain);
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_render_ansi_emphasizes_key_rows() {
    let text = rendered(&result(1, 4, Duration::from_secs(1)), Style::Ansi);

    let emphasized: Vec<&str> = text
        .lines()
        .filter(|l| l.ends_with("µs\x1b[0m"))
        .collect();
    assert_eq!(emphasized.len(), 4);
    for (line, p) in emphasized.iter().zip([" 50.0%", " 90.0%", " 99.0%", " 99.9%"]) {
        assert!(line.contains(&format!("\x1b[32;1m{p}\x1b[0m")), "{line:?}");
    }
    assert!(text.contains("= \x1b[32;1m4.0 tx/s\x1b[0m"));
}

#[test]
fn test_render_banner() {
    let mut out = Vec::new();
    render_banner(&mut out, 8).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("This machine has 8 processors"));
    assert!(text.contains("  overall = time between start and end of method call"));
    assert!(text.contains("  network = time between start of send and end of receive"));
    assert!(text.contains("  wait    = time between end of send and start of receive"));
}

#[test]
fn test_render_reports_write_failure() {
    struct Broken;
    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = render(&result(1, 4, Duration::from_secs(1)), &mut Broken, Style::Plain).unwrap_err();
    assert_eq!(err, latbench_common::BenchError::Output("pipe closed".to_string()));
}
