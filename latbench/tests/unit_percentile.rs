use latbench::percentile::{percentile, percentile_duration};
use std::time::Duration;

#[test]
fn test_percentile_endpoints() {
    let values = [3.0, 5.0, 8.0, 13.0, 21.0];
    assert_eq!(percentile(&values, 0.0), Some(3.0));
    assert_eq!(percentile(&values, 1.0), Some(21.0));
}

#[test]
fn test_percentile_interpolates_between_ranks() {
    // index 1.5 → halfway between 20 and 30
    assert_eq!(percentile(&[10.0, 20.0, 30.0, 40.0], 0.5), Some(25.0));
}

#[test]
fn test_percentile_exact_rank() {
    // n=5, p=0.25 → index 1.0 exactly
    assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.25), Some(2.0));
}

#[test]
fn test_percentile_weights_nearer_neighbour() {
    // n=11, p=0.99 → index 9.9 → 0.1 * 90 + 0.9 * 100
    let values: Vec<f64> = (0..=10).map(|v| (v * 10) as f64).collect();
    let p99 = percentile(&values, 0.99).unwrap();
    assert!((p99 - 99.0).abs() < 1e-9, "p99 was {p99}");
}

#[test]
fn test_percentile_single_value() {
    for p in [0.0, 0.1, 0.5, 0.999, 1.0] {
        assert_eq!(percentile(&[42.0], p), Some(42.0), "p = {p}");
    }
}

#[test]
fn test_percentile_empty_is_none() {
    assert_eq!(percentile(&[], 0.5), None);
    assert_eq!(percentile_duration(&[], 0.5), None);
}

#[test]
fn test_percentile_clamps_fraction() {
    let values = [1.0, 2.0];
    assert_eq!(percentile(&values, -0.5), Some(1.0));
    assert_eq!(percentile(&values, 1.5), Some(2.0));
}

#[test]
fn test_percentile_duration_matches_float_estimator() {
    let durations: Vec<Duration> = [10, 20, 30, 40].iter().map(|&us| Duration::from_micros(us)).collect();
    let p50 = percentile_duration(&durations, 0.5).unwrap();
    let diff = p50.as_secs_f64() - 25e-6;
    assert!(diff.abs() < 1e-12, "p50 was {p50:?}");

    let near = |got: Option<Duration>, want: Duration| {
        let got = got.unwrap();
        got.max(want) - got.min(want) <= Duration::from_nanos(1)
    };
    assert!(near(percentile_duration(&durations, 0.0), Duration::from_micros(10)));
    assert!(near(percentile_duration(&durations, 1.0), Duration::from_micros(40)));
}

#[test]
fn test_percentile_duration_agrees_with_float_estimator_on_every_row() {
    let durations: Vec<Duration> = (1..=37u64).map(|n| Duration::from_micros(n * n * 13)).collect();
    let secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();

    for p in [0.0, 0.1, 0.5, 0.9, 0.95, 0.99, 0.995, 0.999, 1.0] {
        let expected = Duration::from_secs_f64(percentile(&secs, p).unwrap());
        assert_eq!(percentile_duration(&durations, p), Some(expected), "p = {p}");
    }
}
