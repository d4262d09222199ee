use std::time::Duration;

/// Neighbouring indices and fractional rank for percentile `p` over `len`
/// sorted samples.
fn rank(len: usize, p: f64) -> (usize, usize, f64) {
    let idx = p.clamp(0.0, 1.0) * (len - 1) as f64;
    (idx.floor() as usize, idx.ceil() as usize, idx)
}

/// Linearly interpolated percentile of ascending-sorted `values`.
///
/// `p` is a fraction in `[0, 1]` (values outside are clamped). The rank is
/// `p * (n - 1)`; when it falls between two samples the result is the
/// weighted mean of both neighbours. Input is not sorted here.
/// Returns `None` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let (lo, hi, idx) = rank(values.len(), p);
    if lo == hi {
        return Some(values[lo]);
    }
    Some(values[lo] * (hi as f64 - idx) + values[hi] * (idx - lo as f64))
}

/// [`percentile`] over durations, interpolated in seconds.
pub fn percentile_duration(values: &[Duration], p: f64) -> Option<Duration> {
    let secs: Vec<f64> = values.iter().map(Duration::as_secs_f64).collect();
    percentile(&secs, p).map(Duration::from_secs_f64)
}
