//! Session-over-session volume change, in percent.

/// `(v[-1] - v[-2]) / v[-2] * 100`; zero with fewer than two sessions or a zero
/// previous volume.
pub fn volume_change(volumes: &[u64]) -> f64 {
    let n = volumes.len();
    if n < 2 || volumes[n - 2] == 0 {
        return 0.0;
    }
    let last = volumes[n - 1] as f64;
    let prev = volumes[n - 2] as f64;
    (last - prev) / prev * 100.0
}
