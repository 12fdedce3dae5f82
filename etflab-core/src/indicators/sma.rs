//! Simple Moving Average (SMA) of the most recent closes.
//!
//! Falls back to the last close when the history is shorter than the period.

/// Mean of the last `period` closes, or the last close when `closes.len() < period`.
///
/// Returns 0.0 for an empty slice.
pub fn sma(closes: &[f64], period: usize) -> f64 {
    let n = closes.len();
    if n == 0 {
        return 0.0;
    }
    if period == 0 || n < period {
        return closes[n - 1];
    }
    let sum: f64 = closes[n - period..].iter().sum();
    sum / period as f64
}
