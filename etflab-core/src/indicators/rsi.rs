//! Relative Strength Index (RSI), simple-average variant.
//!
//! Gains and losses are the day-over-day close deltas (losses as magnitudes).
//! avg_gain / avg_loss are plain means over the last `period` deltas.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: fewer than period + 1 closes → 50; avg_loss == 0 → 100.

/// Neutral value reported when the history is too short.
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi(closes: &[f64], period: usize) -> f64 {
    let n = closes.len();
    if period == 0 || n < period + 1 {
        return NEUTRAL_RSI;
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in closes[n - period - 1..].windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += change.abs();
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
