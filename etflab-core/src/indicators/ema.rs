//! Exponential Moving Average (EMA), final value only.
//!
//! Seed: SMA of the first `period` closes.
//! Recursive: ema = (close - ema) * 2/(period+1) + ema
//! Fewer closes than `period`: degenerates to the last close.

/// EMA of `closes` evaluated at the last element.
pub fn ema(closes: &[f64], period: usize) -> f64 {
    let n = closes.len();
    if n == 0 {
        return 0.0;
    }
    if period == 0 || n < period {
        return closes[n - 1];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed: f64 = closes[..period].iter().sum::<f64>() / period as f64;

    closes[period..]
        .iter()
        .fold(seed, |prev, &close| (close - prev) * multiplier + prev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_3_known_values() {
        // multiplier = 0.5, seed = SMA(10,11,12) = 11.0
        // 13 -> 12.0, 14 -> 13.0
        assert_approx(ema(&[10.0, 11.0, 12.0, 13.0, 14.0], 3), 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_seed_only() {
        assert_approx(ema(&[10.0, 11.0, 12.0], 3), 11.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_period_1_tracks_close() {
        assert_approx(ema(&[100.0, 200.0, 300.0], 1), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_short_history_is_last_close() {
        assert_eq!(ema(&[5.0, 6.0], 12), 6.0);
    }

    #[test]
    fn ema_lags_a_rising_series() {
        let closes: Vec<f64> = (0..40).map(|i| 10.0 + i as f64).collect();
        let value = ema(&closes, 12);
        assert!(value < 49.0);
        assert!(value > 40.0);
    }
}
