//! Bollinger Bands — SMA of the last `period` closes +/- multiplier * stddev.
//!
//! Uses population stddev (divide by N).
//! Fewer closes than `period`: all three bands are zero.

use serde::{Deserialize, Serialize};

use crate::rounding::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Distance from the middle band to either outer band.
    pub fn half_width(&self) -> f64 {
        self.upper - self.middle
    }

    /// Round for presentation while keeping the bands symmetric.
    ///
    /// The middle band and the half width are rounded separately and the outer
    /// bands rebuilt from them.
    pub fn rounded(&self, decimals: i32) -> Self {
        let middle = round_to(self.middle, decimals);
        let half = round_to(self.half_width(), decimals);
        Self {
            upper: round_to(middle + half, decimals),
            middle,
            lower: round_to(middle - half, decimals),
        }
    }
}

pub fn bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let n = closes.len();
    if period == 0 || n < period {
        return BollingerBands::default();
    }

    let window = &closes[n - period..];
    let middle = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|close| {
            let diff = close - middle;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;
    let stddev = variance.sqrt();

    BollingerBands {
        upper: middle + multiplier * stddev,
        middle,
        lower: middle - multiplier * stddev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn middle_is_sma() {
        let bb = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        assert_approx(bb.middle, 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn population_stddev() {
        // window 12,13,14: variance = (1 + 0 + 1) / 3
        let bb = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        let sigma = (2.0f64 / 3.0).sqrt();
        assert_approx(bb.upper, 13.0 + 2.0 * sigma, DEFAULT_EPSILON);
        assert_approx(bb.lower, 13.0 - 2.0 * sigma, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_price_zero_width() {
        let bb = bollinger(&[100.0; 20], 20, 2.0);
        assert_approx(bb.upper, 100.0, DEFAULT_EPSILON);
        assert_approx(bb.lower, 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_history_is_zero() {
        assert_eq!(bollinger(&[1.0; 19], 20, 2.0), BollingerBands::default());
    }

    #[test]
    fn rounding_keeps_symmetry() {
        let bb = BollingerBands {
            upper: 1.0008,
            middle: 1.0004,
            lower: 1.0,
        };
        let r = bb.rounded(3);
        assert_approx(r.upper - r.middle, r.middle - r.lower, 1e-9);
        assert_eq!(r.middle, 1.0);
    }
}
