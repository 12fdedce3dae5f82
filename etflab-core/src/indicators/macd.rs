//! MACD-like triple with a damped signal line.
//!
//! DIF  = EMA(fast) - EMA(slow)
//! DEA  = DIF * damping   (fixed damping, not an EMA of DIF)
//! MACD = (DIF - DEA) * 2
//! Fewer closes than `slow`: all three are zero.

use serde::{Deserialize, Serialize};

use super::ema::ema;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacdTriple {
    pub dif: f64,
    pub dea: f64,
    pub macd: f64,
}

impl MacdTriple {
    /// DIF above DEA with a positive histogram.
    pub fn is_golden_cross(&self) -> bool {
        self.dif > self.dea && self.macd > 0.0
    }

    /// DIF below DEA with a negative histogram.
    pub fn is_dead_cross(&self) -> bool {
        self.dif < self.dea && self.macd < 0.0
    }
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, damping: f64) -> MacdTriple {
    if closes.len() < slow {
        return MacdTriple::default();
    }
    let dif = ema(closes, fast) - ema(closes, slow);
    let dea = dif * damping;
    MacdTriple {
        dif,
        dea,
        macd: (dif - dea) * 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 + i as f64).collect()
    }

    #[test]
    fn short_history_is_zero() {
        assert_eq!(macd(&ramp(25), 12, 26, 0.8), MacdTriple::default());
    }

    #[test]
    fn rising_series_has_positive_dif() {
        let m = macd(&ramp(30), 12, 26, 0.8);
        assert!(m.dif > 0.0);
        assert!(m.macd > 0.0);
        assert!(m.is_golden_cross());
    }

    #[test]
    fn damped_relations_hold() {
        let closes: Vec<f64> = (0..60).map(|i| 50.0 + (i as f64 * 0.3).sin() * 4.0).collect();
        let m = macd(&closes, 12, 26, 0.8);
        assert_approx(m.dea, m.dif * 0.8, DEFAULT_EPSILON);
        assert_approx(m.macd, (m.dif - m.dea) * 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn falling_series_is_dead_cross() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
        let m = macd(&closes, 12, 26, 0.8);
        assert!(m.dif < 0.0);
        assert!(m.is_dead_cross());
        assert!(!m.is_golden_cross());
    }
}
