//! IndicatorEngine — price history in, fixed-shape [`IndicatorSet`] out.
//!
//! Every formula runs on full-precision closes; rounding is applied once, to the
//! emitted set. Short histories degrade to the documented fallbacks instead of
//! failing, so the engine always returns a complete set.

use serde::{Deserialize, Serialize};

use super::{bollinger, macd, rsi, sma, volume, IndicatorSet, MA_LONG, MA_MEDIUM, MA_SHORT};
use crate::domain::PriceSeries;

/// Periods and constants used by the indicator formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    /// DEA = DIF * damping.
    pub dea_damping: f64,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            dea_damping: 0.8,
            bollinger_period: 20,
            bollinger_width: 2.0,
        }
    }
}

impl IndicatorConfig {
    /// Longest history any formula looks at.
    pub fn max_lookback(&self) -> usize {
        [
            self.rsi_period + 1,
            self.macd_slow,
            self.bollinger_period,
            MA_LONG,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// Indicators at full precision, as the formulas produce them.
    pub fn compute_exact(&self, series: &PriceSeries) -> IndicatorSet {
        let closes = series.closes();
        let volumes = series.volumes();
        let cfg = &self.config;

        IndicatorSet {
            ma5: sma::sma(&closes, MA_SHORT),
            ma10: sma::sma(&closes, MA_MEDIUM),
            ma20: sma::sma(&closes, MA_LONG),
            rsi: rsi::rsi(&closes, cfg.rsi_period),
            macd: macd::macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.dea_damping),
            bollinger: bollinger::bollinger(&closes, cfg.bollinger_period, cfg.bollinger_width),
            volume_change: volume::volume_change(&volumes),
        }
    }

    /// Indicators rounded for presentation.
    pub fn compute(&self, series: &PriceSeries) -> IndicatorSet {
        let set = self.compute_exact(series).rounded();
        log::trace!(
            "indicators over {} sessions ending {}: rsi={} ma5={}",
            series.len(),
            series.last_date(),
            set.rsi,
            set.ma5
        );
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn ramp_scenario() {
        let closes: Vec<f64> = (10..30).map(f64::from).collect();
        let set = IndicatorEngine::default().compute(&make_series(&closes));

        assert_eq!(set.ma5, 27.0);
        assert_eq!(set.ma10, 24.5);
        assert_eq!(set.ma20, 19.5);
        assert_eq!(set.rsi, 100.0);
        assert_eq!(set.bollinger.middle, 19.5);
        assert_eq!(set.bollinger.upper, 31.033);
        assert_eq!(set.bollinger.lower, 7.967);
        assert_eq!(set.volume_change, 0.0);
        // 20 sessions is below the slow EMA period.
        assert_eq!(set.macd.dif, 0.0);
        assert_eq!(set.macd.dea, 0.0);
        assert_eq!(set.macd.macd, 0.0);
    }

    #[test]
    fn extended_ramp_has_positive_dif() {
        let closes: Vec<f64> = (10..40).map(f64::from).collect();
        let set = IndicatorEngine::default().compute(&make_series(&closes));
        assert!(set.macd.dif > 0.0);
        assert!(set.macd.dif > set.macd.dea);
    }

    #[test]
    fn single_session_degrades_to_fallbacks() {
        let set = IndicatorEngine::default().compute(&make_series(&[1.234]));
        assert_eq!(set.ma5, 1.234);
        assert_eq!(set.ma10, 1.234);
        assert_eq!(set.ma20, 1.234);
        assert_eq!(set.rsi, 50.0);
        assert_eq!(set.macd, Default::default());
        assert_eq!(set.bollinger, Default::default());
        assert_eq!(set.volume_change, 0.0);
    }

    #[test]
    fn rounding_is_presentation_only() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 1.0 + (i as f64 * 0.37).sin() * 0.0123456)
            .collect();
        let series = make_series(&closes);
        let engine = IndicatorEngine::default();
        let exact = engine.compute_exact(&series);
        let shown = engine.compute(&series);

        assert_approx(shown.ma5, exact.ma5, 0.0005 + DEFAULT_EPSILON);
        assert_approx(shown.rsi, exact.rsi, 0.005 + DEFAULT_EPSILON);
        assert_approx(shown.macd.dif, exact.macd.dif, 0.00005 + DEFAULT_EPSILON);
        // DEA is derived from the exact DIF, not from the rounded one.
        assert_approx(exact.macd.dea, exact.macd.dif * 0.8, DEFAULT_EPSILON);
    }

    #[test]
    fn max_lookback_is_slow_ema() {
        assert_eq!(IndicatorConfig::default().max_lookback(), 26);
    }

    #[test]
    fn max_lookback_covers_long_average() {
        let config = IndicatorConfig {
            macd_fast: 3,
            macd_slow: 6,
            rsi_period: 5,
            bollinger_period: 10,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.max_lookback(), MA_LONG);
    }
}
