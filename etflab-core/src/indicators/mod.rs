//! Technical indicators over a [`PriceSeries`](crate::domain::PriceSeries).
//!
//! Each submodule is a pure function over a close (or volume) slice returning the
//! value at the most recent session. [`IndicatorEngine`] assembles them into an
//! [`IndicatorSet`].

pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use bollinger::BollingerBands;
pub use engine::{IndicatorConfig, IndicatorEngine};
pub use macd::MacdTriple;

use serde::{Deserialize, Serialize};

use crate::rounding::round_to;

/// Moving-average windows behind `ma5`, `ma10` and `ma20`.
pub const MA_SHORT: usize = 5;
pub const MA_MEDIUM: usize = 10;
pub const MA_LONG: usize = 20;

/// Decimal places for price levels (moving averages, Bollinger bands).
pub const PRICE_DECIMALS: i32 = 3;
/// Decimal places for percentages and RSI.
pub const PERCENT_DECIMALS: i32 = 2;
/// Decimal places for MACD components.
pub const MACD_DECIMALS: i32 = 4;

/// Derived indicators for the most recent session of a series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSet {
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub rsi: f64,
    pub macd: MacdTriple,
    pub bollinger: BollingerBands,
    pub volume_change: f64,
}

impl IndicatorSet {
    pub fn rounded(&self) -> Self {
        Self {
            ma5: round_to(self.ma5, PRICE_DECIMALS),
            ma10: round_to(self.ma10, PRICE_DECIMALS),
            ma20: round_to(self.ma20, PRICE_DECIMALS),
            rsi: round_to(self.rsi, PERCENT_DECIMALS),
            macd: MacdTriple {
                dif: round_to(self.macd.dif, MACD_DECIMALS),
                dea: round_to(self.macd.dea, MACD_DECIMALS),
                macd: round_to(self.macd.macd, MACD_DECIMALS),
            },
            bollinger: self.bollinger.rounded(PRICE_DECIMALS),
            volume_change: round_to(self.volume_change, PERCENT_DECIMALS),
        }
    }

    /// `current > ma5 > ma10 > ma20`.
    pub fn is_bullish_alignment(&self, current: f64) -> bool {
        current > self.ma5 && self.ma5 > self.ma10 && self.ma10 > self.ma20
    }

    /// `current < ma5 < ma10 < ma20`.
    pub fn is_bearish_alignment(&self, current: f64) -> bool {
        current < self.ma5 && self.ma5 < self.ma10 && self.ma10 < self.ma20
    }
}

/// Build a series from close prices for testing.
///
/// One session per calendar day from 2024-01-02; open = previous close,
/// high/low = max/min(open, close) +/- 0.01, volume = 1000.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::PriceSeries {
    use crate::domain::{PricePoint, PriceSeries};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PricePoint {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                close,
                high: open.max(close) + 0.01,
                low: open.min(close) - 0.01,
                volume: 1000,
                amount: close * 1000.0,
                change_percent: 0.0,
            }
        })
        .collect();
    PriceSeries::new(points).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
