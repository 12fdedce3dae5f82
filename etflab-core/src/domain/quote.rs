//! RealtimeQuote — the most recent price snapshot for an instrument.

use serde::{Deserialize, Serialize};

use super::PriceSeries;
use crate::rounding::round_to;

/// Single most-recent snapshot. May be newer than the last session in the history.
///
/// When a serialized quote omits `change_percent` it is derived from `current` and
/// `pre_close`, exactly as [`RealtimeQuote::from_snapshot`] does.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawQuote")]
pub struct RealtimeQuote {
    pub current: f64,
    pub open: f64,
    pub pre_close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub change_percent: f64,
}

/// Wire form of a quote; every field optional.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawQuote {
    current: f64,
    open: f64,
    pre_close: f64,
    high: f64,
    low: f64,
    volume: u64,
    change_percent: Option<f64>,
}

impl From<RawQuote> for RealtimeQuote {
    fn from(raw: RawQuote) -> Self {
        let derived = Self::from_snapshot(
            raw.current,
            raw.open,
            raw.pre_close,
            raw.high,
            raw.low,
            raw.volume,
        );
        match raw.change_percent {
            Some(change_percent) => Self {
                change_percent,
                ..derived
            },
            None => derived,
        }
    }
}

impl RealtimeQuote {
    /// Build a quote from raw snapshot fields, deriving `change_percent`.
    ///
    /// A non-positive previous close yields a change of zero.
    pub fn from_snapshot(
        current: f64,
        open: f64,
        pre_close: f64,
        high: f64,
        low: f64,
        volume: u64,
    ) -> Self {
        Self {
            current,
            open,
            pre_close,
            high,
            low,
            volume,
            change_percent: change_percent(current, pre_close),
        }
    }

    /// Derive a quote from the last session of a history when no live snapshot exists.
    ///
    /// The previous session's close serves as `pre_close`; a single-session history
    /// uses the session's own open.
    pub fn from_series(series: &PriceSeries) -> Self {
        let last = series.last();
        let pre_close = series.previous().map_or(last.open, |p| p.close);
        Self::from_snapshot(last.close, last.open, pre_close, last.high, last.low, last.volume)
    }

    /// Absolute move against the previous close, 4 decimals.
    pub fn change(&self) -> f64 {
        if self.pre_close <= 0.0 {
            return 0.0;
        }
        round_to(self.current - self.pre_close, 4)
    }
}

fn change_percent(current: f64, pre_close: f64) -> f64 {
    if pre_close <= 0.0 {
        return 0.0;
    }
    round_to((current - pre_close) / pre_close * 100.0, 2)
}
