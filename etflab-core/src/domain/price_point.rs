//! PricePoint — one trading session of price/volume history.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Daily price/volume record for a single instrument.
///
/// Numeric fields missing from the source, left blank, or null deserialize as zero;
/// the date is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub open: f64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub close: f64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub high: f64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub low: f64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub volume: u64,
    /// Traded value for the session.
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub change_percent: f64,
}

impl PricePoint {
    /// Basic OHLC sanity check: high >= low and both bracket open/close.
    pub fn is_sane(&self) -> bool {
        if [self.open, self.close, self.high, self.low]
            .iter()
            .any(|v| !v.is_finite())
        {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// Absent, blank (CSV) and null (JSON) cells all read as zero.
fn blank_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
