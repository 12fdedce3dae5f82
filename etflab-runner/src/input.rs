//! Snapshot and history loading for the runner.
//!
//! Two input shapes are accepted:
//! - a market snapshot JSON holding several instruments with their recent history
//!   and an optional realtime quote,
//! - a single-instrument CSV history with header
//!   `date,open,close,high,low,volume,amount,change_percent`.
//!
//! Fields the analysis does not use (news, precomputed indicators) are ignored.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use etflab_core::{Instrument, PricePoint, PriceSeries, RealtimeQuote, SeriesError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the input layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV history: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid price series: {0}")]
    Series(#[from] SeriesError),
}

/// Quotes and histories for a set of instruments, as captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Capture time as written by the producer; carried through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub etfs: Vec<InstrumentData>,
}

/// One instrument inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentData {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime: Option<RealtimeQuote>,
    #[serde(default)]
    pub historical: Vec<PricePoint>,
}

impl InstrumentData {
    pub fn instrument(&self) -> Instrument {
        Instrument::new(self.code.clone(), self.name.clone())
    }

    /// Validated full history. Sessions with an inconsistent OHLC range are kept
    /// but logged.
    pub fn series(&self) -> Result<PriceSeries, SeriesError> {
        warn_suspect_sessions(&self.code, &self.historical);
        PriceSeries::new(self.historical.clone())
    }

    /// The snapshot's realtime quote, or one derived from the last two sessions.
    pub fn quote(&self, series: &PriceSeries) -> RealtimeQuote {
        match &self.realtime {
            Some(quote) => quote.clone(),
            None => RealtimeQuote::from_series(series),
        }
    }
}

impl MarketSnapshot {
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// BLAKE3 hex digest of the snapshot's canonical JSON form.
    ///
    /// Only fields the runner understands take part, so two files that differ in
    /// ignored fields (news, precomputed indicators) hash identically.
    pub fn content_hash(&self) -> Result<String, LoadError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    pub fn find(&self, code: &str) -> Option<&InstrumentData> {
        self.etfs.iter().find(|etf| etf.code == code)
    }
}

/// Dates of sessions whose OHLC values fail [`PricePoint::is_sane`].
pub fn suspect_sessions(points: &[PricePoint]) -> Vec<NaiveDate> {
    points
        .iter()
        .filter(|p| !p.is_sane())
        .map(|p| p.date)
        .collect()
}

fn warn_suspect_sessions(source: &str, points: &[PricePoint]) {
    let suspect = suspect_sessions(points);
    if let Some(first) = suspect.first() {
        log::warn!(
            "{source}: {} session(s) with inconsistent OHLC values (first on {first})",
            suspect.len()
        );
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Load a market snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<MarketSnapshot, LoadError> {
    let snapshot = MarketSnapshot::from_json_str(&read_file(path)?)?;
    log::info!(
        "loaded snapshot {} with {} instrument(s)",
        path.display(),
        snapshot.etfs.len()
    );
    Ok(snapshot)
}

/// Parse a CSV history from any reader. Rows must already be in date order;
/// blank numeric cells read as zero.
pub fn read_history_csv<R: Read>(reader: R) -> Result<PriceSeries, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let points = rdr
        .deserialize::<PricePoint>()
        .collect::<Result<Vec<_>, _>>()?;
    warn_suspect_sessions("csv history", &points);
    Ok(PriceSeries::new(points)?)
}

/// Load a single-instrument CSV history from disk.
pub fn load_history_csv(path: &Path) -> Result<PriceSeries, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let series = read_history_csv(file)?;
    log::info!(
        "loaded {} session(s) from {} ({} to {})",
        series.len(),
        path.display(),
        series.first_date(),
        series.last_date()
    );
    Ok(series)
}
