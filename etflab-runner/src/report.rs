//! Strategy report: the batch output with summary counts and provenance.

use chrono::{DateTime, Utc};
use etflab_core::{InstrumentAnalysis, TradeAction};
use serde::{Deserialize, Serialize};

use crate::batch::{BatchFailure, BatchOutcome, BatchRunner};
use crate::input::{LoadError, MarketSnapshot};

/// Current report schema version. Bump when the persisted layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Action tallies over the analysed instruments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    /// `buy` and `strong_buy`.
    pub buy_count: usize,
    pub hold_count: usize,
    /// `sell` and `reduce`.
    pub sell_count: usize,
}

impl ReportSummary {
    pub fn from_analyses(analyses: &[InstrumentAnalysis]) -> Self {
        analyses
            .iter()
            .fold(Self::default(), |mut acc, analysis| {
                acc.total += 1;
                match analysis.signal.action {
                    TradeAction::StrongBuy | TradeAction::Buy => acc.buy_count += 1,
                    TradeAction::Hold => acc.hold_count += 1,
                    TradeAction::Reduce | TradeAction::Sell => acc.sell_count += 1,
                }
                acc
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub schema_version: u32,
    /// When the report was generated.
    pub updated_at: DateTime<Utc>,
    /// Capture time of the input snapshot, when it carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_updated_at: Option<String>,
    /// BLAKE3 hex digest of the input snapshot.
    pub input_hash: String,
    pub analysis: Vec<InstrumentAnalysis>,
    pub summary: ReportSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BatchFailure>,
}

impl StrategyReport {
    /// Assemble a report from a finished batch.
    ///
    /// The generation time is passed in so identical inputs can produce identical
    /// reports.
    pub fn new(
        outcome: BatchOutcome,
        input_hash: String,
        snapshot_updated_at: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let summary = ReportSummary::from_analyses(&outcome.analyses);
        Self {
            schema_version: SCHEMA_VERSION,
            updated_at,
            snapshot_updated_at,
            input_hash,
            analysis: outcome.analyses,
            summary,
            failures: outcome.failures,
        }
    }

    pub fn find(&self, code: &str) -> Option<&InstrumentAnalysis> {
        self.analysis.iter().find(|a| a.code == code)
    }
}

/// Hash the snapshot, run the batch, and assemble the report.
pub fn build_report(
    runner: &BatchRunner,
    snapshot: &MarketSnapshot,
    updated_at: DateTime<Utc>,
) -> Result<StrategyReport, LoadError> {
    let input_hash = snapshot.content_hash()?;
    let outcome = runner.run(snapshot);
    Ok(StrategyReport::new(
        outcome,
        input_hash,
        snapshot.updated_at.clone(),
        updated_at,
    ))
}
