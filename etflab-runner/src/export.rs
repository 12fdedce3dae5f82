//! Report persistence and read-only section views.
//!
//! Reports are stored as pretty JSON with a `schema_version` field. Reports
//! written by a newer version are rejected on load. Section views pull one part
//! of a stored report out for display without recomputing anything.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use etflab_core::InstrumentAnalysis;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::report::{StrategyReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &StrategyReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize StrategyReport to JSON")
}

/// Deserialize a report, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<StrategyReport> {
    let report: StrategyReport =
        serde_json::from_str(json).context("failed to deserialize StrategyReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

pub fn save_report(report: &StrategyReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report dir: {}", parent.display()))?;
    }
    let json = export_json(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    log::info!("report written to {}", path.display());
    Ok(())
}

pub fn load_report(path: &Path) -> Result<StrategyReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report: {}", path.display()))?;
    import_json(&json).with_context(|| format!("invalid report: {}", path.display()))
}

// ─── Section views ──────────────────────────────────────────────────

/// A read-only slice of a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Sentiment,
    Signal,
    Risks,
    Indicators,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Sentiment,
        Section::Signal,
        Section::Risks,
        Section::Indicators,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Sentiment => "sentiment",
            Section::Signal => "signal",
            Section::Risks => "risks",
            Section::Indicators => "indicators",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown section '{0}' (expected summary, sentiment, signal, risks or indicators)")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Extract one section of `report`.
///
/// `summary` is report-wide and ignores `code`. The per-instrument sections
/// return an array of `{code, name, <section>}` objects, restricted to `code`
/// when one is given.
pub fn section_view(report: &StrategyReport, section: Section, code: Option<&str>) -> Result<Value> {
    let extract: fn(&InstrumentAnalysis) -> serde_json::Result<Value> = match section {
        Section::Summary => {
            return Ok(json!({
                "updated_at": report.updated_at,
                "summary": report.summary,
            }))
        }
        Section::Sentiment => |a: &InstrumentAnalysis| serde_json::to_value(&a.sentiment),
        Section::Signal => |a: &InstrumentAnalysis| serde_json::to_value(&a.signal),
        Section::Risks => |a: &InstrumentAnalysis| serde_json::to_value(&a.risks),
        Section::Indicators => |a: &InstrumentAnalysis| serde_json::to_value(&a.indicators),
    };

    let mut rows = Vec::new();
    for analysis in report
        .analysis
        .iter()
        .filter(|a| code.map_or(true, |c| a.code == c))
    {
        let mut row = Map::new();
        row.insert("code".into(), Value::String(analysis.code.clone()));
        row.insert("name".into(), Value::String(analysis.name.clone()));
        row.insert(section.as_str().into(), extract(analysis)?);
        rows.push(Value::Object(row));
    }
    Ok(Value::Array(rows))
}
