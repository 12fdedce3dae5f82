//! ETFLab Runner — batch analysis, reports, and persistence around `etflab-core`.
//!
//! This crate provides:
//! - Market snapshot (JSON) and price history (CSV) loading
//! - TOML run configuration wrapping the analysis thresholds
//! - Batch analysis over many instruments, optionally on the rayon pool
//! - Strategy reports with summary counts, input hash, and generation time
//! - JSON export/import with schema versioning and read-only section views

pub mod batch;
pub mod config;
pub mod export;
pub mod input;
pub mod report;

pub use batch::{BatchFailure, BatchOutcome, BatchRunner};
pub use config::{RunConfig, RunConfigError, DEFAULT_LOOKBACK};
pub use export::{export_json, import_json, load_report, save_report, section_view, Section};
pub use input::{
    load_history_csv, load_snapshot, suspect_sessions, InstrumentData, LoadError, MarketSnapshot,
};
pub use report::{build_report, ReportSummary, StrategyReport, SCHEMA_VERSION};
