//! BDD tests for batch analysis over a market snapshot.
//!
//! These tests verify:
//! - Every valid instrument is analysed, in snapshot order
//! - Invalid histories are skipped and reported without aborting the batch
//! - Parallel and sequential batches produce identical analyses
//! - Summary counts and input hash in the assembled report

use chrono::{DateTime, NaiveDate, Utc};
use etflab_core::{PricePoint, RealtimeQuote};
use etflab_runner::{
    build_report, BatchRunner, InstrumentData, MarketSnapshot, RunConfig,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn history(closes: &[f64], volumes: &[u64]) -> Vec<PricePoint> {
    let base = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: base + chrono::Duration::days(i as i64),
            open: close * 0.998,
            close,
            high: close * 1.01,
            low: close * 0.99,
            volume: volumes.get(i).copied().unwrap_or(200_000),
            amount: close * 200_000.0,
            change_percent: 0.0,
        })
        .collect()
}

fn etf(code: &str, name: &str, historical: Vec<PricePoint>) -> InstrumentData {
    InstrumentData {
        code: code.into(),
        name: name.into(),
        full_name: None,
        realtime: None,
        historical,
    }
}

fn rising(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.0 + i as f64 * 0.01).collect()
}

fn falling(n: usize) -> Vec<f64> {
    (0..n).map(|i| 2.0 - i as f64 * 0.015).collect()
}

fn choppy(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.5 + (i as f64 * 0.9).sin() * 0.02).collect()
}

fn snapshot() -> MarketSnapshot {
    MarketSnapshot {
        updated_at: Some("2025-03-14 15:00:00".into()),
        etfs: vec![
            etf("512480", "Semiconductor ETF", history(&rising(40), &[])),
            etf("512170", "Healthcare ETF", history(&falling(40), &[])),
            etf("515790", "Solar ETF", history(&choppy(40), &[])),
            etf("159825", "Agriculture ETF", Vec::new()),
        ],
    }
}

fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-14T07:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn bdd_scenario_invalid_instrument_is_skipped() {
    // GIVEN a snapshot where one instrument has no history
    let snapshot = snapshot();

    // WHEN the batch runs
    let outcome = BatchRunner::new(RunConfig::default()).run(&snapshot);

    // THEN the other three are analysed in snapshot order
    let codes: Vec<&str> = outcome.analyses.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["512480", "512170", "515790"]);

    // AND the empty one is reported as a failure
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].code, "159825");
    assert!(outcome.failures[0].reason.contains("empty"));
}

#[test]
fn bdd_scenario_unordered_history_is_skipped() {
    // GIVEN an instrument whose history repeats a date
    let mut points = history(&rising(10), &[]);
    points[5].date = points[4].date;
    let snapshot = MarketSnapshot {
        updated_at: None,
        etfs: vec![
            etf("A", "Broken", points),
            etf("B", "Fine", history(&rising(10), &[])),
        ],
    };

    // WHEN the batch runs
    let outcome = BatchRunner::new(RunConfig::default()).run(&snapshot);

    // THEN the broken instrument does not stop the batch
    assert_eq!(outcome.analyses.len(), 1);
    assert_eq!(outcome.analyses[0].code, "B");
    assert_eq!(outcome.failures[0].code, "A");
}

#[test]
fn bdd_scenario_parallel_matches_sequential() {
    // GIVEN a larger snapshot
    let mut snapshot = snapshot();
    for i in 0..24 {
        let closes: Vec<f64> = (0..45)
            .map(|d| 1.0 + ((d * (i + 3)) % 17) as f64 * 0.01)
            .collect();
        snapshot
            .etfs
            .push(etf(&format!("X{i:03}"), "Synthetic ETF", history(&closes, &[])));
    }

    // WHEN the batch runs both ways
    let parallel = BatchRunner::new(RunConfig::default()).run(&snapshot);
    let sequential = BatchRunner::new(RunConfig::default().with_overrides(None, true)).run(&snapshot);

    // THEN the outcomes are identical, order included
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.analyses.len(), 27);
}

#[test]
fn bdd_scenario_snapshot_quote_is_preferred() {
    // GIVEN an instrument carrying its own realtime quote
    let mut snapshot = snapshot();
    snapshot.etfs[0].realtime = Some(RealtimeQuote::from_snapshot(
        1.45, 1.40, 1.39, 1.46, 1.40, 350_000,
    ));

    // WHEN the batch runs
    let outcome = BatchRunner::new(RunConfig::default()).run(&snapshot);

    // THEN the snapshot quote is used as-is
    let record = &outcome.analyses[0];
    assert_eq!(record.realtime.current, 1.45);
    assert_eq!(record.realtime.change_percent, 4.32);

    // AND instruments without a quote derive one from their history
    let derived = &outcome.analyses[1];
    let last = snapshot.etfs[1].historical.last().unwrap().close;
    assert_eq!(derived.realtime.current, last);
}

#[test]
fn bdd_scenario_report_summary_counts() {
    // GIVEN the standard snapshot
    let snapshot = snapshot();
    let runner = BatchRunner::new(RunConfig::default());

    // WHEN the report is built
    let report = build_report(&runner, &snapshot, fixed_time()).unwrap();

    // THEN the summary partitions the analysed instruments
    let s = report.summary;
    assert_eq!(s.total, 3);
    assert_eq!(s.buy_count + s.hold_count + s.sell_count, s.total);

    // AND provenance is recorded
    assert_eq!(report.updated_at, fixed_time());
    assert_eq!(report.snapshot_updated_at.as_deref(), Some("2025-03-14 15:00:00"));
    assert_eq!(report.input_hash, snapshot.content_hash().unwrap());
    assert_eq!(report.failures.len(), 1);
}

#[test]
fn bdd_scenario_reports_are_deterministic() {
    // GIVEN the same snapshot and generation time
    let snapshot = snapshot();
    let runner = BatchRunner::new(RunConfig::default());

    // WHEN two reports are built
    let a = build_report(&runner, &snapshot, fixed_time()).unwrap();
    let b = build_report(&runner, &snapshot, fixed_time()).unwrap();

    // THEN they are identical
    assert_eq!(a, b);
}

#[test]
fn bdd_scenario_volume_surge_flows_through() {
    // GIVEN a history whose last session doubles the volume
    let mut volumes = vec![100_000; 30];
    volumes[29] = 200_000;
    let snapshot = MarketSnapshot {
        updated_at: None,
        etfs: vec![etf("V", "Volume ETF", history(&choppy(30), &volumes))],
    };

    // WHEN the batch runs
    let outcome = BatchRunner::new(RunConfig::default()).run(&snapshot);

    // THEN the volume change reflects the last two sessions
    assert_eq!(outcome.analyses[0].indicators.volume_change, 100.0);
}
