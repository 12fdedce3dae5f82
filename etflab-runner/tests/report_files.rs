//! File round-trips for snapshots, histories, and reports.

use std::path::Path;

use chrono::{DateTime, Utc};
use etflab_runner::{
    build_report, import_json, load_history_csv, load_report, load_snapshot, save_report,
    section_view, BatchRunner, RunConfig, Section, StrategyReport,
};

const SNAPSHOT: &str = r#"{
  "updated_at": "2025-03-14 15:00:00",
  "etfs": [
    {
      "code": "510500",
      "name": "CSI 500 ETF",
      "realtime": {"current": 5.62, "open": 5.55, "pre_close": 5.5, "high": 5.64, "low": 5.53, "volume": 880000},
      "historical": [
        {"date": "2025-03-10", "open": 5.41, "close": 5.44, "high": 5.47, "low": 5.39, "volume": 610000},
        {"date": "2025-03-11", "open": 5.44, "close": 5.47, "high": 5.50, "low": 5.42, "volume": 640000},
        {"date": "2025-03-12", "open": 5.47, "close": 5.45, "high": 5.49, "low": 5.43, "volume": 590000},
        {"date": "2025-03-13", "open": 5.45, "close": 5.50, "high": 5.52, "low": 5.44, "volume": 700000},
        {"date": "2025-03-14", "open": 5.55, "close": 5.62, "high": 5.64, "low": 5.53, "volume": 880000}
      ],
      "news": []
    },
    {
      "code": "588000",
      "name": "STAR 50 ETF",
      "historical": [
        {"date": "2025-03-13", "open": 1.02, "close": 1.01, "high": 1.03, "low": 1.00, "volume": 900000},
        {"date": "2025-03-14", "open": 1.01, "close": 0.98, "high": 1.01, "low": 0.97, "volume": 1300000}
      ]
    }
  ]
}"#;

fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-14T07:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn report_from(path: &Path) -> StrategyReport {
    let snapshot = load_snapshot(path).unwrap();
    build_report(&BatchRunner::new(RunConfig::default()), &snapshot, fixed_time()).unwrap()
}

#[test]
fn snapshot_to_report_to_disk_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etf_data.json");
    std::fs::write(&input, SNAPSHOT).unwrap();

    let report = report_from(&input);
    assert_eq!(report.analysis.len(), 2);
    assert_eq!(report.analysis[0].realtime.change_percent, 2.18);

    let output = dir.path().join("out").join("strategy_report.json");
    save_report(&report, &output).unwrap();
    let loaded = load_report(&output).unwrap();

    assert_eq!(loaded.summary, report.summary);
    assert_eq!(loaded.input_hash, report.input_hash);
    assert_eq!(loaded.updated_at, report.updated_at);
    assert_eq!(loaded.analysis.len(), report.analysis.len());
    for (a, b) in loaded.analysis.iter().zip(&report.analysis) {
        assert_eq!(a.code, b.code);
        assert_eq!(a.signal, b.signal);
        assert_eq!(a.sentiment.label, b.sentiment.label);
        assert_eq!(a.risks.len(), b.risks.len());
    }
}

#[test]
fn report_json_has_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etf_data.json");
    std::fs::write(&input, SNAPSHOT).unwrap();
    let report = report_from(&input);

    let value = serde_json::to_value(&report).unwrap();
    for key in ["schema_version", "updated_at", "input_hash", "analysis", "summary"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    // Nothing failed, so the failures list is omitted.
    assert!(value.get("failures").is_none());
    assert_eq!(value["summary"]["total"], 2);
}

#[test]
fn newer_report_version_is_rejected_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etf_data.json");
    std::fs::write(&input, SNAPSHOT).unwrap();
    let mut report = report_from(&input);
    report.schema_version += 1;

    let path = dir.path().join("future.json");
    save_report(&report, &path).unwrap();
    let err = load_report(&path).unwrap_err();
    assert!(format!("{err:#}").contains("unsupported schema version"));
}

#[test]
fn malformed_report_is_an_error() {
    assert!(import_json("{\"schema_version\": 1}").is_err());
    assert!(import_json("not json").is_err());
}

#[test]
fn section_views_filter_by_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etf_data.json");
    std::fs::write(&input, SNAPSHOT).unwrap();
    let report = report_from(&input);

    let summary = section_view(&report, Section::Summary, Some("510500")).unwrap();
    assert_eq!(summary["summary"]["total"], 2);

    let risks = section_view(&report, Section::Risks, None).unwrap();
    assert_eq!(risks.as_array().unwrap().len(), 2);
    assert!(risks[0]["risks"].as_array().map_or(false, |r| !r.is_empty()));

    let signal = section_view(&report, Section::Signal, Some("588000")).unwrap();
    let rows = signal.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["code"], "588000");
    assert!(rows[0]["signal"]["action"].is_string());

    let none = section_view(&report, Section::Indicators, Some("000000")).unwrap();
    assert!(none.as_array().unwrap().is_empty());
}

#[test]
fn section_views_do_not_change_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("etf_data.json");
    std::fs::write(&input, SNAPSHOT).unwrap();
    let report = report_from(&input);
    let before = report.clone();

    for section in Section::ALL {
        section_view(&report, section, None).unwrap();
    }
    assert_eq!(report, before);
}

#[test]
fn csv_history_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("510500.csv");
    std::fs::write(
        &path,
        "date,open,close,high,low,volume,amount,change_percent\n\
         2025-03-13,5.45,5.50,5.52,5.44,700000,3850000,0.92\n\
         2025-03-14,5.55,5.62,5.64,5.53,880000,4945600,2.18\n",
    )
    .unwrap();

    let series = load_history_csv(&path).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.last().change_percent, 2.18);
}
