//! ETFLab CLI — batch analysis, single-history scoring, and report views.
//!
//! Commands:
//! - `analyze` — analyse every instrument of a snapshot and write a strategy report
//! - `score` — analyse one CSV price history and print the analysis JSON
//! - `show` — print one section of a stored report
//!
//! Logging goes to stderr through `env_logger` (default level `info`, override
//! with `RUST_LOG`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use etflab_core::{AnalysisPipeline, Instrument, RealtimeQuote};
use etflab_runner::{
    build_report, load_history_csv, load_report, load_snapshot, save_report, section_view,
    BatchRunner, RunConfig, Section, StrategyReport,
};

#[derive(Parser)]
#[command(name = "etflab", about = "ETFLab CLI — rule-based ETF technical analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse every instrument in a market snapshot and write a strategy report.
    Analyze {
        /// Snapshot JSON with `etfs[].historical` price histories.
        #[arg(long)]
        input: PathBuf,

        /// Where to write the report.
        #[arg(long, default_value = "strategy_report.json")]
        output: PathBuf,

        /// Run configuration TOML (lookback, parallel, analysis thresholds).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sessions of history to analyse per instrument. Overrides the config file.
        #[arg(long)]
        lookback: Option<usize>,

        /// Analyse instruments one at a time instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Analyse a single CSV price history and print the result as JSON.
    Score {
        /// CSV with header date,open,close,high,low,volume,amount,change_percent.
        #[arg(long)]
        history: PathBuf,

        /// Instrument code. Defaults to the file stem.
        #[arg(long)]
        code: Option<String>,

        /// Instrument display name. Defaults to the code.
        #[arg(long)]
        name: Option<String>,

        /// Run configuration TOML.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print one section of a stored report.
    Show {
        /// Report JSON written by `analyze`.
        #[arg(long)]
        report: PathBuf,

        /// summary, sentiment, signal, risks or indicators.
        #[arg(long, default_value = "summary")]
        section: Section,

        /// Only show this instrument.
        #[arg(long)]
        code: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            config,
            lookback,
            sequential,
        } => run_analyze(&input, &output, config.as_deref(), lookback, sequential),
        Commands::Score {
            history,
            code,
            name,
            config,
        } => run_score(&history, code, name, config.as_deref()),
        Commands::Show {
            report,
            section,
            code,
        } => run_show(&report, section, code.as_deref()),
    }
}

fn load_run_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load run config {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

fn run_analyze(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    lookback: Option<usize>,
    sequential: bool,
) -> Result<()> {
    let config = load_run_config(config_path)?.with_overrides(lookback, sequential);
    config.validate()?;

    let snapshot = load_snapshot(input)?;
    let runner = BatchRunner::new(config);
    let report = build_report(&runner, &snapshot, chrono::Utc::now())?;

    if report.analysis.is_empty() {
        bail!(
            "no instrument could be analysed ({} skipped)",
            report.failures.len()
        );
    }

    print_summary(&report);
    save_report(&report, output)?;
    println!("Report saved to: {}", output.display());
    Ok(())
}

fn run_score(
    history: &Path,
    code: Option<String>,
    name: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_run_config(config_path)?;
    let series = load_history_csv(history)?;

    let code = code.unwrap_or_else(|| {
        history
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "UNKNOWN".to_string())
    });
    let name = name.unwrap_or_else(|| code.clone());
    let instrument = Instrument::new(code, name);

    let quote = RealtimeQuote::from_series(&series);
    let window = series.window(config.lookback);
    let analysis = AnalysisPipeline::new(&config.analysis).analyze(&instrument, &window, &quote);

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn run_show(report_path: &Path, section: Section, code: Option<&str>) -> Result<()> {
    let report = load_report(report_path)?;
    if let Some(code) = code {
        if report.find(code).is_none() {
            log::warn!("instrument {code} is not in {}", report_path.display());
        }
    }
    let view = section_view(&report, section, code)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn print_summary(report: &StrategyReport) {
    println!();
    println!("=== Strategy Report ===");
    println!("Generated:      {}", report.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(captured) = &report.snapshot_updated_at {
        println!("Snapshot:       {captured}");
    }
    println!("Input hash:     {}", &report.input_hash[..report.input_hash.len().min(16)]);
    println!(
        "Instruments:    {} analysed, {} skipped",
        report.summary.total,
        report.failures.len()
    );
    println!(
        "Actions:        {} buy / {} hold / {} sell",
        report.summary.buy_count, report.summary.hold_count, report.summary.sell_count
    );
    println!();
    println!("--- Instruments ---");
    for a in &report.analysis {
        let primary = a.risks.primary();
        println!(
            "{:<8} {:<20} {:>8.3} {:>+6.2}%  {} {:>5.1} {:<16} {:<10} {:>3}%  [{}] {}",
            a.code,
            a.name,
            a.realtime.current,
            a.realtime.change_percent,
            a.sentiment.glyph,
            a.sentiment.score,
            a.sentiment.label,
            a.signal.action,
            a.signal.confidence,
            primary.level,
            primary.kind,
        );
    }
    for failure in &report.failures {
        println!("{:<8} skipped: {}", failure.code, failure.reason);
    }
    println!();
}
