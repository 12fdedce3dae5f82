//! Batch analysis over every instrument of a snapshot.
//!
//! Instruments are independent, so the batch can run on the rayon pool. Results
//! keep snapshot order either way, and an instrument whose history fails
//! validation is recorded as a failure without stopping the others.

use std::sync::Arc;

use etflab_core::{AnalysisPipeline, Analyzer, InstrumentAnalysis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::input::{InstrumentData, MarketSnapshot};

/// An instrument that could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub code: String,
    pub reason: String,
}

/// Analyses in snapshot order plus the instruments that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub analyses: Vec<InstrumentAnalysis>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }
}

/// Runs the analysis pipeline over snapshots with a fixed configuration.
pub struct BatchRunner {
    config: RunConfig,
    pipeline: AnalysisPipeline,
}

impl BatchRunner {
    pub fn new(config: RunConfig) -> Self {
        let pipeline = AnalysisPipeline::new(&config.analysis);
        Self { config, pipeline }
    }

    /// Prefer `analyzer` over the rule-based one while it reports itself available.
    pub fn with_primary(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.pipeline = self.pipeline.with_primary(analyzer);
        self
    }

    pub fn run(&self, snapshot: &MarketSnapshot) -> BatchOutcome {
        log::info!(
            "analysing {} instrument(s), lookback {}, {}",
            snapshot.etfs.len(),
            self.config.lookback,
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        let results: Vec<Result<InstrumentAnalysis, BatchFailure>> = if self.config.parallel {
            snapshot.etfs.par_iter().map(|etf| self.analyze_one(etf)).collect()
        } else {
            snapshot.etfs.iter().map(|etf| self.analyze_one(etf)).collect()
        };

        let mut outcome = BatchOutcome::default();
        for result in results {
            match result {
                Ok(analysis) => outcome.analyses.push(analysis),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        log::info!(
            "batch finished: {} analysed, {} skipped",
            outcome.analyses.len(),
            outcome.failures.len()
        );
        outcome
    }

    fn analyze_one(&self, etf: &InstrumentData) -> Result<InstrumentAnalysis, BatchFailure> {
        let series = etf.series().map_err(|e| {
            log::warn!("skipping {}({}): {e}", etf.name, etf.code);
            BatchFailure {
                code: etf.code.clone(),
                reason: e.to_string(),
            }
        })?;
        let quote = etf.quote(&series);
        let window = series.window(self.config.lookback);
        Ok(self.pipeline.analyze(&etf.instrument(), &window, &quote))
    }
}
