//! Analyzer capability and the analysis pipeline.
//!
//! An [`Analyzer`] bundles the four pipeline stages. [`AnalysisPipeline`] runs an
//! optional primary analyzer and falls back to the [`RuleBasedAnalyzer`] whenever
//! the primary is absent or reports itself unavailable.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::domain::{Instrument, PriceSeries, RealtimeQuote};
use crate::indicators::{IndicatorEngine, IndicatorSet};
use crate::risk::{RiskIdentifier, RiskList};
use crate::sentiment::{SentimentScore, SentimentScorer};
use crate::signal::{SignalGenerator, TradingSignal};

/// The four analysis stages as one capability.
pub trait Analyzer: Send + Sync {
    /// Human-readable name (e.g., "rule_based").
    fn name(&self) -> &str;

    /// Whether this analyzer can serve requests right now.
    fn is_available(&self) -> bool {
        true
    }

    fn compute_indicators(&self, series: &PriceSeries) -> IndicatorSet;

    fn score(&self, quote: &RealtimeQuote, indicators: &IndicatorSet) -> SentimentScore;

    fn signal(
        &self,
        sentiment: &SentimentScore,
        indicators: &IndicatorSet,
        quote: &RealtimeQuote,
    ) -> TradingSignal;

    fn risks(
        &self,
        quote: &RealtimeQuote,
        indicators: &IndicatorSet,
        sentiment: &SentimentScore,
        signal: &TradingSignal,
    ) -> RiskList;
}

/// Threshold-table analyzer built from the core components.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer {
    engine: IndicatorEngine,
    scorer: SentimentScorer,
    generator: SignalGenerator,
    identifier: RiskIdentifier,
}

impl RuleBasedAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            engine: IndicatorEngine::new(config.indicators.clone()),
            scorer: SentimentScorer::new(config.sentiment.clone()),
            generator: SignalGenerator::new(config.signal.clone()),
            identifier: RiskIdentifier::new(config.risk.clone()),
        }
    }
}

impl Analyzer for RuleBasedAnalyzer {
    fn name(&self) -> &str {
        "rule_based"
    }

    fn compute_indicators(&self, series: &PriceSeries) -> IndicatorSet {
        self.engine.compute(series)
    }

    fn score(&self, quote: &RealtimeQuote, indicators: &IndicatorSet) -> SentimentScore {
        self.scorer.score(quote, indicators)
    }

    fn signal(
        &self,
        sentiment: &SentimentScore,
        indicators: &IndicatorSet,
        quote: &RealtimeQuote,
    ) -> TradingSignal {
        self.generator.generate(sentiment, indicators, quote)
    }

    fn risks(
        &self,
        quote: &RealtimeQuote,
        indicators: &IndicatorSet,
        sentiment: &SentimentScore,
        signal: &TradingSignal,
    ) -> RiskList {
        self.identifier.identify(quote, indicators, sentiment, signal)
    }
}

/// Output record for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAnalysis {
    pub code: String,
    pub name: String,
    pub realtime: RealtimeQuote,
    pub indicators: IndicatorSet,
    pub sentiment: SentimentScore,
    pub signal: TradingSignal,
    pub risks: RiskList,
}

pub struct AnalysisPipeline {
    primary: Option<Arc<dyn Analyzer>>,
    fallback: RuleBasedAnalyzer,
}

impl AnalysisPipeline {
    /// Pipeline backed only by the rule-based analyzer.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            primary: None,
            fallback: RuleBasedAnalyzer::new(config),
        }
    }

    /// Prefer `primary` while it is available.
    pub fn with_primary(mut self, primary: Arc<dyn Analyzer>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// The analyzer that will serve the next request.
    pub fn active(&self) -> &dyn Analyzer {
        match &self.primary {
            Some(primary) if primary.is_available() => primary.as_ref(),
            Some(primary) => {
                log::warn!(
                    "analyzer '{}' unavailable, falling back to '{}'",
                    primary.name(),
                    self.fallback.name()
                );
                &self.fallback
            }
            None => &self.fallback,
        }
    }

    pub fn analyze(
        &self,
        instrument: &Instrument,
        series: &PriceSeries,
        quote: &RealtimeQuote,
    ) -> InstrumentAnalysis {
        let analyzer = self.active();

        let indicators = analyzer.compute_indicators(series);
        let sentiment = analyzer.score(quote, &indicators);
        let signal = analyzer.signal(&sentiment, &indicators, quote);
        let risks = analyzer.risks(quote, &indicators, &sentiment, &signal);

        log::debug!(
            "{instrument} via {}: sentiment {} ({}), action {} ({}%), {} risk(s)",
            analyzer.name(),
            sentiment.score,
            sentiment.label,
            signal.action,
            signal.confidence,
            risks.len()
        );

        InstrumentAnalysis {
            code: instrument.code.clone(),
            name: instrument.name.clone(),
            realtime: quote.clone(),
            indicators,
            sentiment,
            signal,
            risks,
        }
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}
