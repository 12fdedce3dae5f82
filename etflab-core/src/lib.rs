//! ETFLab Core — technical analysis pipeline for a single instrument.
//!
//! This crate is a pure, synchronous computation over already-acquired data:
//! - Domain types (price points, validated price series, realtime quote)
//! - IndicatorEngine: moving averages, RSI, MACD-like triple, Bollinger, volume change
//! - SentimentScorer: additive 0-100 score with label and glyph
//! - SignalGenerator: vote accumulation and a fixed-precedence decision table
//! - RiskIdentifier: ordered, never-empty risk warnings
//! - Analyzer capability trait with a rule-based fallback pipeline

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod indicators;
pub mod risk;
pub mod rounding;
pub mod sentiment;
pub mod signal;

pub use analyzer::{AnalysisPipeline, Analyzer, InstrumentAnalysis, RuleBasedAnalyzer};
pub use config::{AnalysisConfig, ConfigError};
pub use domain::{Instrument, PricePoint, PriceSeries, RealtimeQuote, SeriesError};
pub use indicators::{BollingerBands, IndicatorConfig, IndicatorEngine, IndicatorSet, MacdTriple};
pub use risk::{RiskConfig, RiskEntry, RiskIdentifier, RiskKind, RiskLevel, RiskList};
pub use sentiment::{SentimentConfig, SentimentLabel, SentimentScore, SentimentScorer};
pub use signal::{SignalConfig, SignalGenerator, TradeAction, TradingSignal};
