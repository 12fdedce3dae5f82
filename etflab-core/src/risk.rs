//! RiskIdentifier — ordered, never-empty list of qualitative risk warnings.
//!
//! Rules are evaluated in a fixed order and every rule that fires appends one
//! entry. When nothing fires a single low-level routine entry is emitted.

use serde::{Deserialize, Serialize};

use crate::domain::RealtimeQuote;
use crate::indicators::IndicatorSet;
use crate::sentiment::SentimentScore;
use crate::signal::TradingSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskKind {
    #[serde(rename = "Overbought")]
    Overbought,
    #[serde(rename = "Oversold rebound")]
    OversoldRebound,
    #[serde(rename = "Volatility risk")]
    Volatility,
    #[serde(rename = "Trend risk")]
    Trend,
    #[serde(rename = "Liquidity risk")]
    Liquidity,
    #[serde(rename = "Valuation risk")]
    Valuation,
    #[serde(rename = "Overheated sentiment")]
    OverheatedSentiment,
    #[serde(rename = "Panic sentiment")]
    PanicSentiment,
    #[serde(rename = "Routine risk")]
    Routine,
}

impl RiskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overbought => "Overbought",
            Self::OversoldRebound => "Oversold rebound",
            Self::Volatility => "Volatility risk",
            Self::Trend => "Trend risk",
            Self::Liquidity => "Liquidity risk",
            Self::Valuation => "Valuation risk",
            Self::OverheatedSentiment => "Overheated sentiment",
            Self::PanicSentiment => "Panic sentiment",
            Self::Routine => "Routine risk",
        }
    }
}

impl std::fmt::Display for RiskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub level: RiskLevel,
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub description: String,
}

impl RiskEntry {
    pub fn new(level: RiskLevel, kind: RiskKind, description: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            description: description.into(),
        }
    }

    /// The entry emitted when no rule fires.
    pub fn routine() -> Self {
        Self::new(
            RiskLevel::Low,
            RiskKind::Routine,
            "No material technical risk at the moment; keep watching the broader market and policy changes",
        )
    }
}

/// Ordered risk entries; never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RiskEntry>", into = "Vec<RiskEntry>")]
pub struct RiskList {
    entries: Vec<RiskEntry>,
}

impl RiskList {
    /// Wrap `entries`, substituting the routine entry for an empty list.
    pub fn from_entries(entries: Vec<RiskEntry>) -> Self {
        if entries.is_empty() {
            return Self {
                entries: vec![RiskEntry::routine()],
            };
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[RiskEntry] {
        &self.entries
    }

    /// First (highest-priority by rule order) entry.
    pub fn primary(&self) -> &RiskEntry {
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskEntry> {
        self.entries.iter()
    }

    pub fn max_level(&self) -> RiskLevel {
        self.entries
            .iter()
            .map(|e| e.level)
            .max()
            .unwrap_or(RiskLevel::Low)
    }
}

impl TryFrom<Vec<RiskEntry>> for RiskList {
    type Error = &'static str;

    fn try_from(entries: Vec<RiskEntry>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err("risk list must contain at least one entry");
        }
        Ok(Self { entries })
    }
}

impl From<RiskList> for Vec<RiskEntry> {
    fn from(list: RiskList) -> Self {
        list.entries
    }
}

impl<'a> IntoIterator for &'a RiskList {
    type Item = &'a RiskEntry;
    type IntoIter = std::slice::Iter<'a, RiskEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// Absolute session move (%) treated as violent.
    pub volatility_pct: f64,
    /// Volume drop (%) treated as drying liquidity.
    pub volume_drop_pct: f64,
    pub sentiment_overheated: f64,
    pub sentiment_panic: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            rsi_overbought: 75.0,
            rsi_oversold: 25.0,
            volatility_pct: 5.0,
            volume_drop_pct: 50.0,
            sentiment_overheated: 80.0,
            sentiment_panic: 20.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskIdentifier {
    config: RiskConfig,
}

impl RiskIdentifier {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Evaluate every rule in order. The signal is accepted as context only.
    pub fn identify(
        &self,
        quote: &RealtimeQuote,
        indicators: &IndicatorSet,
        sentiment: &SentimentScore,
        _signal: &TradingSignal,
    ) -> RiskList {
        let c = &self.config;
        let mut risks = Vec::new();

        let rsi = indicators.rsi;
        if rsi > c.rsi_overbought {
            risks.push(RiskEntry::new(
                RiskLevel::High,
                RiskKind::Overbought,
                format!("RSI at {rsi:.1} is deep in overbought territory; a short-term pullback is likely"),
            ));
        } else if rsi < c.rsi_oversold {
            risks.push(RiskEntry::new(
                RiskLevel::Medium,
                RiskKind::OversoldRebound,
                format!("RSI at only {rsi:.1} is oversold; a rebound is possible but wait for a confirmed bottom"),
            ));
        }

        let change = quote.change_percent;
        if change.abs() > c.volatility_pct {
            risks.push(RiskEntry::new(
                RiskLevel::High,
                RiskKind::Volatility,
                format!("Session move of {change:.2}% shows violent swings; trade cautiously"),
            ));
        }

        if indicators.is_bearish_alignment(quote.current) {
            risks.push(RiskEntry::new(
                RiskLevel::High,
                RiskKind::Trend,
                "Moving averages are in bearish alignment; the downtrend is clear, avoid bottom-fishing",
            ));
        }

        let volume_change = indicators.volume_change;
        if volume_change < -c.volume_drop_pct {
            risks.push(RiskEntry::new(
                RiskLevel::Medium,
                RiskKind::Liquidity,
                format!(
                    "Volume shrank {:.1}%; the market is waiting on the sidelines",
                    volume_change.abs()
                ),
            ));
        }

        if quote.current > indicators.bollinger.upper {
            risks.push(RiskEntry::new(
                RiskLevel::Medium,
                RiskKind::Valuation,
                "Price broke above the upper Bollinger band; the short-term run-up is stretched, watch for a pullback",
            ));
        }

        if sentiment.score > c.sentiment_overheated {
            risks.push(RiskEntry::new(
                RiskLevel::Medium,
                RiskKind::OverheatedSentiment,
                "Sentiment is overly optimistic; beware of a reversal",
            ));
        } else if sentiment.score < c.sentiment_panic {
            risks.push(RiskEntry::new(
                RiskLevel::Medium,
                RiskKind::PanicSentiment,
                "Panic is spreading; bargains may appear but wait for signs of stabilization",
            ));
        }

        RiskList::from_entries(risks)
    }
}
