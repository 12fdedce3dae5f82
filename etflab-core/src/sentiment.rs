//! SentimentScorer — additive 0-100 market temperature.
//!
//! Starts from a neutral base and adds one adjustment per category (price trend,
//! RSI zone, MACD state, moving-average alignment). The sum is clamped to [0, 100].

use serde::{Deserialize, Serialize};

use crate::domain::RealtimeQuote;
use crate::indicators::IndicatorSet;
use crate::rounding::round_to;

/// Categorical lean of a [`SentimentScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    StronglyBullish,
    Bullish,
    MildlyBullish,
    Neutral,
    MildlyBearish,
    Bearish,
}

impl SentimentLabel {
    /// Map a clamped score to its label.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::StronglyBullish
        } else if score >= 60.0 {
            Self::Bullish
        } else if score >= 50.0 {
            Self::MildlyBullish
        } else if score >= 40.0 {
            Self::Neutral
        } else if score >= 30.0 {
            Self::MildlyBearish
        } else {
            Self::Bearish
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::StronglyBullish => "🚀",
            Self::Bullish => "📈",
            Self::MildlyBullish => "😊",
            Self::Neutral => "😐",
            Self::MildlyBearish => "😟",
            Self::Bearish => "📉",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StronglyBullish => "strongly bullish",
            Self::Bullish => "bullish",
            Self::MildlyBullish => "mildly bullish",
            Self::Neutral => "neutral",
            Self::MildlyBearish => "mildly bearish",
            Self::Bearish => "bearish",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub score: f64,
    pub label: SentimentLabel,
    pub glyph: String,
}

impl SentimentScore {
    /// Clamp `raw` into [0, 100] (1 decimal) and attach label and glyph.
    pub fn from_raw(raw: f64) -> Self {
        let score = round_to(raw.clamp(0.0, 100.0), 1);
        let label = SentimentLabel::from_score(score);
        Self {
            score,
            label,
            glyph: label.glyph().to_string(),
        }
    }
}

/// Thresholds and weights of the scoring table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub base_score: f64,
    /// Absolute session move (%) separating strong from mild trend.
    pub strong_move_pct: f64,
    pub strong_trend_weight: f64,
    pub mild_trend_weight: f64,
    pub rsi_overbought: f64,
    pub rsi_warm: f64,
    pub rsi_cool: f64,
    pub rsi_oversold: f64,
    /// Penalty for RSI beyond either extreme.
    pub rsi_extreme_weight: f64,
    pub rsi_balanced_weight: f64,
    pub rsi_edge_weight: f64,
    pub macd_confirmed_weight: f64,
    pub macd_histogram_weight: f64,
    pub macd_cross_weight: f64,
    pub macd_bearish_weight: f64,
    pub ma_full_weight: f64,
    pub ma_partial_weight: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            strong_move_pct: 2.0,
            strong_trend_weight: 15.0,
            mild_trend_weight: 8.0,
            rsi_overbought: 70.0,
            rsi_warm: 60.0,
            rsi_cool: 40.0,
            rsi_oversold: 30.0,
            rsi_extreme_weight: 10.0,
            rsi_balanced_weight: 10.0,
            rsi_edge_weight: 5.0,
            macd_confirmed_weight: 12.0,
            macd_histogram_weight: 6.0,
            macd_cross_weight: 3.0,
            macd_bearish_weight: 8.0,
            ma_full_weight: 10.0,
            ma_partial_weight: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    config: SentimentConfig,
}

impl SentimentScorer {
    pub fn new(config: SentimentConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, quote: &RealtimeQuote, indicators: &IndicatorSet) -> SentimentScore {
        let raw = self.config.base_score
            + self.trend_adjustment(quote.change_percent)
            + self.rsi_adjustment(indicators.rsi)
            + self.macd_adjustment(indicators)
            + self.alignment_adjustment(quote.current, indicators);
        SentimentScore::from_raw(raw)
    }

    fn trend_adjustment(&self, change_percent: f64) -> f64 {
        let c = &self.config;
        if change_percent > c.strong_move_pct {
            c.strong_trend_weight
        } else if change_percent > 0.0 {
            c.mild_trend_weight
        } else if change_percent > -c.strong_move_pct {
            -c.mild_trend_weight
        } else {
            -c.strong_trend_weight
        }
    }

    fn rsi_adjustment(&self, rsi: f64) -> f64 {
        let c = &self.config;
        if rsi > c.rsi_overbought {
            -c.rsi_extreme_weight
        } else if rsi > c.rsi_warm {
            c.rsi_edge_weight
        } else if rsi > c.rsi_cool {
            c.rsi_balanced_weight
        } else if rsi > c.rsi_oversold {
            c.rsi_edge_weight
        } else {
            -c.rsi_extreme_weight
        }
    }

    fn macd_adjustment(&self, indicators: &IndicatorSet) -> f64 {
        let c = &self.config;
        let m = &indicators.macd;
        let histogram_up = m.macd > 0.0;
        let dif_above = m.dif > m.dea;
        match (histogram_up, dif_above) {
            (true, true) => c.macd_confirmed_weight,
            (true, false) => c.macd_histogram_weight,
            (false, true) => c.macd_cross_weight,
            (false, false) => -c.macd_bearish_weight,
        }
    }

    fn alignment_adjustment(&self, current: f64, ind: &IndicatorSet) -> f64 {
        let c = &self.config;
        if ind.is_bullish_alignment(current) {
            c.ma_full_weight
        } else if current > ind.ma5 && ind.ma5 > ind.ma10 {
            c.ma_partial_weight
        } else if ind.is_bearish_alignment(current) {
            -c.ma_full_weight
        } else if current < ind.ma5 && ind.ma5 < ind.ma10 {
            -c.ma_partial_weight
        } else {
            0.0
        }
    }
}
