//! SignalGenerator — vote accumulation and a fixed-precedence decision table.
//!
//! Independent rules each add buy or sell votes. The decision checks buy thresholds
//! before sell thresholds, so a tie at the strong threshold resolves to a buy.

use serde::{Deserialize, Serialize};

use crate::domain::RealtimeQuote;
use crate::indicators::IndicatorSet;
use crate::sentiment::SentimentScore;

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    StrongBuy,
    Buy,
    Hold,
    Reduce,
    Sell,
}

impl TradeAction {
    /// Confidence attached to each action, in percent.
    pub fn confidence(&self) -> u8 {
        match self {
            Self::StrongBuy => 90,
            Self::Buy => 75,
            Self::Sell => 85,
            Self::Reduce => 70,
            Self::Hold => 60,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::StrongBuy => "strong_buy",
            Self::Buy => "buy",
            Self::Hold => "hold",
            Self::Reduce => "reduce",
            Self::Sell => "sell",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Self::Sell | Self::Reduce)
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub buy_votes: u32,
    pub sell_votes: u32,
    pub action: TradeAction,
    pub confidence: u8,
}

impl TradingSignal {
    /// Apply the decision table with the default thresholds (5 strong, 3 plain).
    pub fn from_votes(buy_votes: u32, sell_votes: u32) -> Self {
        Self::decide(buy_votes, sell_votes, &SignalConfig::default())
    }

    /// First match wins: strong buy, buy, sell, reduce, hold.
    pub fn decide(buy_votes: u32, sell_votes: u32, config: &SignalConfig) -> Self {
        let action = if buy_votes >= config.strong_votes {
            TradeAction::StrongBuy
        } else if buy_votes >= config.votes {
            TradeAction::Buy
        } else if sell_votes >= config.strong_votes {
            TradeAction::Sell
        } else if sell_votes >= config.votes {
            TradeAction::Reduce
        } else {
            TradeAction::Hold
        };
        Self {
            buy_votes,
            sell_votes,
            action,
            confidence: action.confidence(),
        }
    }
}

/// Vote rules and decision thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub strong_votes: u32,
    pub votes: u32,
    pub sentiment_strong_buy: f64,
    pub sentiment_buy: f64,
    pub sentiment_strong_sell: f64,
    pub sentiment_sell: f64,
    pub rsi_oversold: f64,
    pub rsi_soft_oversold: f64,
    pub rsi_overbought: f64,
    pub rsi_soft_overbought: f64,
    /// Volume change (%) that counts as a surge.
    pub volume_surge_pct: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            strong_votes: 5,
            votes: 3,
            sentiment_strong_buy: 65.0,
            sentiment_buy: 55.0,
            sentiment_strong_sell: 35.0,
            sentiment_sell: 45.0,
            rsi_oversold: 30.0,
            rsi_soft_oversold: 40.0,
            rsi_overbought: 70.0,
            rsi_soft_overbought: 60.0,
            volume_surge_pct: 50.0,
        }
    }
}

/// Votes cast by one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Votes {
    buy: u32,
    sell: u32,
}

impl Votes {
    fn buy(n: u32) -> Self {
        Self { buy: n, sell: 0 }
    }

    fn sell(n: u32) -> Self {
        Self { buy: 0, sell: n }
    }
}

impl std::ops::Add for Votes {
    type Output = Votes;

    fn add(self, rhs: Votes) -> Votes {
        Votes {
            buy: self.buy + rhs.buy,
            sell: self.sell + rhs.sell,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        sentiment: &SentimentScore,
        indicators: &IndicatorSet,
        quote: &RealtimeQuote,
    ) -> TradingSignal {
        let votes = self.sentiment_votes(sentiment.score)
            + self.rsi_votes(indicators.rsi)
            + self.macd_votes(indicators)
            + self.band_votes(quote.current, indicators)
            + self.volume_votes(indicators.volume_change, quote.change_percent);
        TradingSignal::decide(votes.buy, votes.sell, &self.config)
    }

    fn sentiment_votes(&self, score: f64) -> Votes {
        let c = &self.config;
        if score >= c.sentiment_strong_buy {
            Votes::buy(2)
        } else if score >= c.sentiment_buy {
            Votes::buy(1)
        } else if score <= c.sentiment_strong_sell {
            Votes::sell(2)
        } else if score <= c.sentiment_sell {
            Votes::sell(1)
        } else {
            Votes::default()
        }
    }

    fn rsi_votes(&self, rsi: f64) -> Votes {
        let c = &self.config;
        if rsi < c.rsi_oversold {
            Votes::buy(2)
        } else if rsi < c.rsi_soft_oversold {
            Votes::buy(1)
        } else if rsi > c.rsi_overbought {
            Votes::sell(2)
        } else if rsi > c.rsi_soft_overbought {
            Votes::sell(1)
        } else {
            Votes::default()
        }
    }

    fn macd_votes(&self, indicators: &IndicatorSet) -> Votes {
        if indicators.macd.is_golden_cross() {
            Votes::buy(2)
        } else if indicators.macd.is_dead_cross() {
            Votes::sell(2)
        } else {
            Votes::default()
        }
    }

    fn band_votes(&self, current: f64, indicators: &IndicatorSet) -> Votes {
        if current < indicators.bollinger.lower {
            Votes::buy(1)
        } else if current > indicators.bollinger.upper {
            Votes::sell(1)
        } else {
            Votes::default()
        }
    }

    fn volume_votes(&self, volume_change: f64, change_percent: f64) -> Votes {
        if volume_change <= self.config.volume_surge_pct {
            return Votes::default();
        }
        if change_percent > 0.0 {
            Votes::buy(1)
        } else if change_percent < 0.0 {
            Votes::sell(1)
        } else {
            Votes::default()
        }
    }
}
