//! Analysis configuration: immutable threshold tables for every component.
//!
//! Each table defaults to the reference values; a TOML file only needs to list the
//! fields it overrides.
//!
//! ```toml
//! [sentiment]
//! strong_move_pct = 3.0
//!
//! [risk]
//! rsi_overbought = 80.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::indicators::IndicatorConfig;
use crate::risk::RiskConfig;
use crate::sentiment::SentimentConfig;
use crate::signal::SignalConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub sentiment: SentimentConfig,
    pub signal: SignalConfig,
    pub risk: RiskConfig,
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject tables that would make the formulas meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        if ind.rsi_period == 0 || ind.bollinger_period == 0 {
            return Err(ConfigError::Invalid(
                "indicator periods must be >= 1".into(),
            ));
        }
        if ind.macd_fast == 0 || ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::Invalid(format!(
                "macd_fast ({}) must be >= 1 and below macd_slow ({})",
                ind.macd_fast, ind.macd_slow
            )));
        }
        if self.signal.votes == 0 || self.signal.votes > self.signal.strong_votes {
            return Err(ConfigError::Invalid(format!(
                "signal votes ({}) must be >= 1 and not above strong_votes ({})",
                self.signal.votes, self.signal.strong_votes
            )));
        }
        Ok(())
    }
}
