//! Run configuration: batch options plus the analysis thresholds.
//!
//! ```toml
//! lookback = 30
//! parallel = true
//!
//! [analysis.risk]
//! volatility_pct = 4.0
//! ```

use std::path::Path;

use etflab_core::{AnalysisConfig, ConfigError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sessions of history fed to the indicators when nothing else is configured.
pub const DEFAULT_LOOKBACK: usize = 30;

#[derive(Debug, Error)]
pub enum RunConfigError {
    #[error("failed to read run config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse run config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Analysis(#[from] ConfigError),

    #[error("lookback must be at least 1 session")]
    ZeroLookback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Most recent sessions of each history to analyse.
    pub lookback: usize,
    /// Analyse instruments on the rayon pool instead of one by one.
    pub parallel: bool,
    pub analysis: AnalysisConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            parallel: true,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, RunConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, RunConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| RunConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), RunConfigError> {
        if self.lookback == 0 {
            return Err(RunConfigError::ZeroLookback);
        }
        self.analysis.validate()?;
        if self.lookback < self.analysis.indicators.max_lookback() {
            log::warn!(
                "lookback {} is shorter than the slowest indicator ({} sessions); \
                 those indicators will report their fallback values",
                self.lookback,
                self.analysis.indicators.max_lookback()
            );
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, lookback: Option<usize>, sequential: bool) -> Self {
        if let Some(lookback) = lookback {
            self.lookback = lookback;
        }
        if sequential {
            self.parallel = false;
        }
        self
    }
}
