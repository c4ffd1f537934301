use crate::error::{Result, SpamError};
use crate::spam::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub split: SplitConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Proportions and seed handed to the dataset splitter
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    pub seed: u64,
    pub train: f64,
    pub cv: f64,
    pub test: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Alpha values tried in order; ties go to the earlier entry
    pub candidates: Vec<f64>,
    pub policy: ScoringPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            train: 0.8,
            cv: 0.1,
            test: 0.1,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidates: vec![0.001, 0.25, 0.5, 0.75, 1.0],
            policy: ScoringPolicy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SpamError::Config(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SpamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(SpamError::Config(format!(
                    "unknown logging format '{}' (expected 'pretty' or 'json')",
                    other
                )))
            }
        }

        if self.search.candidates.is_empty() {
            return Err(SpamError::Config("search.candidates must not be empty".to_string()));
        }

        Ok(())
    }
}
