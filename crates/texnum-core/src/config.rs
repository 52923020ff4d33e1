//! Rule configuration, read from JSON.
//!
//! Every field has a default, so a partial file such as
//! `{ "tabular": { "enabled": false } }` is valid.

use crate::error::{ConfigError, ConfigResult};
use crate::number_words::DEFAULT_MAX_VALUE;
use crate::tabular::{DECIMAL_ALIGNED, DEFAULT_DENSITY_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".texnum.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub number_words: NumberWordsConfig,
    pub tabular: TabularConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberWordsConfig {
    pub enabled: bool,
    /// Largest integer that should be spelled out.
    pub max_value: i64,
}

impl Default for NumberWordsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_value: DEFAULT_MAX_VALUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularConfig {
    pub enabled: bool,
    pub density_threshold: f64,
    /// Column types that are already decimal-aligned.
    pub aligned_types: Vec<char>,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            aligned_types: vec![DECIMAL_ALIGNED],
        }
    }
}

impl LintConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let threshold = self.tabular.density_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "tabular.density_threshold must lie in [0, 1], got {threshold}"
            )));
        }
        if self.number_words.max_value < 0 {
            return Err(ConfigError::Invalid(format!(
                "number_words.max_value must not be negative, got {}",
                self.number_words.max_value
            )));
        }
        Ok(())
    }
}
