use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::list::DEFAULT_SHUFFLE_DEPTH;
use crate::render::PrintStyle;

const MAX_INDENT: usize = 16;
const MAX_SHUFFLE_DEPTH: usize = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Settings for script sessions and the `seqlist` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Passes used by `shuffle` when a script gives no depth.
    pub shuffle_depth: usize,
    /// Delimiter used by `join` when a script gives none.
    pub delimiter: String,
    /// Seed for reproducible shuffles; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub print: PrintStyle,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            shuffle_depth: DEFAULT_SHUFFLE_DEPTH,
            delimiter: ",".to_string(),
            seed: None,
            print: PrintStyle::default(),
        }
    }
}

impl ListConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ListConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.print.indent > MAX_INDENT {
            return Err(ConfigError::invalid(
                "print.indent",
                format!("{} exceeds the maximum of {MAX_INDENT}", self.print.indent),
            ));
        }
        if self.print.terminator.is_empty() {
            return Err(ConfigError::invalid("print.terminator", "must not be empty"));
        }
        if self.shuffle_depth > MAX_SHUFFLE_DEPTH {
            return Err(ConfigError::invalid(
                "shuffle_depth",
                format!("{} exceeds the maximum of {MAX_SHUFFLE_DEPTH}", self.shuffle_depth),
            ));
        }
        Ok(())
    }
}
