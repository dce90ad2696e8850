//! Configuration for doi-identity
//!
//! Loaded from TOML or JSON:
//!
//! ```toml
//! output_style = "info-doi"
//!
//! [family]
//! name = "PLOS"
//! registrant = "10.1371"
//! code_pattern = "p[a-z]{3}"
//! digit_count = 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::family::JournalFamily;
use crate::uri_style::UriStyle;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoiConfig {
    /// Style used when rendering a DOI as a URI and none is requested
    pub output_style: UriStyle,
    /// Journal family used for short identifiers and family validation
    pub family: JournalFamilyConfig,
}

impl Default for DoiConfig {
    fn default() -> Self {
        Self {
            output_style: UriStyle::InfoDoi,
            family: JournalFamilyConfig::default(),
        }
    }
}

/// Uncompiled description of a journal family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalFamilyConfig {
    pub name: String,
    /// DOI registrant, e.g. `10.1371`
    pub registrant: String,
    /// Regex for the journal code, without anchors
    pub code_pattern: String,
    /// Exact length of the article number
    pub digit_count: usize,
}

impl Default for JournalFamilyConfig {
    fn default() -> Self {
        Self {
            name: "PLOS".to_string(),
            registrant: "10.1371".to_string(),
            code_pattern: "p[a-z]{3}".to_string(),
            digit_count: 7,
        }
    }
}

impl DoiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load from a file, choosing JSON for `.json` and TOML otherwise
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        config.validate()?;

        tracing::info!(
            "Loaded configuration from {:?} (family {}, output style {})",
            path,
            config.family.name,
            config.output_style
        );
        Ok(config)
    }

    /// Validate configuration values by compiling the family
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.journal_family().map(|_| ())
    }

    /// Compile the configured journal family
    pub fn journal_family(&self) -> Result<JournalFamily, ConfigError> {
        JournalFamily::from_config(&self.family)
    }
}

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid code pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}
