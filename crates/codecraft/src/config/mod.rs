use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub use crate::config::language::Language;

pub mod language;
mod loader;

/// Example configuration embedded at compile time.
///
/// Library users can access this to generate a starter config file.
pub const EXAMPLE_CONFIG: &str = include_str!("../../codecraft.example.toml");

/// Execution endpoint used when the config does not name one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/run";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("language '{0}' not found in configuration")]
    LanguageNotFound(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Config for CodeCraft
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// URL of the remote execution service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Language selected when a session starts
    #[serde(default = "default_language")]
    pub default_language: String,

    /// File backing the single source-text snapshot slot
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Seconds to wait for the execution service before giving up.
    ///
    /// Unset means the request waits until the transport itself fails.
    #[serde(default)]
    pub request_timeout: Option<f64>,

    /// Editor font size bounds
    #[serde(default)]
    pub font_size: FontSizeConfig,

    /// Language configurations keyed by language ID
    #[serde(default)]
    pub languages: HashMap<String, Language>,
}

impl Config {
    /// Create a new config with embedded default languages
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty config with no languages
    pub fn empty() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_language: default_language(),
            snapshot_path: default_snapshot_path(),
            request_timeout: None,
            font_size: FontSizeConfig::default(),
            languages: HashMap::new(),
        }
    }

    /// Get a language by ID
    pub fn get_language(&self, id: &str) -> Result<&Language, ConfigError> {
        self.languages
            .get(id)
            .ok_or_else(|| ConfigError::LanguageNotFound(id.to_string()))
    }

    /// Check whether a language ID is in the supported set
    pub fn supports(&self, id: &str) -> bool {
        self.languages.contains_key(id)
    }

    /// Language IDs in sorted order
    pub fn language_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Request timeout as a `Duration`, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs_f64)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_toml(EXAMPLE_CONFIG).expect("embedded default config should be valid")
    }
}

/// Bounds for the editor font size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontSizeConfig {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl FontSizeConfig {
    /// Clamp a requested size into `[min, max]`
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for FontSizeConfig {
    fn default() -> Self {
        Self {
            min: 12,
            max: 24,
            default: 17,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_language() -> String {
    "cpp".to_owned()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(".codecraft/savedCode")
}
