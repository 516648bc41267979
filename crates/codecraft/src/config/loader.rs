//! Configuration file loading for CodeCraft
//!
//! Handles loading and parsing configuration files using the config crate.

use std::path::Path;

use config::{Config as ConfigBuilder, File, FileFormat};

use crate::config::{Config, ConfigError};

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = ConfigBuilder::builder()
            .add_source(File::from(path))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config = ConfigBuilder::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint is empty".to_owned()));
        }

        if self.languages.is_empty() {
            return Err(ConfigError::Invalid("no languages configured".to_owned()));
        }

        for (id, lang) in &self.languages {
            if lang.name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "language '{id}' has empty name"
                )));
            }
        }

        if !self.languages.contains_key(&self.default_language) {
            return Err(ConfigError::Invalid(format!(
                "default language '{}' is not configured",
                self.default_language
            )));
        }

        if self.font_size.min > self.font_size.max {
            return Err(ConfigError::Invalid(format!(
                "font size min {} exceeds max {}",
                self.font_size.min, self.font_size.max
            )));
        }

        if let Some(timeout) = self.request_timeout
            && !(timeout.is_finite() && timeout > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "request timeout must be a positive number of seconds, got {timeout}"
            )));
        }

        Ok(())
    }
}
