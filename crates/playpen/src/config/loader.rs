//! Configuration file loading for Playpen
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
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timeout_secs must be positive, got {}",
                self.timeout_secs
            )));
        }

        let toolchain = &self.toolchain;
        if toolchain.source_name.is_empty() {
            return Err(ConfigError::Invalid("empty toolchain source_name".into()));
        }
        // The source name is joined onto the working area path, so it must not
        // escape it.
        if toolchain.source_name.contains('/') || toolchain.source_name.contains("..") {
            return Err(ConfigError::Invalid(format!(
                "toolchain source_name must be a bare file name, got '{}'",
                toolchain.source_name
            )));
        }
        if toolchain.init.is_empty() {
            return Err(ConfigError::Invalid("empty toolchain init command".into()));
        }
        if toolchain.run.is_empty() {
            return Err(ConfigError::Invalid("empty toolchain run command".into()));
        }

        Ok(())
    }
}
