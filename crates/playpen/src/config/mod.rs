use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

mod loader;

/// Example configuration embedded at compile time.
///
/// Library users can access this to generate a starter config file.
pub const EXAMPLE_CONFIG: &str = include_str!("../../playpen.example.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Config for Playpen
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Wall-clock budget in seconds shared by the init and run steps combined.
    ///
    /// One absolute cutoff, not two independent timers: whatever the init step
    /// consumes is no longer available to the run step.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    /// Toolchain subcommand configuration
    pub toolchain: ToolchainConfig,
}

/// Configuration for the external toolchain
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainConfig {
    /// File name the submitted source is written to inside the working area
    pub source_name: String,

    /// Project-initialization command and arguments
    pub init: Vec<String>,

    /// Build-and-run command and arguments
    pub run: Vec<String>,

    /// Extra environment variables for both subcommands
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Sample program shown in the editor on the index page
    #[serde(default)]
    pub sample: String,
}

impl Config {
    /// Create a new config with the embedded Go toolchain defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared deadline budget as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_toml(EXAMPLE_CONFIG).expect("embedded default config should be valid")
    }
}

fn default_timeout_secs() -> f64 {
    10.0
}
