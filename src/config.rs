//! Session configuration and configuration file loading.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a driven session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SisConfig {
    /// Executable to spawn.
    pub binary: String,
    /// Extra arguments passed to the executable.
    pub args: Vec<String>,
    /// Literal prompt marker the tool emits when ready for a command.
    pub prompt: String,
    /// Wait budget for each marker scan, in milliseconds.
    pub command_timeout_ms: u64,
    /// How long to wait for the process to exit after a graceful quit
    /// before forcing termination, in milliseconds.
    pub stop_grace_ms: u64,
    /// Change the process working directory to the input file's directory
    /// (and reset the session) before read operations.
    pub changedir_on_read: bool,
}

fn default_binary() -> String {
    "sis".to_string()
}

fn default_prompt() -> String {
    "sis>".to_string()
}

fn default_command_timeout_ms() -> u64 {
    30_000
}

fn default_stop_grace_ms() -> u64 {
    2_000
}

impl Default for SisConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            args: Vec::new(),
            prompt: default_prompt(),
            command_timeout_ms: default_command_timeout_ms(),
            stop_grace_ms: default_stop_grace_ms(),
            changedir_on_read: true,
        }
    }
}

impl SisConfig {
    /// Marker scan wait budget.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Grace period for process shutdown.
    #[must_use]
    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }
}

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .sis-driver.toml
        search_paths.push(PathBuf::from(".sis-driver.toml"));

        // 2. User config directory: ~/.config/sis-driver/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("sis-driver").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load(&self) -> Result<SisConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(SisConfig::default())
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &PathBuf) -> Result<SisConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
