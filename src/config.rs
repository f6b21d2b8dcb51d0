//! Configuration management for Floodgate.

use serde::{Deserialize, Serialize};

use crate::error::{FloodgateError, Result};

/// Consistency mode for the counter store interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Best-effort read-then-write. Two concurrent calls for the same
    /// identifier may both observe `max_requests - 1` and both admit,
    /// temporarily over-admitting one request.
    #[default]
    Relaxed,
    /// A single atomic increment-with-ceiling store update. Requires the
    /// store to implement the conditional primitive.
    Strict,
}

/// Limiter configuration, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Window duration in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Maximum requests allowed per identifier per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u64,

    /// Store consistency mode
    #[serde(default)]
    pub mode: Mode,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            max_requests: default_max_requests(),
            mode: Mode::default(),
        }
    }
}

fn default_window_seconds() -> u64 {
    60
}

fn default_max_requests() -> u64 {
    5
}

impl LimiterConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: LimiterConfig = serde_yaml::from_str(yaml)
            .map_err(|e| FloodgateError::Config(format!("Failed to parse limiter config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// The window duration divides timestamps, so it must be nonzero. A zero
    /// request limit would deny every request and is rejected as a mistake.
    pub fn validate(&self) -> Result<()> {
        if self.window_seconds == 0 {
            return Err(FloodgateError::Config(
                "window_seconds must be greater than zero".to_string(),
            ));
        }
        if self.max_requests == 0 {
            return Err(FloodgateError::Config(
                "max_requests must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
