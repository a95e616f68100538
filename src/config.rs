//! Kitchen configuration parsing and validation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::models::Station;
use crate::{AppError, Result};

fn default_toast_slices() -> u32 {
    2
}

fn default_bacon_slices() -> u32 {
    3
}

fn default_stage_ms() -> u64 {
    3000
}

/// Kitchen configuration parsed from a TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct KitchenConfig {
    /// Slices of bread toasted per order.
    #[serde(default = "default_toast_slices")]
    pub toast_slices: u32,
    /// Slices of bacon fried per order.
    #[serde(default = "default_bacon_slices")]
    pub bacon_slices: u32,
    /// Toasting time in milliseconds.
    #[serde(default = "default_stage_ms")]
    pub toast_ms: u64,
    /// Frying time per bacon side in milliseconds.
    #[serde(default = "default_stage_ms")]
    pub bacon_side_ms: u64,
    /// Deadline for a whole order; 0 means no timeout.
    #[serde(default)]
    pub order_timeout_ms: u64,
    /// Cancel the surviving station when the other one fails.
    #[serde(default)]
    pub cancel_on_failure: bool,
    /// Simulated station failures, keyed by station.
    #[serde(default)]
    pub faults: HashMap<Station, String>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            toast_slices: default_toast_slices(),
            bacon_slices: default_bacon_slices(),
            toast_ms: default_stage_ms(),
            bacon_side_ms: default_stage_ms(),
            order_timeout_ms: 0,
            cancel_on_failure: false,
            faults: HashMap::new(),
        }
    }
}

impl KitchenConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Toasting duration.
    #[must_use]
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    /// Duration of one bacon side.
    #[must_use]
    pub fn bacon_side_duration(&self) -> Duration {
        Duration::from_millis(self.bacon_side_ms)
    }

    /// Order deadline, if one is configured.
    #[must_use]
    pub fn order_timeout(&self) -> Option<Duration> {
        (self.order_timeout_ms > 0).then(|| Duration::from_millis(self.order_timeout_ms))
    }

    fn validate(&self) -> Result<()> {
        if let Some((station, _)) = self
            .faults
            .iter()
            .find(|(_, reason)| reason.trim().is_empty())
        {
            return Err(AppError::Config(format!(
                "fault reason for {station} must not be empty"
            )));
        }
        Ok(())
    }
}
