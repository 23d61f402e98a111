//! Stage settings
//!
//! Loaded from a JSON file next to the project; missing fields fall back to
//! the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH, TICK_HZ};
use crate::sim::Playfield;

/// Failure to load settings from disk
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid stage size {width}x{height}")]
    InvalidStage { width: f64, height: f64 },
    #[error("tick rate {0} Hz outside 1..=1000 Hz")]
    InvalidTickRate(f64),
}

/// Accepted scheduler rates for the native driver
pub const MIN_TICK_HZ: f64 = 1.0;
pub const MAX_TICK_HZ: f64 = 1000.0;

/// Stage and driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Stage width in stage units
    pub stage_width: f64,
    /// Stage height in stage units
    pub stage_height: f64,
    /// Seed for random targets (None = seed from entropy)
    pub rng_seed: Option<u64>,
    /// Scheduler rate used by the native driver
    pub tick_hz: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stage_width: STAGE_WIDTH,
            stage_height: STAGE_HEIGHT,
            rng_seed: None,
            tick_hz: TICK_HZ,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(self.stage_width) && ok(self.stage_height)) {
            return Err(SettingsError::InvalidStage {
                width: self.stage_width,
                height: self.stage_height,
            });
        }
        if !(MIN_TICK_HZ..=MAX_TICK_HZ).contains(&self.tick_hz) {
            return Err(SettingsError::InvalidTickRate(self.tick_hz));
        }
        Ok(())
    }

    /// The stage rectangle sprites move within
    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.stage_width, self.stage_height)
    }

    /// Seconds between scheduler ticks; out-of-range rates use the default
    pub fn tick_interval_secs(&self) -> f64 {
        if (MIN_TICK_HZ..=MAX_TICK_HZ).contains(&self.tick_hz) {
            1.0 / self.tick_hz
        } else {
            1.0 / TICK_HZ
        }
    }
}
