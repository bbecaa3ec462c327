//! Session settings
//!
//! Loaded from a JSON file on native and from LocalStorage on the web.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load or store settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("browser storage unavailable")]
    StorageUnavailable,
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Platforms built per session
    pub platform_count: usize,
    /// Fixed chain seed; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Input ===
    /// Shortest press that still jumps (seconds)
    pub min_charge_secs: f32,
    /// Hold time that fills the charge meter (seconds)
    pub charge_meter_full_secs: f32,

    // === Camera ===
    /// Distance from player to camera
    pub camera_distance: f32,
    /// Follow animation length (seconds)
    pub camera_follow_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform_count: DEFAULT_PLATFORM_COUNT,
            seed: None,

            min_charge_secs: MIN_CHARGE_SECS,
            charge_meter_full_secs: CHARGE_METER_FULL_SECS,

            camera_distance: CAMERA_DISTANCE,
            camera_follow_secs: CAMERA_FOLLOW_SECS,
        }
    }
}

impl Settings {
    /// Settings with a fixed seed, everything else default
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        };
        if self.platform_count > MAX_PLATFORM_COUNT {
            return Err(ConfigError::Invalid {
                field: "platform_count",
                reason: format!(
                    "must be at most {MAX_PLATFORM_COUNT}, got {}",
                    self.platform_count
                ),
            });
        }
        positive("min_charge_secs", self.min_charge_secs)?;
        positive("charge_meter_full_secs", self.charge_meter_full_secs)?;
        positive("camera_distance", self.camera_distance)?;
        if !(self.camera_follow_secs.is_finite() && self.camera_follow_secs >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera_follow_secs",
                reason: format!("must be zero or more, got {}", self.camera_follow_secs),
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to the JSON accepted by [`Self::from_json`]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "hop_chain_settings";

    /// Load settings from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), ConfigError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(ConfigError::StorageUnavailable)?;

        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| ConfigError::StorageUnavailable)?;
        log::info!("Settings saved");
        Ok(())
    }
}
