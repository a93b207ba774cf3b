//! Engine configuration loaded from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{pool_constants, preview_constants};
use crate::error::{EngineError, EngineResult};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of particle slots in the arena
    pub pool_capacity: usize,
    /// `env_logger` filter used by the binary when `RUST_LOG` is unset
    pub log_filter: String,
    /// Scene-mode peak preview settings
    pub preview: PreviewConfig,
    /// Headless playback settings
    pub playback: PlaybackConfig,
}

/// Peak preview fast-forward settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub step: f32,
    pub max_steps: u32,
    pub min_peak_offset: f32,
    pub max_peak_offset: f32,
}

/// Fixed-step playback settings for the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub fixed_dt: f32,
    pub duration: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_capacity: pool_constants::DEFAULT_CAPACITY,
            log_filter: "info,firework_engine=debug".to_string(),
            preview: PreviewConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            step: preview_constants::STEP,
            max_steps: preview_constants::MAX_STEPS,
            min_peak_offset: preview_constants::MIN_PEAK_OFFSET,
            max_peak_offset: preview_constants::MAX_PEAK_OFFSET,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            duration: 6.0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> EngineResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> EngineResult<()> {
        if self.pool_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "pool_capacity must be at least 1".to_string(),
            ));
        }
        if !(self.preview.step > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "preview.step must be positive, got {}",
                self.preview.step
            )));
        }
        if self.preview.min_peak_offset > self.preview.max_peak_offset {
            return Err(EngineError::InvalidConfig(format!(
                "preview.min_peak_offset ({}) exceeds preview.max_peak_offset ({})",
                self.preview.min_peak_offset, self.preview.max_peak_offset
            )));
        }
        if !(self.playback.fixed_dt > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "playback.fixed_dt must be positive, got {}",
                self.playback.fixed_dt
            )));
        }
        Ok(())
    }
}
