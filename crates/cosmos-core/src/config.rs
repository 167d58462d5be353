//! Configuration model.
//!
//! Only static assets, logging and rendering are configurable. The narrative
//! timing lives in [`crate::timing`] and is deliberately not part of this file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioAsset, DEFAULT_AUDIO_PATH, DEFAULT_VOLUME};
use crate::error::{CosmosError, Result};

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmosConfig {
    pub audio: AudioConfig,
    pub logging: LoggingConfig,
    pub scene: SceneConfig,
}

impl CosmosConfig {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(CosmosError::config(format!(
                "audio.volume must be within 0.0..=1.0, got {}",
                self.audio.volume
            )));
        }
        if self.audio.player.trim().is_empty() {
            return Err(CosmosError::config("audio.player must not be empty"));
        }
        if self.scene.star_count == 0 {
            return Err(CosmosError::config("scene.star_count must be positive"));
        }
        if !(1..=120).contains(&self.scene.frame_rate) {
            return Err(CosmosError::config(format!(
                "scene.frame_rate must be within 1..=120, got {}",
                self.scene.frame_rate
            )));
        }
        Ok(())
    }
}

/// `[audio]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// When false, runs use a silent player.
    pub enabled: bool,
    pub path: PathBuf,
    pub volume: f32,
    pub looping: bool,
    /// Command-line player used for playback.
    pub player: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(DEFAULT_AUDIO_PATH),
            volume: DEFAULT_VOLUME,
            looping: true,
            player: "ffplay".to_string(),
        }
    }
}

impl AudioConfig {
    pub fn asset(&self) -> AudioAsset {
        AudioAsset {
            path: self.path.clone(),
            volume: self.volume,
            looping: self.looping,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"cosmos_core=debug"`.
    pub filter: String,
    /// Log directory; defaults to `logs/` next to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}

/// `[scene]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed star-field seed; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub star_count: usize,
    pub frame_rate: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            star_count: 600,
            frame_rate: 20,
        }
    }
}
