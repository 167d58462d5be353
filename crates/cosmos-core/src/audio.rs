//! Audio contracts and the run-scoped audio handle.
//!
//! The playback engine itself lives outside the core. The core only needs to
//! open a player for an asset, command it, and be sure it is stopped and
//! unloaded when a run ends, whichever way it ends.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default location of the background music.
pub const DEFAULT_AUDIO_PATH: &str = "assets/audio/hopeful-background.mp3";

/// Default playback volume.
pub const DEFAULT_VOLUME: f32 = 0.6;

/// A playable audio asset and how to play it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAsset {
    pub path: PathBuf,
    /// Linear volume in `0.0..=1.0`.
    pub volume: f32,
    pub looping: bool,
}

impl Default for AudioAsset {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_AUDIO_PATH),
            volume: DEFAULT_VOLUME,
            looping: true,
        }
    }
}

/// A state change reported by the player itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Stop,
}

/// One opened audio resource.
pub trait AudioPlayer: Send {
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn stop(&mut self);

    fn is_playing(&self) -> bool;

    fn volume(&self) -> f32;

    /// Ramps the volume from `from` to `to` over `over`.
    fn fade(&mut self, from: f32, to: f32, over: Duration);

    /// Frees the resource. The player is unusable afterwards.
    fn unload(&mut self);

    /// Drains state changes the player raised on its own since the last call
    /// (an external pause, the end of a non-looping track, ...).
    fn take_events(&mut self) -> Vec<PlaybackEvent> {
        Vec::new()
    }
}

/// Opens players for assets.
pub trait AudioBackend: Send + Sync {
    fn open(&self, asset: &AudioAsset) -> Result<Box<dyn AudioPlayer>>;
}

/// Warms up an asset before a run so playback can start immediately.
#[async_trait]
pub trait AudioPreloader: Send + Sync {
    async fn preload(&self, asset: &AudioAsset) -> Result<()>;
}

/// Exclusive, run-scoped ownership of an audio player.
///
/// The player is stopped and unloaded exactly once: on [`AudioHandle::release`]
/// or, failing that, when the handle is dropped.
pub struct AudioHandle {
    player: Option<Box<dyn AudioPlayer>>,
    playing: bool,
}

impl AudioHandle {
    /// Opens a player for `asset` through `backend`.
    pub fn acquire(backend: &dyn AudioBackend, asset: &AudioAsset) -> Result<Self> {
        let player = backend.open(asset)?;
        tracing::debug!("[Audio] Acquired player for {}", asset.path.display());
        Ok(Self::from_player(player))
    }

    /// Wraps an already opened player.
    pub fn from_player(player: Box<dyn AudioPlayer>) -> Self {
        let playing = player.is_playing();
        Self {
            player: Some(player),
            playing,
        }
    }

    /// Starts playback.
    pub fn play(&mut self) -> Result<()> {
        let Some(player) = self.player.as_mut() else {
            return Ok(());
        };
        let outcome = player.play();
        self.playing = player.is_playing();
        outcome
    }

    /// Pauses when the player is playing, plays otherwise.
    ///
    /// The decision is taken from the player's own state, and the returned
    /// value is the state the player reports afterwards.
    pub fn toggle(&mut self) -> Result<bool> {
        let Some(player) = self.player.as_mut() else {
            return Ok(false);
        };
        let outcome = if player.is_playing() {
            player.pause()
        } else {
            player.play()
        };
        self.playing = player.is_playing();
        outcome.map(|_| self.playing)
    }

    /// Applies a state change reported by the player.
    pub fn observe(&mut self, event: PlaybackEvent) {
        self.playing = matches!(event, PlaybackEvent::Play);
    }

    /// Pulls pending notifications from the player and applies them.
    pub fn sync(&mut self) {
        let events = match self.player.as_mut() {
            Some(player) => player.take_events(),
            None => return,
        };
        for event in events {
            self.observe(event);
        }
    }

    /// Whether playback is believed to be running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Fades from the current volume down to silence.
    pub fn fade_out(&mut self, over: Duration) {
        if let Some(player) = self.player.as_mut() {
            let from = player.volume();
            player.fade(from, 0.0, over);
        }
    }

    /// Stops and unloads the player.
    pub fn release(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.stop();
            player.unload();
            self.playing = false;
            tracing::debug!("[Audio] Player released");
        }
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("loaded", &self.player.is_some())
            .field("playing", &self.playing)
            .finish()
    }
}
