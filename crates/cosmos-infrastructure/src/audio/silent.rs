use std::time::Duration;

use cosmos_core::audio::{AudioAsset, AudioBackend, AudioPlayer};
use cosmos_core::{CosmosError, Result};

/// A backend that plays nothing.
///
/// Used when audio is disabled and for deterministic runs. A failing
/// instance refuses to open anything, which is how a missing or blocked
/// audio device looks to the sequencer.
#[derive(Debug, Clone, Default)]
pub struct SilentAudioBackend {
    fail_open: bool,
}

impl SilentAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every `open` fails.
    pub fn failing() -> Self {
        Self { fail_open: true }
    }
}

impl AudioBackend for SilentAudioBackend {
    fn open(&self, asset: &AudioAsset) -> Result<Box<dyn AudioPlayer>> {
        if self.fail_open {
            return Err(CosmosError::audio(format!(
                "no audio device for {}",
                asset.path.display()
            )));
        }
        Ok(Box::new(SilentPlayer::new(asset.volume)))
    }
}

/// Tracks playback state without producing sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SilentPlayer {
    playing: bool,
    volume: f32,
    unloaded: bool,
}

impl SilentPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            playing: false,
            volume,
            unloaded: false,
        }
    }
}

impl AudioPlayer for SilentPlayer {
    fn play(&mut self) -> Result<()> {
        if self.unloaded {
            return Err(CosmosError::audio("player was unloaded"));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn fade(&mut self, _from: f32, to: f32, _over: Duration) {
        self.volume = to;
    }

    fn unload(&mut self) {
        self.playing = false;
        self.unloaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_player_lifecycle() {
        let backend = SilentAudioBackend::new();
        let mut player = backend.open(&AudioAsset::default()).unwrap();

        player.play().unwrap();
        assert!(player.is_playing());
        player.pause().unwrap();
        assert!(!player.is_playing());

        player.fade(0.6, 0.0, Duration::from_secs(2));
        assert_eq!(player.volume(), 0.0);

        player.unload();
        assert!(player.play().is_err());
    }

    #[test]
    fn test_failing_backend() {
        let err = SilentAudioBackend::failing()
            .open(&AudioAsset::default())
            .err().unwrap();
        assert!(err.is_audio());
    }
}
