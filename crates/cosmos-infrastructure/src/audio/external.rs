use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::str::FromStr;
use std::time::{Duration, Instant};

use cosmos_core::audio::{AudioAsset, AudioBackend, AudioPlayer, PlaybackEvent};
use cosmos_core::{CosmosError, Result};

/// Command-line players COSMOS knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Ffplay,
    Mpv,
    Afplay,
}

impl PlayerKind {
    pub fn program(self) -> &'static str {
        match self {
            PlayerKind::Ffplay => "ffplay",
            PlayerKind::Mpv => "mpv",
            PlayerKind::Afplay => "afplay",
        }
    }

    /// Whether the player can loop a track by itself.
    pub fn loops_natively(self) -> bool {
        !matches!(self, PlayerKind::Afplay)
    }

    /// Arguments for playing `asset`.
    pub fn args(self, asset: &AudioAsset) -> Vec<String> {
        let path = asset.path.to_string_lossy().to_string();
        let percent = (asset.volume.clamp(0.0, 1.0) * 100.0).round() as u32;
        match self {
            PlayerKind::Ffplay => {
                let mut args = vec![
                    "-nodisp".to_string(),
                    "-autoexit".to_string(),
                    "-loglevel".to_string(),
                    "quiet".to_string(),
                    "-volume".to_string(),
                    percent.to_string(),
                ];
                if asset.looping {
                    args.push("-loop".to_string());
                    args.push("0".to_string());
                }
                args.push(path);
                args
            }
            PlayerKind::Mpv => {
                let mut args = vec![
                    "--no-video".to_string(),
                    "--really-quiet".to_string(),
                    format!("--volume={}", percent),
                ];
                if asset.looping {
                    args.push("--loop-file=inf".to_string());
                }
                args.push(path);
                args
            }
            PlayerKind::Afplay => vec![
                "-v".to_string(),
                format!("{:.2}", asset.volume.clamp(0.0, 1.0)),
                path,
            ],
        }
    }
}

impl FromStr for PlayerKind {
    type Err = CosmosError;

    /// Accepts a bare name or a path to one of the known programs.
    fn from_str(s: &str) -> Result<Self> {
        let name = Path::new(s)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match name.as_str() {
            "ffplay" => Ok(PlayerKind::Ffplay),
            "mpv" => Ok(PlayerKind::Mpv),
            "afplay" => Ok(PlayerKind::Afplay),
            _ => Err(CosmosError::config(format!(
                "unsupported audio player '{}', expected ffplay, mpv or afplay",
                s
            ))),
        }
    }
}

/// Opens players backed by an external process.
#[derive(Debug, Clone)]
pub struct ExternalPlayerBackend {
    kind: PlayerKind,
    program: String,
}

impl ExternalPlayerBackend {
    /// `program` is the configured `audio.player`, a name or a path.
    pub fn new(program: impl Into<String>) -> Result<Self> {
        let program = program.into();
        let kind = program.parse()?;
        Ok(Self { kind, program })
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Checks if `program` can be found in PATH.
    pub fn is_available(program: &str) -> bool {
        if Path::new(program).is_absolute() {
            return Path::new(program).is_file();
        }

        #[cfg(unix)]
        let check_cmd = "which";
        #[cfg(windows)]
        let check_cmd = "where";

        Command::new(check_cmd)
            .arg(program)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl AudioBackend for ExternalPlayerBackend {
    fn open(&self, asset: &AudioAsset) -> Result<Box<dyn AudioPlayer>> {
        if !asset.path.is_file() {
            return Err(CosmosError::asset_not_found(asset.path.display().to_string()));
        }
        if !Self::is_available(&self.program) {
            return Err(CosmosError::audio(format!(
                "{} not found in PATH",
                self.program
            )));
        }
        tracing::debug!(
            "[Audio] Opening {} with {}",
            asset.path.display(),
            self.program
        );
        Ok(Box::new(ExternalPlayer::new(
            self.kind,
            self.program.clone(),
            asset.clone(),
        )))
    }
}

/// One track played by a child process.
///
/// External players cannot pause or ramp volume from outside, so pausing
/// ends the process and resuming starts the track again, and a fade ends
/// playback once its duration has elapsed.
#[derive(Debug)]
pub struct ExternalPlayer {
    kind: PlayerKind,
    program: String,
    asset: AudioAsset,
    child: Option<Child>,
    fade_ends: Option<Instant>,
    volume: f32,
    unloaded: bool,
    pending: Vec<PlaybackEvent>,
}

impl ExternalPlayer {
    fn new(kind: PlayerKind, program: String, asset: AudioAsset) -> Self {
        let volume = asset.volume;
        Self {
            kind,
            program,
            asset,
            child: None,
            fade_ends: None,
            volume,
            unloaded: false,
            pending: Vec::new(),
        }
    }

    fn spawn(&mut self) -> Result<()> {
        let child = Command::new(&self.program)
            .args(self.kind.args(&self.asset))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CosmosError::audio(format!("Failed to start {}: {}", self.program, e)))?;
        tracing::debug!("[Audio] {} started (pid {})", self.program, child.id());
        self.child = Some(child);
        Ok(())
    }

    fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!("[Audio] {} already exited: {}", self.program, e);
            }
            // Reap to avoid a zombie
            let _ = child.wait();
        }
    }
}

impl AudioPlayer for ExternalPlayer {
    fn play(&mut self) -> Result<()> {
        if self.unloaded {
            return Err(CosmosError::audio("player was unloaded"));
        }
        if self.child.is_some() {
            return Ok(());
        }
        self.spawn()
    }

    fn pause(&mut self) -> Result<()> {
        self.kill();
        Ok(())
    }

    fn stop(&mut self) {
        self.fade_ends = None;
        self.kill();
    }

    fn is_playing(&self) -> bool {
        self.child.is_some()
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn fade(&mut self, _from: f32, to: f32, over: Duration) {
        self.volume = to;
        self.fade_ends = Some(Instant::now() + over);
    }

    fn unload(&mut self) {
        self.kill();
        self.unloaded = true;
    }

    fn take_events(&mut self) -> Vec<PlaybackEvent> {
        if let Some(ends) = self.fade_ends
            && Instant::now() >= ends
        {
            self.fade_ends = None;
            if self.child.is_some() {
                self.kill();
                self.pending.push(PlaybackEvent::Stop);
            }
        }

        let exited = match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(Some(status))) => {
                tracing::debug!("[Audio] {} exited: {}", self.program, status);
                true
            }
            Some(Ok(None)) | None => false,
            Some(Err(e)) => {
                tracing::warn!("[Audio] Lost track of {}: {}", self.program, e);
                true
            }
        };

        if exited {
            self.child = None;
            if self.asset.looping && !self.kind.loops_natively() && !self.unloaded {
                if let Err(e) = self.spawn() {
                    tracing::warn!("[Audio] Could not restart loop: {}", e);
                    self.pending.push(PlaybackEvent::Stop);
                }
            } else {
                self.pending.push(PlaybackEvent::Stop);
            }
        }

        std::mem::take(&mut self.pending)
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        self.kill();
    }
}
