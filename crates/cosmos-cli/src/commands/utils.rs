use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use cosmos_core::audio::AudioBackend;
use cosmos_core::config::CosmosConfig;
use cosmos_infrastructure::logging::{ConsoleLogging, init_logging};
use cosmos_infrastructure::{ConfigService, CosmosPaths, ExternalPlayerBackend, SilentAudioBackend};
use tracing_appender::non_blocking::WorkerGuard;

/// Resolved paths and loaded configuration for one invocation.
pub struct AppContext {
    pub paths: CosmosPaths,
    pub config: CosmosConfig,
    /// Keeps the log writer alive.
    _log_guard: WorkerGuard,
}

impl AppContext {
    /// Loads the configuration and installs logging.
    pub fn bootstrap(config_override: Option<&Path>, console: ConsoleLogging) -> Result<Self> {
        let paths = CosmosPaths::resolve(config_override)?;
        let config = load_config(&paths)?;

        let log_guard = init_logging(&config.logging, &paths.log_dir(), console)
            .context("Failed to initialize logging")?;
        tracing::info!(
            "[Bootstrap] cosmos v{} using {}",
            env!("CARGO_PKG_VERSION"),
            paths.config_file().display()
        );

        Ok(Self {
            paths,
            config,
            _log_guard: log_guard,
        })
    }

    /// The backend for this run: silent when muted or disabled.
    pub fn audio_backend(&self, mute: bool) -> Arc<dyn AudioBackend> {
        select_backend(&self.config, mute)
    }
}

pub fn load_config(paths: &CosmosPaths) -> Result<CosmosConfig> {
    ConfigService::new(paths.config_file())
        .load()
        .with_context(|| format!("Invalid configuration at {}", paths.config_file().display()))
}

pub fn select_backend(config: &CosmosConfig, mute: bool) -> Arc<dyn AudioBackend> {
    if mute || !config.audio.enabled {
        tracing::info!("[Bootstrap] Audio muted");
        return Arc::new(SilentAudioBackend::new());
    }
    match ExternalPlayerBackend::new(config.audio.player.clone()) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            tracing::warn!("[Bootstrap] {}, continuing without music", e);
            Arc::new(SilentAudioBackend::failing())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmos_core::audio::AudioAsset;

    #[test]
    fn test_muted_backend_is_silent_but_working() {
        let backend = select_backend(&CosmosConfig::default(), true);
        let mut player = backend.open(&AudioAsset::default()).unwrap();
        player.play().unwrap();
        assert!(player.is_playing());
    }

    #[test]
    fn test_unknown_player_falls_back_to_failing_backend() {
        let mut config = CosmosConfig::default();
        config.audio.player = "winamp".to_string();
        let backend = select_backend(&config, false);
        assert!(backend.open(&AudioAsset::default()).is_err());
    }

    #[test]
    fn test_load_config_reports_invalid_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[audio]\nvolume = 3.0\n").unwrap();

        let err = load_config(&CosmosPaths::with_config_file(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
