use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use cosmos_application::{EntryUseCase, TokioClock};
use cosmos_infrastructure::FileAudioPreloader;
use cosmos_infrastructure::logging::ConsoleLogging;

use super::utils::AppContext;
use crate::tui::{self, App, Starfield};

pub async fn execute(
    config_override: Option<&Path>,
    mute: bool,
    worry: Option<String>,
) -> Result<()> {
    let context = AppContext::bootstrap(config_override, ConsoleLogging::Off)?;
    let asset = context.config.audio.asset();
    let scene = &context.config.scene;

    let seed = scene.seed.unwrap_or_else(rand::random);
    tracing::debug!("[Tui] Star-field seed {}", seed);

    let app = App::new(
        EntryUseCase::new(Arc::new(FileAudioPreloader::new()), asset.clone()),
        context.audio_backend(mute),
        asset,
        Arc::new(TokioClock::new()),
        Starfield::generate(seed, scene.star_count),
    );

    tui::run(app, scene.frame_rate, worry).await
}
