use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use cosmos_application::{EntryUseCase, HeadlessPlayer, Narration, Narrator, TokioClock};
use cosmos_core::Session;
use cosmos_core::guide::script::WORRY_BANNER_TITLE;
use cosmos_infrastructure::FileAudioPreloader;
use cosmos_infrastructure::logging::ConsoleLogging;

use super::utils::AppContext;

/// Prints narration as plain terminal lines.
struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn narrate(&mut self, narration: Narration) {
        match narration {
            Narration::Stage { label, .. } => {
                println!();
                println!("{}", label.to_uppercase().bold().cyan());
            }
            Narration::WorryBanner(worry) => {
                println!(
                    "{} {}",
                    format!("{}:", WORRY_BANNER_TITLE).dimmed(),
                    worry.yellow()
                );
            }
            Narration::GuideLine { text, .. } => println!("  {}", text),
            Narration::GuideReflection { text, .. } => println!("  {}", text.italic()),
            Narration::ClosingMessage {
                text, worry_recall, ..
            } => {
                if let Some(recall) = worry_recall {
                    println!();
                    println!("{}", recall.dimmed());
                }
                println!("  {}", text.bold());
            }
            Narration::Completed(note) => {
                println!();
                println!("{}", note.green());
            }
            Narration::Silent => println!("{}", "(music unavailable, continuing in silence)".dimmed()),
        }
    }
}

pub async fn execute(config_override: Option<&Path>, worry: &str, mute: bool) -> Result<()> {
    let context = AppContext::bootstrap(config_override, ConsoleLogging::Warnings)?;
    let asset = context.config.audio.asset();

    let mut session = Session::new();
    let entry = EntryUseCase::new(Arc::new(FileAudioPreloader::new()), asset.clone());
    entry.submit(&mut session, worry).await?;

    let player = HeadlessPlayer::new(TokioClock::new(), context.audio_backend(mute), asset);
    let mut narrator = ConsoleNarrator;

    tokio::select! {
        route = player.play(&mut session, &mut narrator) => {
            tracing::info!("[Play] Run finished, next route {}", route);
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("{}", "Meditation interrupted".dimmed());
            tracing::info!("[Play] Interrupted");
        }
    }
    Ok(())
}
