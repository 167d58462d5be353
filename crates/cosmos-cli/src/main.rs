use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cosmos_core::Scale;

mod commands;
mod tui;

#[derive(Parser)]
#[command(name = "cosmos")]
#[command(version, about = "COSMOS - a guided meditation from Earth to the edge of the universe", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive meditation (default)
    Run {
        /// Meditate without music
        #[arg(long)]
        mute: bool,
        /// Skip the entry screen with this worry
        #[arg(long)]
        worry: Option<String>,
    },
    /// Narrate a meditation in the terminal without the full-screen view
    Play {
        /// What is troubling you right now
        worry: String,
        /// Meditate without music
        #[arg(long)]
        mute: bool,
    },
    /// Print the schedule of a run
    Timeline {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the guide script for one scale
    Guide {
        /// earth, solar, galaxy or universe
        scale: Scale,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file if none exists
    Init,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Run {
        mute: false,
        worry: None,
    }) {
        Commands::Run { mute, worry } => commands::run::execute(config_path, mute, worry).await?,
        Commands::Play { worry, mute } => commands::play::execute(config_path, &worry, mute).await?,
        Commands::Timeline { json } => commands::timeline::execute(json)?,
        Commands::Guide { scale } => commands::guide::execute(scale),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(config_path)?,
            ConfigAction::Init => commands::config::init(config_path)?,
            ConfigAction::Path => commands::config::path(config_path)?,
        },
    }

    Ok(())
}
