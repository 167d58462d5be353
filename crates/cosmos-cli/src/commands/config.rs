use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use cosmos_infrastructure::{ConfigService, CosmosPaths};

use super::utils::load_config;

pub fn show(config_override: Option<&Path>) -> Result<()> {
    let paths = CosmosPaths::resolve(config_override)?;
    let config = load_config(&paths)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;

    let origin = if paths.config_file().exists() {
        paths.config_file().display().to_string()
    } else {
        format!("{} (not found, defaults)", paths.config_file().display())
    };
    println!("{} {}", "#".dimmed(), origin.dimmed());
    print!("{}", rendered);
    Ok(())
}

pub fn init(config_override: Option<&Path>) -> Result<()> {
    let paths = CosmosPaths::resolve(config_override)?;
    let service = ConfigService::new(paths.config_file());

    if service.init().context("Failed to write configuration")? {
        println!("{} {}", "Created".green(), paths.config_file().display());
    } else {
        println!(
            "{} {} already exists",
            "Skipped".yellow(),
            paths.config_file().display()
        );
    }
    Ok(())
}

pub fn path(config_override: Option<&Path>) -> Result<()> {
    let paths = CosmosPaths::resolve(config_override)?;
    println!("{}", paths.config_file().display());
    Ok(())
}
