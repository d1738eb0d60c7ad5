use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Text};
use skysense_core::{Config, provider_from_config};

use crate::menu::Menu;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skysense", version, about = "Fetch and compare 7-day city forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the interactive forecast menu (the default).
    Menu,

    /// Store the Weatherbit API key and connection settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Menu) {
            Command::Menu => run_menu().await,
            Command::Configure => configure(),
        }
    }
}

async fn run_menu() -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    tracing::debug!(?provider, timeout = ?config.timeout(), "starting menu");

    let mut menu = Menu::new(provider);
    let stdin = std::io::stdin();
    menu.run(stdin.lock(), std::io::stdout()).await
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("Weatherbit API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    ensure!(!api_key.trim().is_empty(), "API key cannot be empty");

    let base_url = Text::new("Forecast endpoint:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read forecast endpoint")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read request timeout")?;

    config.set_api_key(api_key.trim().to_string());
    config.base_url = Some(base_url.trim().to_string());
    config.timeout_secs = Some(timeout_secs);
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
