//! Binary crate for the `skysense` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The fetch / display / compare menu over stdin and stdout

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod menu;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so they never interleave with the menu.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
