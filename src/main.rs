//! lantern - lighting control for Razer keyboards
//!
//! Talks to the OpenRazer daemon over the session D-Bus.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lantern::Config;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Effects) => {
            commands::query::effects();
        }
        Some(Commands::Themes) => {
            commands::query::themes();
        }
        Some(Commands::List) => {
            commands::query::list().await?;
        }
        None => {
            let config = Config::load(cli.config.as_deref())?.overlay(cli.config_overrides());
            commands::lighting::run(&cli, &config).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "lantern=info,razer_device=info",
        1 => "lantern=debug,razer_device=debug",
        _ => "lantern=trace,razer_device=trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
