//! Audio Cue CLI
//!
//! Command-line front end for the audio facade's simulated host.

use clap::Parser;
use env_logger::Env;
use log::info;

use audio_cue::cli::{commands, Cli, Commands};
use audio_cue::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Audio Cue v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Audio Cue v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Simulate {
            steps,
            absent,
            block_play,
            config,
            json,
        } => commands::simulate(&steps, absent, block_play, config.as_deref(), json),
        Commands::Config { config } => commands::show_config(config.as_deref()),
    }
}
