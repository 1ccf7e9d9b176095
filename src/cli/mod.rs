//! CLI Module
//!
//! Command-line interface for exercising the audio facade against the
//! simulated host.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Audio Cue - scripted playback of the audio facade
#[derive(Parser, Debug)]
#[command(name = "audio-cue")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a script of facade calls against a simulated page
    #[command(name = "simulate")]
    Simulate {
        /// Steps: load, play:<position>:<duration>, wait:<ms>, detach, attach
        #[arg(required = true)]
        steps: Vec<String>,

        /// Start with no media element in the page
        #[arg(long)]
        absent: bool,

        /// Refuse every play request, like an autoplay policy
        #[arg(long)]
        block_play: bool,

        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective config
    #[command(name = "config")]
    Config {
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
