//! Audio Cue - Audio Control Facade
//!
//! Drives a single host media element, looked up by the identifier
//! `audio-player` on every call, through two operations:
//! 1. `load_audio` - reset the element so it reloads its source
//! 2. `play_from` - seek, play, and pause automatically after a duration
//!
//! # Architecture
//!
//! - `host`: the injected platform interface (element lookup, deferred tasks)
//! - `facade`: the two operations, written against `host` only
//! - `sim`: a simulated host with a virtual clock, used by tests and the CLI
//! - `web`: the browser host and JavaScript exports (wasm32 only)

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod host;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::CueConfig;
pub use error::{CueError, Result};
pub use facade::{AudioFacade, PlaybackRequest};
pub use host::{MediaElement, MediaHost};
