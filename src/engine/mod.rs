//! Cue Engine Module
//!
//! Bookkeeping for the commands the facade issues.

pub mod transport;

pub use transport::{CuePhase, CueTransport};
