//! Cue Transport State Machine
//!
//! Records the commands the facade has issued to the media element as a
//! phase machine: Idle -> Seeking -> Playing -> PauseScheduled -> Paused.
//!
//! The element's real play state belongs to the host. This is a ledger of
//! what was asked for; the facade never consults it before acting.

use std::fmt;

use log::debug;

/// Phase of the last command issued to the element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CuePhase {
    /// Nothing issued yet, or the element was just reset
    #[default]
    Idle,
    /// Playback position has been set
    Seeking,
    /// Play has been requested
    Playing,
    /// Play requested and at least one automatic pause is pending
    PauseScheduled,
    /// An automatic pause has fired
    Paused,
}

impl fmt::Display for CuePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CuePhase::Idle => write!(f, "Idle"),
            CuePhase::Seeking => write!(f, "Seeking"),
            CuePhase::Playing => write!(f, "Playing"),
            CuePhase::PauseScheduled => write!(f, "PauseScheduled"),
            CuePhase::Paused => write!(f, "Paused"),
        }
    }
}

/// Tracks issued commands and outstanding pause timers
///
/// Every `play_from` schedules its own pause, so several may be pending at
/// once. The phase always reflects the most recent event.
#[derive(Debug, Clone, Default)]
pub struct CueTransport {
    phase: CuePhase,

    /// Last position requested by a seek, in seconds
    last_position: Option<f64>,

    /// Pause timers scheduled but not yet fired
    pending_pauses: usize,

    load_count: u64,
    play_count: u64,
    pause_count: u64,
}

impl CueTransport {
    /// Create a transport in the Idle phase
    ///
    /// # Example
    /// ```
    /// use audio_cue::engine::{CuePhase, CueTransport};
    /// let transport = CueTransport::new();
    /// assert_eq!(transport.phase(), CuePhase::Idle);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Command Events
    // ========================================================================

    /// The element was told to reset its media pipeline
    ///
    /// Pending pauses are unaffected: they still fire later.
    pub fn on_load(&mut self) {
        self.load_count += 1;
        self.phase = CuePhase::Idle;
        debug!("[CUE] Load #{}", self.load_count);
    }

    /// The element was told to move to `position` seconds
    pub fn on_seek(&mut self, position: f64) {
        self.last_position = Some(position);
        self.phase = CuePhase::Seeking;
        debug!("[CUE] Seek to {:.3}s", position);
    }

    /// The element was told to start playing
    pub fn on_play(&mut self) {
        self.play_count += 1;
        self.phase = CuePhase::Playing;
        debug!("[CUE] Play #{}", self.play_count);
    }

    /// A pause timer was scheduled
    ///
    /// # Example
    /// ```
    /// use audio_cue::engine::{CuePhase, CueTransport};
    /// let mut transport = CueTransport::new();
    /// transport.on_seek(30.0);
    /// transport.on_play();
    /// transport.on_pause_scheduled(5000.0);
    /// assert_eq!(transport.phase(), CuePhase::PauseScheduled);
    /// assert_eq!(transport.pending_pauses(), 1);
    /// ```
    pub fn on_pause_scheduled(&mut self, delay_ms: f64) {
        self.pending_pauses += 1;
        self.phase = CuePhase::PauseScheduled;
        debug!(
            "[CUE] Pause scheduled in {}ms ({} pending)",
            delay_ms, self.pending_pauses
        );
    }

    /// A scheduled pause fired and the element was told to pause
    pub fn on_pause_fired(&mut self) {
        self.pending_pauses = self.pending_pauses.saturating_sub(1);
        self.pause_count += 1;
        self.phase = CuePhase::Paused;
        debug!("[CUE] Paused ({} still pending)", self.pending_pauses);
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn phase(&self) -> CuePhase {
        self.phase
    }

    /// Position of the most recent seek, if any
    pub fn last_position(&self) -> Option<f64> {
        self.last_position
    }

    pub fn pending_pauses(&self) -> usize {
        self.pending_pauses
    }

    pub fn is_pause_pending(&self) -> bool {
        self.pending_pauses > 0
    }

    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    pub fn play_count(&self) -> u64 {
        self.play_count
    }

    pub fn pause_count(&self) -> u64 {
        self.pause_count
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
