//! Simulated host
//!
//! An in-process [`MediaHost`] with a virtual millisecond clock. Timers only
//! fire when the clock is advanced, and every command the element receives
//! is appended to an event log. Used by the tests and by the `simulate` CLI
//! command.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::DEFAULT_ELEMENT_ID;
use crate::host::{DeferredTask, MediaElement, MediaHost};

/// Something the host observed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum HostEventKind {
    Reset,
    Seek(f64),
    Play,
    /// Play was requested but the playback policy refused it
    PlayBlocked,
    Pause,
    /// A deferred task was queued with this delay (as requested, unclamped)
    TimerScheduled(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostEvent {
    /// Virtual time the event happened at
    pub at_ms: f64,
    #[serde(flatten)]
    pub kind: HostEventKind,
}

struct Timer {
    due_ms: f64,
    seq: u64,
    task: DeferredTask,
}

struct SimState {
    now_ms: f64,
    element_id: String,
    attached: bool,
    block_play: bool,
    position: f64,
    playing: bool,
    load_count: u64,
    events: Vec<HostEvent>,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl SimState {
    fn record(&mut self, kind: HostEventKind) {
        self.events.push(HostEvent {
            at_ms: self.now_ms,
            kind,
        });
    }

    /// Move the clock forward, advancing the position while playing
    fn tick_to(&mut self, at_ms: f64) {
        if at_ms <= self.now_ms {
            return;
        }
        if self.playing {
            self.position += (at_ms - self.now_ms) / 1000.0;
        }
        self.now_ms = at_ms;
    }

    /// Remove the earliest timer due at or before `limit_ms`
    fn take_due(&mut self, limit_ms: Option<f64>) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| limit_ms.map_or(true, |limit| t.due_ms <= limit))
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(index))
    }
}

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_31: f64 = 2_147_483_648.0;

/// Delay a browser's `setTimeout` actually waits for a requested delay.
///
/// The number goes through WebIDL `long` conversion (ECMAScript ToInt32:
/// truncate, wrap modulo 2^32) and negative results are clamped to 0. So
/// NaN and infinities become 0, and 3e9 wraps negative and also becomes 0.
pub fn browser_timeout_ms(delay_ms: f64) -> f64 {
    if !delay_ms.is_finite() {
        return 0.0;
    }
    let wrapped = delay_ms.trunc().rem_euclid(TWO_POW_32);
    let signed = if wrapped >= TWO_POW_31 {
        wrapped - TWO_POW_32
    } else {
        wrapped
    };
    signed.max(0.0)
}

/// Simulated host document with at most one media element
#[derive(Clone)]
pub struct SimulatedHost {
    state: Rc<RefCell<SimState>>,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHost {
    /// A host whose document has no media element yet
    pub fn new() -> Self {
        Self::build(DEFAULT_ELEMENT_ID, false)
    }

    /// A host with an `audio-player` element attached
    pub fn with_element() -> Self {
        Self::build(DEFAULT_ELEMENT_ID, true)
    }

    /// A host with an element attached under a different identifier
    pub fn with_element_id(id: &str) -> Self {
        Self::build(id, true)
    }

    fn build(id: &str, attached: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState {
                now_ms: 0.0,
                element_id: id.to_string(),
                attached,
                block_play: false,
                position: 0.0,
                playing: false,
                load_count: 0,
                events: Vec::new(),
                timers: Vec::new(),
                next_seq: 0,
            })),
        }
    }

    // ========================================================================
    // Document Control
    // ========================================================================

    /// Put the element into the document
    pub fn attach(&self) {
        self.state.borrow_mut().attached = true;
    }

    /// Remove the element from the document.
    ///
    /// Handles obtained earlier keep working, so pending pauses still land.
    pub fn detach(&self) {
        self.state.borrow_mut().attached = false;
    }

    /// Refuse every play request, like an autoplay policy would
    pub fn set_block_play(&self, block: bool) {
        self.state.borrow_mut().block_play = block;
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Advance the clock by `ms`, firing every timer that falls due on the way
    pub fn advance(&self, ms: f64) {
        let target = self.state.borrow().now_ms + ms.max(0.0);
        loop {
            let timer = {
                let mut state = self.state.borrow_mut();
                let timer = state.take_due(Some(target));
                if let Some(timer) = &timer {
                    state.tick_to(timer.due_ms);
                }
                timer
            };
            match timer {
                Some(timer) => (timer.task)(),
                None => break,
            }
        }
        self.state.borrow_mut().tick_to(target);
    }

    /// Fire timers in due order until none are left
    pub fn run_until_idle(&self) {
        loop {
            let timer = {
                let mut state = self.state.borrow_mut();
                let timer = state.take_due(None);
                if let Some(timer) = &timer {
                    state.tick_to(timer.due_ms);
                }
                timer
            };
            match timer {
                Some(timer) => (timer.task)(),
                None => break,
            }
        }
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.state.borrow().events.clone()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    /// Current playback position in seconds
    pub fn position(&self) -> f64 {
        self.state.borrow().position
    }

    pub fn load_count(&self) -> u64 {
        self.state.borrow().load_count
    }

    /// Number of pause commands the element received
    pub fn pause_count(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|e| e.kind == HostEventKind::Pause)
            .count()
    }
}

impl MediaHost for SimulatedHost {
    type Element = SimElement;

    fn element_by_id(&self, id: &str) -> Option<SimElement> {
        let state = self.state.borrow();
        if state.attached && state.element_id == id {
            Some(SimElement {
                state: Rc::clone(&self.state),
            })
        } else {
            None
        }
    }

    fn schedule_after(&self, delay_ms: f64, task: DeferredTask) {
        let mut state = self.state.borrow_mut();
        let due_ms = state.now_ms + browser_timeout_ms(delay_ms);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.push(Timer { due_ms, seq, task });
        state.record(HostEventKind::TimerScheduled(delay_ms));
    }
}

/// Handle to the simulated element
#[derive(Clone)]
pub struct SimElement {
    state: Rc<RefCell<SimState>>,
}

impl MediaElement for SimElement {
    fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.load_count += 1;
        state.playing = false;
        state.position = 0.0;
        state.record(HostEventKind::Reset);
    }

    fn play(&self) {
        let mut state = self.state.borrow_mut();
        if state.block_play {
            state.record(HostEventKind::PlayBlocked);
        } else {
            state.playing = true;
            state.record(HostEventKind::Play);
        }
    }

    fn pause(&self) {
        let mut state = self.state.borrow_mut();
        state.playing = false;
        state.record(HostEventKind::Pause);
    }

    fn seek(&self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.position = seconds;
        state.record(HostEventKind::Seek(seconds));
    }
}
