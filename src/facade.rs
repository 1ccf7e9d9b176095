//! Audio Control Facade
//!
//! Two operations over a host media element looked up by identifier on every
//! call: reset it, or play an excerpt that pauses itself after a duration.
//! When the element is missing both operations do nothing at all.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CueConfig;
use crate::engine::CueTransport;
use crate::host::{MediaElement, MediaHost};

/// Milliseconds per second, the unit conversion for the pause delay
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// An excerpt to play: where to start and how long to run, in seconds
///
/// Neither value is validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    pub position: f64,
    pub duration: f64,
}

impl PlaybackRequest {
    pub fn new(position: f64, duration: f64) -> Self {
        Self { position, duration }
    }

    /// Delay before the automatic pause, in the host's millisecond unit
    pub fn delay_ms(&self) -> f64 {
        self.duration * MILLIS_PER_SECOND
    }
}

/// Facade over a single host media element
pub struct AudioFacade<H: MediaHost> {
    host: H,
    config: CueConfig,
    transport: Rc<RefCell<CueTransport>>,
}

impl<H: MediaHost> AudioFacade<H> {
    /// Create a facade that looks up the default `audio-player` element
    pub fn new(host: H) -> Self {
        Self::with_config(host, CueConfig::default())
    }

    pub fn with_config(host: H, config: CueConfig) -> Self {
        Self {
            host,
            config,
            transport: Rc::new(RefCell::new(CueTransport::new())),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &CueConfig {
        &self.config
    }

    /// Snapshot of the commands issued so far
    pub fn transport(&self) -> CueTransport {
        self.transport.borrow().clone()
    }

    /// Reset the element's media pipeline so it picks up its current source.
    ///
    /// No-op when the element is absent.
    pub fn load_audio(&self) {
        let Some(element) = self.element() else {
            return;
        };

        element.reset();
        self.transport.borrow_mut().on_load();
    }

    /// Seek to `position`, start playing, and pause after `duration` seconds.
    ///
    /// No-op when the element is absent. See [`AudioFacade::play`].
    pub fn play_from(&self, position: f64, duration: f64) {
        self.play(PlaybackRequest::new(position, duration));
    }

    /// Play an excerpt.
    ///
    /// The seek is issued before play, and play before the pause timer is
    /// scheduled. The pause is never issued within this call. Each call owns
    /// its own pause timer, which cannot be cancelled and fires even if a
    /// later call or the host has since changed the element.
    pub fn play(&self, request: PlaybackRequest) {
        let Some(element) = self.element() else {
            return;
        };

        element.seek(request.position);
        self.transport.borrow_mut().on_seek(request.position);

        element.play();
        self.transport.borrow_mut().on_play();

        let delay_ms = request.delay_ms();
        self.transport.borrow_mut().on_pause_scheduled(delay_ms);

        let transport = Rc::clone(&self.transport);
        self.host.schedule_after(
            delay_ms,
            Box::new(move || {
                element.pause();
                transport.borrow_mut().on_pause_fired();
            }),
        );
    }

    fn element(&self) -> Option<H::Element> {
        self.host.element_by_id(&self.config.element_id)
    }
}
