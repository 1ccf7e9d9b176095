//! Host platform interface
//!
//! The facade never touches a platform API directly. A [`MediaHost`] hands
//! out element handles and runs deferred work; [`sim::SimulatedHost`] and the
//! browser binding in `web` are the two implementations.
//!
//! [`sim::SimulatedHost`]: crate::sim::SimulatedHost

/// Work queued to run later on the host's single thread.
pub type DeferredTask = Box<dyn FnOnce()>;

/// A single playable media element.
///
/// Handles are cheap to clone and refer to the same underlying element.
pub trait MediaElement: Clone + 'static {
    /// Re-initialize the media pipeline from the currently configured source
    fn reset(&self);

    /// Start playback. Failures are the host's to report.
    fn play(&self);

    /// Stop playback, keeping the current position
    fn pause(&self);

    /// Set the current playback position in seconds
    fn seek(&self, seconds: f64);
}

/// The host document plus its deferred-callback primitive.
pub trait MediaHost {
    type Element: MediaElement;

    /// Look up a media element by identifier. `None` if it is not present.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Run `task` after at least `delay_ms` milliseconds.
    ///
    /// The delay is passed through as given; how negative or non-finite
    /// values behave is up to the host.
    fn schedule_after(&self, delay_ms: f64, task: DeferredTask);
}
