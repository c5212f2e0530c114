//! Media element abstraction
//!
//! The player does not decode audio itself. It drives a native media
//! element (the browser's `<audio>`, or a platform player) and reacts to
//! that element's events.

use crate::error::Result;

/// The subset of `HTMLMediaElement` the player relies on
///
/// Times are in seconds. `duration` is NaN until metadata has loaded,
/// matching the browser.
pub trait MediaElement {
    /// Point the element at a new source
    fn set_src(&mut self, url: &str);

    /// Start (re)loading the current source
    fn load(&mut self);

    /// Begin playback
    ///
    /// # Errors
    /// Returns an error when the platform refuses (e.g. autoplay policy)
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn paused(&self) -> bool;

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    fn duration(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);
}

/// Duration if the element knows it
pub(crate) fn known_duration<M: MediaElement + ?Sized>(media: &M) -> Option<f64> {
    let duration = media.duration();
    (duration.is_finite() && duration > 0.0).then_some(duration)
}
