//! Lesson Player - Playback Control
//!
//! Platform-agnostic controller for the lesson player.
//!
//! This crate provides:
//! - Lesson selection (restore last lesson, previous/next, auto-advance)
//! - Transport (play/pause, skip, seek by progress-bar position, speed)
//! - Progress view kept in sync with the media element's clock
//! - Per-lesson resume positions persisted through `lesson-storage`
//!
//! # Architecture
//!
//! `lesson-playback` does not decode or output audio. Platforms provide a
//! [`MediaElement`] (the browser's `<audio>` element in the web build) and
//! forward its `timeupdate`, `loadedmetadata` and `ended` events to the
//! [`LessonPlayer`].
//!
//! # Example
//!
//! ```rust
//! use lesson_core::Catalog;
//! use lesson_playback::{LessonPlayer, MediaElement, PlayerConfig, Result};
//! use lesson_storage::MemoryStore;
//!
//! #[derive(Default)]
//! struct Silent { src: String, time: f64, paused: bool }
//!
//! impl MediaElement for Silent {
//!     fn set_src(&mut self, url: &str) { self.src = url.to_string(); }
//!     fn load(&mut self) { self.time = 0.0; self.paused = true; }
//!     fn play(&mut self) -> Result<()> { self.paused = false; Ok(()) }
//!     fn pause(&mut self) { self.paused = true; }
//!     fn paused(&self) -> bool { self.paused }
//!     fn current_time(&self) -> f64 { self.time }
//!     fn set_current_time(&mut self, seconds: f64) { self.time = seconds; }
//!     fn duration(&self) -> f64 { 300.0 }
//!     fn set_playback_rate(&mut self, _rate: f64) {}
//! }
//!
//! let catalog = Catalog::from_json(
//!     r#"[{"title": "One", "url": "https://drive.google.com/file/d/abc/view"}]"#,
//! ).unwrap();
//!
//! let player = LessonPlayer::new(catalog, Silent::default(), MemoryStore::new(), PlayerConfig::default()).unwrap();
//! assert_eq!(player.media().src, "/api/audio?id=abc");
//! ```

mod error;
mod events;
mod media;
mod player;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use media::MediaElement;
pub use player::{pointer_fraction, LessonPlayer, DEFAULT_PLAYBACK_SPEED};
pub use types::{
    LayoutDirection, LessonListItem, PlayIcon, PlaybackState, PlayerConfig, PlayerView,
};
