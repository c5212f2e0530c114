//! Player Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it handles input and media callbacks; the UI drains them.

use crate::types::PlaybackState;
use lesson_core::LessonId;
use serde::Serialize;

/// Events emitted by the lesson player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlayerEvent {
    /// A different lesson was loaded
    LessonChanged {
        /// Position in the catalog
        index: usize,
        lesson_id: LessonId,
    },

    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// Playback clock advanced (one per `timeupdate`)
    PositionChanged {
        position_secs: f64,
        duration_secs: f64,
    },

    /// Metadata loaded and the duration is known
    DurationChanged { duration_secs: f64 },

    /// Saved position applied after a lesson load
    Resumed {
        lesson_id: LessonId,
        position_secs: f64,
    },

    /// Lesson played to the end
    LessonEnded {
        lesson_id: LessonId,
        /// Whether the next lesson was started automatically
        advanced: bool,
    },

    /// Recoverable error (blocked autoplay, storage failure)
    Error { message: String },
}
