//! Error types for the lesson player

use thiserror::Error;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No lesson is currently loaded
    #[error("No lesson loaded")]
    NoLessonLoaded,

    /// Lesson index outside the catalog
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Seek requested before the media reported a duration
    #[error("Duration unknown, cannot seek by fraction")]
    DurationUnknown,

    /// Playback rate must be finite and positive
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),

    /// Media element refused an operation (e.g. autoplay blocked)
    #[error("Media element error: {0}")]
    MediaElement(String),

    /// Persisting player state failed
    #[error("Storage error: {0}")]
    Storage(#[from] lesson_storage::StorageError),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
