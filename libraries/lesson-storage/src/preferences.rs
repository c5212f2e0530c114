//! Typed access to the player's persisted keys
//!
//! Key names and value encodings match what the web player has always
//! written, so existing browser state carries over.
//!
//! # Example
//!
//! ```rust
//! use lesson_storage::{MemoryStore, Preferences, ProgressMap};
//! use lesson_core::LessonId;
//!
//! let mut prefs = Preferences::new(MemoryStore::new());
//! prefs.set_playback_speed(1.25).unwrap();
//!
//! let mut progress = ProgressMap::new();
//! progress.record(&LessonId::new("7"), 93.0);
//! prefs.save_progress(&progress).unwrap();
//!
//! assert_eq!(prefs.playback_speed().unwrap(), Some(1.25));
//! assert_eq!(prefs.progress().unwrap().get(&LessonId::new("7")), Some(93.0));
//! ```

use crate::error::Result;
use crate::progress::ProgressMap;
use crate::store::KeyValueStore;
use lesson_core::LessonId;

// Setting key constants
/// Id of the lesson that was open last
pub const KEY_LAST_LESSON_ID: &str = "lastLessonId";

/// JSON object of lesson id -> seconds
pub const KEY_LESSON_PROGRESS: &str = "lessonProgress";

/// `"true"` / `"false"`
pub const KEY_AUTO_PLAY_NEXT: &str = "autoPlayNext";

/// Stringified playback rate
pub const KEY_PLAYBACK_SPEED: &str = "playbackSpeed";

/// Player preferences over any key/value store
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Id of the lesson that was open last
    pub fn last_lesson_id(&self) -> Result<Option<LessonId>> {
        Ok(self
            .store
            .get(KEY_LAST_LESSON_ID)?
            .filter(|id| !id.is_empty())
            .map(LessonId::from))
    }

    pub fn set_last_lesson_id(&mut self, id: &LessonId) -> Result<()> {
        self.store.set(KEY_LAST_LESSON_ID, id.as_str())
    }

    /// Saved progress; a corrupt value is logged and treated as empty
    pub fn progress(&self) -> Result<ProgressMap> {
        let Some(raw) = self.store.get(KEY_LESSON_PROGRESS)? else {
            return Ok(ProgressMap::new());
        };

        Ok(ProgressMap::from_json(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt {}: {}", KEY_LESSON_PROGRESS, e);
            ProgressMap::new()
        }))
    }

    pub fn save_progress(&mut self, progress: &ProgressMap) -> Result<()> {
        let json = progress.to_json()?;
        self.store.set(KEY_LESSON_PROGRESS, &json)
    }

    /// Auto-advance flag; `None` when never set
    ///
    /// Any stored value other than `"true"` reads as `false`.
    pub fn auto_play_next(&self) -> Result<Option<bool>> {
        Ok(self
            .store
            .get(KEY_AUTO_PLAY_NEXT)?
            .map(|value| value == "true"))
    }

    pub fn set_auto_play_next(&mut self, enabled: bool) -> Result<()> {
        self.store
            .set(KEY_AUTO_PLAY_NEXT, if enabled { "true" } else { "false" })
    }

    /// Preferred playback rate; `None` when never set or unusable
    pub fn playback_speed(&self) -> Result<Option<f64>> {
        let Some(raw) = self.store.get(KEY_PLAYBACK_SPEED)? else {
            return Ok(None);
        };

        match raw.trim().parse::<f64>() {
            Ok(speed) if speed.is_finite() && speed > 0.0 => Ok(Some(speed)),
            _ => {
                tracing::warn!("Ignoring invalid {}: {:?}", KEY_PLAYBACK_SPEED, raw);
                Ok(None)
            }
        }
    }

    pub fn set_playback_speed(&mut self, speed: f64) -> Result<()> {
        self.store.set(KEY_PLAYBACK_SPEED, &speed.to_string())
    }
}
