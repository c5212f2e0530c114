//! Per-lesson playback progress

use crate::error::Result;
use lesson_core::LessonId;
use std::collections::BTreeMap;

/// Last playback offset (seconds) per lesson
///
/// Serialized as a flat JSON object keyed by lesson id, e.g.
/// `{"3": 125.4, "intro": 12}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressMap {
    entries: BTreeMap<String, f64>,
}

impl ProgressMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved offset for a lesson
    pub fn get(&self, id: &LessonId) -> Option<f64> {
        self.entries.get(id.as_str()).copied()
    }

    /// Record the offset for a lesson
    ///
    /// Non-finite and negative offsets are ignored; returns whether the
    /// value was stored.
    pub fn record(&mut self, id: &LessonId, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds < 0.0 {
            return false;
        }
        self.entries.insert(id.as_str().to_string(), seconds);
        true
    }

    /// Forget a lesson's offset
    pub fn clear(&mut self, id: &LessonId) {
        self.entries.remove(id.as_str());
    }

    /// Number of lessons with saved progress
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no progress is saved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as a JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Decode from a JSON object
    ///
    /// Entries whose value is not a usable offset are dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let entries = raw
            .into_iter()
            .filter_map(|(id, value)| {
                let seconds = value.as_f64()?;
                (seconds.is_finite() && seconds >= 0.0).then_some((id, seconds))
            })
            .collect();

        Ok(Self { entries })
    }
}
