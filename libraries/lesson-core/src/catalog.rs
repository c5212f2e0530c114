//! Lesson catalog (`lessons.json`)
//!
//! The catalog is an ordered JSON array of lesson objects. Order is
//! significant: it drives the sidebar, previous/next navigation and the
//! default ids of entries that carry none.

use crate::error::{LessonError, Result};
use crate::types::{Lesson, LessonId, RawLesson};
use serde::Serialize;
use std::path::Path;

/// Ordered list of lessons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    lessons: Vec<Lesson>,
}

impl Catalog {
    /// Create a catalog from already normalised lessons
    pub fn from_lessons(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Parse a catalog document
    ///
    /// Entries without a usable id get their 1-based position.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawLesson> = serde_json::from_str(json)
            .map_err(|e| LessonError::catalog(format!("malformed lessons document: {e}")))?;

        let lessons = raw
            .into_iter()
            .enumerate()
            .map(|(index, lesson)| lesson.into_lesson(index + 1))
            .collect();

        Ok(Self { lessons })
    }

    /// Parse a catalog document, degrading to an empty catalog on error
    pub fn from_json_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            tracing::error!("Failed to load lessons: {}", e);
            Self::default()
        })
    }

    /// Read and parse a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Read and parse a catalog file, degrading to an empty catalog on error
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::error!("Failed to load {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Serialize with 4-space indentation, keeping non-ASCII text as-is
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;

        String::from_utf8(buf).map_err(|e| LessonError::catalog(e.to_string()))
    }

    /// Write the catalog back to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_pretty_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Number of lessons
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Check if the catalog has no lessons
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Get a lesson by position
    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    /// All lessons in catalog order
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Iterate lessons in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Lesson> {
        self.lessons.iter()
    }

    /// Position of the first lesson with this id
    pub fn index_of(&self, id: &LessonId) -> Option<usize> {
        self.lessons.iter().position(|lesson| &lesson.id == id)
    }

    /// Highest numeric id in the catalog
    pub fn max_numeric_id(&self) -> Option<u64> {
        self.lessons.iter().filter_map(|l| l.id.numeric()).max()
    }

    /// Append lessons that are newer than anything already catalogued
    ///
    /// A lesson is new when its numeric id exceeds the current highest id
    /// (`baseline` when the catalog has no numeric ids) and is not already
    /// present. The catalog is then re-sorted by numeric id; non-numeric ids
    /// keep their relative order after the numeric ones.
    ///
    /// Returns the number of lessons added.
    pub fn merge_newer(&mut self, incoming: impl IntoIterator<Item = Lesson>, baseline: u64) -> usize {
        let last_id = self.max_numeric_id().unwrap_or(baseline);
        let mut added = 0;

        for lesson in incoming {
            let Some(number) = lesson.id.numeric() else {
                tracing::debug!("Skipping lesson with non-numeric id {}", lesson.id);
                continue;
            };

            if number <= last_id || self.index_of(&lesson.id).is_some() {
                continue;
            }

            tracing::info!("Adding lesson {}", number);
            self.lessons.push(lesson);
            added += 1;
        }

        self.lessons
            .sort_by_key(|lesson| lesson.id.numeric().map_or((1, 0), |n| (0, n)));

        added
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Lesson;
    type IntoIter = std::slice::Iter<'a, Lesson>;

    fn into_iter(self) -> Self::IntoIter {
        self.lessons.iter()
    }
}
