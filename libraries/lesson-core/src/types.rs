//! Lesson domain types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Lesson identifier
///
/// Catalog files carry ids as numbers or strings, and persisted state keys
/// them as strings, so the id is normalised to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LessonId(String);

impl LessonId {
    /// Create a new lesson ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id derived from a 1-based catalog position
    pub fn from_position(position: usize) -> Self {
        Self(position.to_string())
    }

    /// Get the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when the id is a plain non-negative integer
    #[must_use]
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LessonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for LessonId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for LessonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // Only canonical integers go back out as numbers; "007" must stay "007"
        match self.numeric() {
            Some(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for LessonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        id_from_value(raw).ok_or_else(|| serde::de::Error::custom("lesson id must not be empty"))
    }
}

/// Convert a catalog id value; falsy values (`0`, `""`, `false`, `null`)
/// and non-scalars yield `None`
fn id_from_value(value: Value) -> Option<LessonId> {
    match value {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(LessonId(n.to_string())),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(LessonId(s)),
        Value::Bool(true) => Some(LessonId("true".to_string())),
        _ => None,
    }
}

/// Scalar field as text; objects, arrays and `null` yield `None`
fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lesson description: a single paragraph or a list of bullet lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// Single block of text
    Text(String),

    /// One entry per line
    Lines(Vec<String>),
}

impl Description {
    /// Description as display lines
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Description::Text(text) => vec![text.as_str()],
            Description::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }

    /// All lines joined by a single space (used for searching)
    pub fn joined(&self) -> String {
        match self {
            Description::Text(text) => text.clone(),
            Description::Lines(lines) => lines.join(" "),
        }
    }

    /// Check if there is nothing to show
    pub fn is_empty(&self) -> bool {
        match self {
            Description::Text(text) => text.is_empty(),
            Description::Lines(lines) => lines.is_empty(),
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Description::Lines(Vec::new())
    }
}

/// One playable audio lesson with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    /// Stable identifier (defaults to the 1-based catalog position)
    pub id: LessonId,

    /// Display title
    pub title: String,

    /// Share URL, direct URL, or bare drive file id
    pub url: String,

    /// Description shown in the details panel
    pub description: Description,

    /// Full transcript, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    /// Free-form date label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Lesson {
    /// Create a lesson with an empty description
    pub fn new(id: impl Into<LessonId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            description: Description::default(),
            transcription: None,
            date: None,
        }
    }
}

/// Lesson record as stored in `lessons.json`
///
/// Fields are read as loose JSON and converted one by one: a field of the
/// wrong type is dropped (or stringified, for scalars) instead of failing
/// the whole catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawLesson {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub transcription: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
}

impl RawLesson {
    /// Normalise into a `Lesson`, using `position` (1-based) when the id is missing
    pub(crate) fn into_lesson(self, position: usize) -> Lesson {
        let description = match self.description {
            Some(value) => serde_json::from_value::<Description>(value).unwrap_or_else(|e| {
                tracing::warn!("Ignoring description of lesson {}: {}", position, e);
                Description::default()
            }),
            None => Description::default(),
        };

        Lesson {
            id: self
                .id
                .and_then(id_from_value)
                .unwrap_or_else(|| LessonId::from_position(position)),
            title: self.title.and_then(text_from_value).unwrap_or_default(),
            url: self.url.and_then(text_from_value).unwrap_or_default(),
            description,
            transcription: self.transcription.and_then(text_from_value),
            date: self.date.and_then(text_from_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_normalise_to_strings() {
        let id: LessonId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.numeric(), Some(42));

        let id: LessonId = serde_json::from_str("\"intro\"").unwrap();
        assert_eq!(id.as_str(), "intro");
        assert_eq!(id.numeric(), None);
    }

    #[test]
    fn numeric_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&LessonId::from(7u64)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&LessonId::new("intro")).unwrap(),
            "\"intro\""
        );
    }

    #[test]
    fn falsy_ids_fall_back_to_position() {
        for raw in [r#"{"id": 0}"#, r#"{"id": ""}"#, r#"{"id": null}"#, r#"{}"#] {
            let lesson: RawLesson = serde_json::from_str(raw).unwrap();
            assert_eq!(lesson.into_lesson(5).id.as_str(), "5", "input: {raw}");
        }
    }

    #[test]
    fn description_accepts_string_or_list() {
        let text: Description = serde_json::from_str("\"one line\"").unwrap();
        assert_eq!(text.lines(), vec!["one line"]);

        let list: Description = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list.lines(), vec!["a", "b"]);
        assert_eq!(list.joined(), "a b");
    }

    #[test]
    fn missing_fields_default() {
        let lesson: RawLesson = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        let lesson = lesson.into_lesson(1);
        assert_eq!(lesson.title, "T");
        assert_eq!(lesson.url, "");
        assert!(lesson.description.is_empty());
        assert!(lesson.transcription.is_none());
    }

    #[test]
    fn mistyped_fields_are_coerced_or_dropped() {
        let raw = r#"{"id": "7", "title": 12, "date": 1446, "description": {"x": 1}, "url": ["a"]}"#;
        let lesson: RawLesson = serde_json::from_str(raw).unwrap();
        let lesson = lesson.into_lesson(1);
        assert_eq!(lesson.title, "12");
        assert_eq!(lesson.date.as_deref(), Some("1446"));
        assert!(lesson.description.is_empty());
        assert_eq!(lesson.url, "");
    }

    #[test]
    fn padded_numeric_ids_keep_their_text() {
        for raw in ["007", "+5", "1e3"] {
            let id = LessonId::new(raw);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{raw}\""));
            let back: LessonId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, id);
        }
        assert_eq!(serde_json::to_string(&LessonId::new("42")).unwrap(), "42");
    }
}
