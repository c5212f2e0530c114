//! Lesson announcement parsing
//!
//! New lessons are published as an audio file plus a free-text post. The
//! post's lines become the description; the lesson number, title and date
//! are picked out of those lines.

use crate::types::{Description, Lesson, LessonId};
use regex::Regex;
use std::sync::LazyLock;

/// Word introducing the lesson number ("the lesson")
const LESSON_MARKER: &str = "الدرس";

/// A line containing this word ("book") is preferred as the title
const TITLE_MARKER: &str = "كتاب";

/// Hijri years in use start with these digits
const DATE_MARKER: &str = "144";

/// Title used when the post has no text
const FALLBACK_TITLE: &str = "درس جديد";

static LESSON_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{LESSON_MARKER}\s+([0-9٠-٩]+)")).expect("Invalid lesson number regex")
});

/// Fields extracted from an announcement post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// Lesson number, when the post states one
    pub lesson_number: Option<u64>,
    pub title: String,
    /// Trimmed, non-empty lines of the post
    pub lines: Vec<String>,
    /// Date line, or empty
    pub date: String,
}

impl Announcement {
    /// Build the catalog entry for this announcement
    ///
    /// `url` is whatever the player should resolve; the importer stores the
    /// bare drive file id. Returns `None` when the post has no lesson number.
    pub fn into_lesson(self, url: impl Into<String>) -> Option<Lesson> {
        let number = self.lesson_number?;

        Some(Lesson {
            id: LessonId::from(number),
            title: self.title,
            url: url.into(),
            description: Description::Lines(self.lines),
            transcription: None,
            date: Some(self.date),
        })
    }
}

/// Parse an announcement post
pub fn parse_announcement(text: &str) -> Announcement {
    let lesson_number = LESSON_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_digits(m.as_str()));

    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let title = lines
        .iter()
        .find(|line| line.contains(TITLE_MARKER))
        .or_else(|| lines.first())
        .cloned()
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let date = lines
        .iter()
        .find(|line| line.contains(DATE_MARKER))
        .cloned()
        .unwrap_or_default();

    Announcement {
        lesson_number,
        title,
        lines,
        date,
    }
}

/// Parse ASCII or Arabic-Indic digits
fn parse_digits(digits: &str) -> Option<u64> {
    digits.chars().try_fold(0u64, |acc, c| {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '٠'..='٩' => c as u32 - '٠' as u32,
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}
