//! Lesson search
//!
//! Two flavours: the sidebar filter (title only, live) and the global search
//! dialog, which can look into titles, descriptions and dates and returns a
//! short excerpt around the match.

use crate::catalog::Catalog;
use crate::types::{Lesson, LessonId};
use serde::{Deserialize, Serialize};

/// Minimum term length (in characters) for a global search
pub const MIN_GLOBAL_TERM_CHARS: usize = 2;

/// Characters of context kept before a description match
const SNIPPET_BEFORE: usize = 20;

/// Characters kept from the match start onwards
const SNIPPET_AFTER: usize = 40;

/// Fields a global search looks into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchScope {
    pub titles: bool,
    pub descriptions: bool,
    pub dates: bool,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self {
            titles: true,
            descriptions: true,
            dates: false,
        }
    }
}

/// Context shown under a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Snippet {
    /// Excerpt of the description around the match
    Description(String),

    /// The matching date
    Date(String),

    /// Title-only match
    None,
}

/// One global search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Position in the catalog
    pub index: usize,
    pub id: LessonId,
    pub title: String,
    pub snippet: Snippet,
}

/// Sidebar filter: visibility flag per lesson, in catalog order
///
/// Case-insensitive substring match on the title; an empty term shows all.
pub fn filter_titles(catalog: &Catalog, term: &str) -> Vec<bool> {
    let term = term.to_lowercase();
    catalog
        .iter()
        .map(|lesson| lesson.title.to_lowercase().contains(&term))
        .collect()
}

/// Global search across the enabled fields
///
/// Terms shorter than [`MIN_GLOBAL_TERM_CHARS`] return nothing. Titles and
/// descriptions match case-insensitively; dates match the lowercased term
/// as a plain substring.
pub fn global_search(catalog: &Catalog, term: &str, scope: SearchScope) -> Vec<SearchHit> {
    let term = term.to_lowercase();
    if term.chars().count() < MIN_GLOBAL_TERM_CHARS {
        return Vec::new();
    }

    catalog
        .iter()
        .enumerate()
        .filter_map(|(index, lesson)| match_lesson(lesson, &term, scope).map(|snippet| SearchHit {
            index,
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            snippet,
        }))
        .collect()
}

fn match_lesson(lesson: &Lesson, term: &str, scope: SearchScope) -> Option<Snippet> {
    let title_match = scope.titles && lesson.title.to_lowercase().contains(term);
    let date_match = scope.dates
        && lesson
            .date
            .as_deref()
            .is_some_and(|date| date.contains(term));

    let description = lesson.description.joined();
    let description_match = scope.descriptions
        .then(|| excerpt(&description, term))
        .flatten();

    if let Some(text) = description_match {
        return Some(Snippet::Description(text));
    }

    if date_match {
        return Some(Snippet::Date(lesson.date.clone().unwrap_or_default()));
    }

    title_match.then_some(Snippet::None)
}

/// Excerpt of `text` around the first case-insensitive occurrence of `term`
fn excerpt(text: &str, term: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let byte_pos = lowered.find(term)?;
    let char_pos = lowered[..byte_pos].chars().count();

    let start = char_pos.saturating_sub(SNIPPET_BEFORE);
    let end = char_pos + SNIPPET_AFTER;

    Some(text.chars().skip(start).take(end - start).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Description, Lesson};

    fn catalog() -> Catalog {
        let mut first = Lesson::new(1u64, "Introduction to Grammar", "a");
        first.description = Description::Lines(vec![
            "Opening remarks".to_string(),
            "the difference between nouns and verbs in classical usage".to_string(),
        ]);
        first.date = Some("1445/02/10".to_string());

        let mut second = Lesson::new(2u64, "Poetry", "b");
        second.description = Description::Text("Meters and rhyme".to_string());
        second.date = Some("1446/01/01".to_string());

        Catalog::from_lessons(vec![first, second])
    }

    #[test]
    fn sidebar_filter_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(filter_titles(&catalog, "GRAMMAR"), vec![true, false]);
        assert_eq!(filter_titles(&catalog, ""), vec![true, true]);
        assert_eq!(filter_titles(&catalog, "zzz"), vec![false, false]);
    }

    #[test]
    fn short_terms_return_nothing() {
        assert!(global_search(&catalog(), "p", SearchScope::default()).is_empty());
    }

    #[test]
    fn title_match_has_no_snippet() {
        let hits = global_search(&catalog(), "poetry", SearchScope::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[0].snippet, Snippet::None);
    }

    #[test]
    fn description_match_returns_excerpt() {
        let hits = global_search(&catalog(), "NOUNS", SearchScope::default());
        assert_eq!(hits.len(), 1);

        let Snippet::Description(text) = &hits[0].snippet else {
            panic!("expected description snippet, got {:?}", hits[0].snippet);
        };
        assert!(text.contains("nouns"));
        assert!(text.chars().count() <= SNIPPET_BEFORE + SNIPPET_AFTER);
    }

    #[test]
    fn excerpt_clamps_at_start() {
        assert_eq!(excerpt("Meters and rhyme", "met").as_deref(), Some("Meters and rhyme"));
    }

    #[test]
    fn dates_only_when_enabled() {
        let scope = SearchScope {
            titles: false,
            descriptions: false,
            dates: true,
        };
        let hits = global_search(&catalog(), "1446", scope);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snippet, Snippet::Date("1446/01/01".to_string()));

        assert!(global_search(&catalog(), "1446", SearchScope::default()).is_empty());
    }

    #[test]
    fn disabled_fields_are_ignored() {
        let scope = SearchScope {
            titles: false,
            descriptions: true,
            dates: false,
        };
        assert!(global_search(&catalog(), "poetry", scope).is_empty());
    }
}
