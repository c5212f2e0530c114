//! Drive share-link parsing
//!
//! Lessons point at audio hosted on a drive service whose share links cannot
//! be played directly from a browser. When a link carries a file identifier
//! the player routes it through the audio proxy instead.
//!
//! Recognised shapes (host-agnostic, so `drive.google.com` and
//! `docs.google.com` links behave the same):
//! - `...?id=<ID>` / `...&id=<ID>`
//! - `.../d/<ID>/...`
//! - a bare `<ID>` as written by the catalog importer

use crate::error::{LessonError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Default upstream download endpoint; the file id is appended as `id=`
pub const DEFAULT_DOWNLOAD_URL: &str = "https://drive.google.com/uc?export=download";

/// Default route of the audio proxy
pub const DEFAULT_PROXY_ROUTE: &str = "/api/audio";

static ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("Invalid id parameter regex"));

static PATH_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/d/([A-Za-z0-9_-]+)(?:[/?#]|$)").expect("Invalid path segment regex")
});

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{25,}$").expect("Invalid bare id regex"));

/// Extract the drive file identifier from a share URL
///
/// The `id=` query form wins over the `/d/<id>` path form when both appear.
///
/// # Example
///
/// ```rust
/// use lesson_core::drive::extract_file_id;
///
/// assert_eq!(
///     extract_file_id("https://drive.google.com/file/d/abc123/view?usp=sharing"),
///     Some("abc123")
/// );
/// assert_eq!(extract_file_id("https://example.com/audio.mp3"), None);
/// ```
pub fn extract_file_id(url: &str) -> Option<&str> {
    let url = url.trim();

    if let Some(caps) = ID_PARAM.captures(url) {
        return caps.get(1).map(|m| m.as_str());
    }

    if let Some(caps) = PATH_SEGMENT.captures(url) {
        return caps.get(1).map(|m| m.as_str());
    }

    if BARE_ID.is_match(url) {
        return Some(url);
    }

    None
}

/// Where the player should fetch a lesson's audio from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Drive-hosted file, fetched through the audio proxy
    Proxied {
        /// Drive file identifier
        file_id: String,
    },

    /// Any other URL, used verbatim
    Direct(String),
}

impl AudioSource {
    /// URL to hand to the media element
    pub fn playable_url(&self, proxy_route: &str) -> String {
        match self {
            AudioSource::Proxied { file_id } => format!("{proxy_route}?id={file_id}"),
            AudioSource::Direct(url) => url.clone(),
        }
    }

    /// Check if the source goes through the proxy
    pub fn is_proxied(&self) -> bool {
        matches!(self, AudioSource::Proxied { .. })
    }
}

/// Resolve a lesson URL into a playable source
pub fn resolve_source(url: &str) -> AudioSource {
    match extract_file_id(url) {
        Some(file_id) => AudioSource::Proxied {
            file_id: file_id.to_string(),
        },
        None => AudioSource::Direct(url.to_string()),
    }
}

/// Build the upstream download URL for a file id
///
/// `base` may already carry query parameters (the default carries
/// `export=download`); the id is appended with proper encoding.
pub fn download_url(base: &str, file_id: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(LessonError::InvalidUrl(format!(
            "download URL must be http(s): {base}"
        )));
    }

    url.query_pairs_mut().append_pair("id", file_id);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_query_parameter() {
        assert_eq!(
            extract_file_id("https://drive.google.com/uc?export=download&id=1AbC_d-9"),
            Some("1AbC_d-9")
        );
        assert_eq!(
            extract_file_id("https://drive.google.com/open?id=XYZ"),
            Some("XYZ")
        );
    }

    #[test]
    fn extracts_id_from_path_segment() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing"),
            Some("1AbC_d-9")
        );
        assert_eq!(
            extract_file_id("https://docs.google.com/uc/d/FILE42/"),
            Some("FILE42")
        );
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/FILE42"),
            Some("FILE42")
        );
    }

    #[test]
    fn query_form_takes_precedence() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/PATHID/view?id=QUERYID"),
            Some("QUERYID")
        );
    }

    #[test]
    fn parameter_name_must_be_exactly_id() {
        assert_eq!(extract_file_id("https://example.com/play?videoid=abc"), None);
    }

    #[test]
    fn bare_drive_id_is_recognised() {
        let id = "1cSIVl-xXpEuoXLmv3JbALUkZFOmJNBkf";
        assert_eq!(extract_file_id(id), Some(id));
        // Short tokens are not mistaken for ids
        assert_eq!(extract_file_id("lesson1"), None);
    }

    #[test]
    fn unrecognised_url_falls_back_verbatim() {
        let url = "https://cdn.example.com/audio/lesson-01.mp3";
        let source = resolve_source(url);
        assert_eq!(source, AudioSource::Direct(url.to_string()));
        assert_eq!(source.playable_url(DEFAULT_PROXY_ROUTE), url);
        assert!(!source.is_proxied());
    }

    #[test]
    fn proxied_source_points_at_proxy_route() {
        let source = resolve_source("https://drive.google.com/file/d/abc/view");
        assert!(source.is_proxied());
        assert_eq!(source.playable_url("/api/audio"), "/api/audio?id=abc");
    }

    #[test]
    fn download_url_appends_id() {
        let url = download_url(DEFAULT_DOWNLOAD_URL, "abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://drive.google.com/uc?export=download&id=abc"
        );

        let url = download_url("http://127.0.0.1:9000/uc", "x y").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/uc?id=x+y");
    }

    #[test]
    fn download_url_rejects_non_http() {
        assert!(download_url("ftp://example.com/uc", "abc").is_err());
        assert!(download_url("not a url", "abc").is_err());
    }
}
