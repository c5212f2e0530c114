//! Property-based tests for link parsing and clock formatting
//!
//! Uses proptest to verify invariants across many random inputs.

use lesson_core::{drive, extract_file_id, format_time, resolve_source, AudioSource, Catalog};
use proptest::prelude::*;

fn file_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,44}"
}

proptest! {
    /// Property: `?id=<X>` share links always yield exactly X
    #[test]
    fn query_form_yields_exact_id(id in file_id(), host in prop::sample::select(vec![
        "https://drive.google.com/uc?export=download&",
        "https://docs.google.com/uc?",
        "https://drive.google.com/open?",
    ])) {
        let url = format!("{host}id={id}");
        prop_assert_eq!(extract_file_id(&url), Some(id.as_str()));
    }

    /// Property: `/d/<X>/` share links always yield exactly X
    #[test]
    fn path_form_yields_exact_id(id in file_id(), tail in prop::sample::select(vec![
        "/view", "/view?usp=sharing", "/", "",
    ])) {
        let url = format!("https://drive.google.com/file/d/{id}{tail}");
        prop_assert_eq!(extract_file_id(&url), Some(id.as_str()));
    }

    /// Property: plain file URLs are passed through untouched
    #[test]
    fn plain_urls_fall_back_verbatim(name in "[a-z]{1,12}", ext in prop::sample::select(vec!["mp3", "m4a", "ogg"])) {
        let url = format!("https://cdn.example.com/audio/{name}.{ext}");
        let source = resolve_source(&url);
        prop_assert_eq!(source.clone(), AudioSource::Direct(url.clone()));
        prop_assert_eq!(source.playable_url(drive::DEFAULT_PROXY_ROUTE), url);
    }

    /// Property: formatted seconds are always below 60 and zero-padded
    #[test]
    fn formatted_time_is_well_formed(secs in 0.0f64..100_000.0) {
        let text = format_time(secs);
        let (mins, rest) = text.split_once(':').unwrap();
        prop_assert_eq!(rest.len(), 2);

        let mins: u64 = mins.parse().unwrap();
        let rest: u64 = rest.parse().unwrap();
        prop_assert!(rest < 60);
        prop_assert_eq!(mins * 60 + rest, secs.floor() as u64);
    }

    /// Property: arbitrary input never breaks catalog loading
    #[test]
    fn catalog_parse_never_panics(input in ".{0,200}") {
        let _ = Catalog::from_json_or_empty(&input);
    }
}
