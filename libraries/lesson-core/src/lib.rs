//! Lesson Player Core
//!
//! Platform-agnostic types and helpers shared by the player and the server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Lesson`, `LessonId`, `Description`
//! - **Catalog**: loading, normalising and merging `lessons.json`
//! - **Drive links**: file-id extraction and audio source resolution
//! - **Search**: sidebar filter and global search
//! - **Error Handling**: unified `LessonError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lesson_core::{Catalog, drive::resolve_source};
//!
//! let catalog = Catalog::from_json(r#"[
//!     {"title": "Intro", "url": "https://drive.google.com/file/d/abc123/view"}
//! ]"#).unwrap();
//!
//! let lesson = catalog.get(0).unwrap();
//! assert_eq!(lesson.id.as_str(), "1");
//!
//! let source = resolve_source(&lesson.url);
//! assert_eq!(source.playable_url("/api/audio"), "/api/audio?id=abc123");
//! ```

#![forbid(unsafe_code)]

pub mod announcement;
pub mod catalog;
pub mod drive;
pub mod error;
pub mod search;
pub mod time;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use drive::{extract_file_id, resolve_source, AudioSource};
pub use error::{LessonError, Result};
pub use time::format_time;
pub use types::{Description, Lesson, LessonId};
