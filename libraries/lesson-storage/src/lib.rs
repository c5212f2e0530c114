//! Lesson Player Storage
//!
//! Per-client persistence for the player: which lesson was open, where each
//! lesson was left off, and playback preferences.
//!
//! # Architecture
//!
//! - **`KeyValueStore`**: the string key/value contract of the browser's
//!   `localStorage`
//! - **Backends**: `MemoryStore` (tests, headless) and `JsonFileStore`
//!   (native shells); the web build provides its own over `localStorage`
//! - **`Preferences`**: typed accessors for the persisted keys
//!
//! Nothing here is shared between clients; there is no server-side state.

mod error;
mod file_store;
mod progress;
mod store;

pub mod preferences;

pub use error::{Result, StorageError};
pub use file_store::JsonFileStore;
pub use preferences::Preferences;
pub use progress::ProgressMap;
pub use store::{KeyValueStore, MemoryStore};
