//! Lesson Server Library
//!
//! Serves the lesson player: the audio proxy for drive-hosted lessons, the
//! lesson catalog and the static web UI.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{ProxyError, Result, ServerError};
pub use services::{AudioUpstream, DriveUpstream};
pub use state::AppState;
