/// Common test utilities and fixtures
use axum::Router;
use lesson_server::{api::create_router, config::ServerConfig, services::DriveUpstream, state::AppState};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Test app backed by a temporary content directory
pub struct TestApp {
    pub router: Router,
    pub content: TempDir,
}

/// Build the router against `upstream_base` (a download URL)
///
/// `catalog` is written to `lessons.json` when given; the web directory
/// always holds a minimal `index.html`.
pub fn create_test_app(upstream_base: &str, catalog: Option<&str>) -> TestApp {
    let content = TempDir::new().unwrap();
    let web_dir = content.path().join("web");
    std::fs::create_dir_all(&web_dir).unwrap();
    std::fs::write(web_dir.join("index.html"), fixtures::INDEX_HTML).unwrap();

    let catalog_path = content.path().join("lessons.json");
    if let Some(json) = catalog {
        std::fs::write(&catalog_path, json).unwrap();
    }

    let mut config = ServerConfig::default();
    config.proxy.download_url = upstream_base.to_string();
    config.proxy.timeout_secs = 5;
    config.content.catalog_path = catalog_path;
    config.content.web_dir = web_dir;

    let upstream = DriveUpstream::new(upstream_base, Duration::from_secs(5)).unwrap();
    let state = AppState::new(Arc::new(config), Arc::new(upstream));

    TestApp {
        router: create_router(state),
        content,
    }
}

/// Test content
pub mod fixtures {
    pub const INDEX_HTML: &str = "<!doctype html><title>Lessons</title>";

    pub const CATALOG: &str = r#"[
        {"id": 1, "title": "Opening", "url": "https://drive.google.com/file/d/FILE_ONE/view"},
        {"title": "Untitled id", "url": "https://cdn.example.com/two.mp3", "description": "notes"}
    ]"#;

    pub const AUDIO_BYTES: &[u8] = b"ID3\x04\x00fake-mp3-frames";
}
