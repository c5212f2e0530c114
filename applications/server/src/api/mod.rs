/// API route modules
pub mod audio;
pub mod health;
pub mod lessons;

use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// The audio proxy is mounted on the configured route. Anything that is not
/// an API route is served from the web directory, with `index.html` as the
/// fallback for unknown paths.
pub fn create_router(state: AppState) -> Router {
    let web_dir = state.config.content.web_dir.clone();
    let index = web_dir.join("index.html");
    let proxy_route = state.config.proxy.route.clone();

    Router::new()
        .route(&proxy_route, get(audio::proxy_audio))
        .route("/api/lessons", get(lessons::list_lessons))
        .route("/api/health", get(health::health))
        .fallback_service(ServeDir::new(web_dir).fallback(ServeFile::new(index)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
