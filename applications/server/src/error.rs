/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// General server errors, rendered as `{"error": ...}` JSON
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let error_message = match self {
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                "Configuration error"
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error"
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                "IO error"
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Body of every failed upstream fetch
pub const UPSTREAM_FAILURE_BODY: &str = "Error fetching audio from Google Drive";

/// Body when the `id` parameter is absent
pub const MISSING_ID_BODY: &str = "Missing file ID";

/// Audio proxy errors
///
/// Rendered as plain text; the browser only ever shows these in the
/// network panel.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing file ID")]
    MissingFileId,

    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::MissingFileId => (StatusCode::BAD_REQUEST, MISSING_ID_BODY).into_response(),
            other => {
                tracing::error!("Error fetching audio: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_BODY).into_response()
            }
        }
    }
}
