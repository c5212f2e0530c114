/// Audio proxy API
use crate::{error::ProxyError, state::AppState};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// GET /api/audio?id=<fileId>
/// Relay a drive-hosted file so the browser can play it same-origin
pub async fn proxy_audio(
    State(app_state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    // First `id` wins when the parameter is repeated
    let file_id = params
        .into_iter()
        .find_map(|(key, value)| (key == "id").then_some(value))
        .filter(|id| !id.is_empty())
        .ok_or(ProxyError::MissingFileId)?;

    let body = app_state.upstream.fetch(&file_id).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response())
}
