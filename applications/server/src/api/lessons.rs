/// Lesson catalog API
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use lesson_core::Catalog;
use std::io::ErrorKind;

/// GET /api/lessons
/// Normalised catalog; a missing or malformed file yields `[]`
pub async fn list_lessons(State(app_state): State<AppState>) -> Result<Json<Catalog>> {
    let path = &app_state.config.content.catalog_path;

    let catalog = match tokio::fs::read_to_string(path).await {
        Ok(json) => Catalog::from_json_or_empty(&json),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("No catalog at {}", path.display());
            Catalog::default()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(catalog))
}
