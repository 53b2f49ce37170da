use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::metrics::UPLOADS;
use crate::services::m3u_parser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub filename: String,
    pub size: usize,
    pub channels: usize,
    pub uploaded_at: i64,
}

/// POST /api/upload - Store playlist text for later `upload` sources
pub async fn upload_playlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UploadRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let filename = payload.filename.trim();

    if filename.is_empty() || payload.content.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Invalid file data" })),
        ));
    }

    let channels = m3u_parser::parse(&payload.content).len();
    state.uploads.put(filename, &payload.content).await;
    UPLOADS.inc();

    tracing::info!(
        "Stored upload {} ({} bytes, {} channels)",
        filename,
        payload.content.len(),
        channels
    );

    Ok(Json(UploadResponse {
        filename: filename.to_string(),
        size: payload.content.len(),
        channels,
        uploaded_at: chrono::Utc::now().timestamp_millis(),
    }))
}
