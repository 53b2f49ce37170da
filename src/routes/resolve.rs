use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::metrics::{CHANNELS_RETURNED, RESOLVE_FAILURES, RESOLVE_REQUESTS};
use crate::models::{ResolutionResult, SourceDescriptor};
use crate::AppState;

/// Swap an upload reference for the stored playlist text
///
/// Inline content wins; an unknown filename leaves the content empty, which
/// resolves to an empty result.
async fn attach_upload(state: &AppState, source: SourceDescriptor) -> SourceDescriptor {
    match source {
        SourceDescriptor::Upload { filename, content } if content.trim().is_empty() => {
            let content = match state.uploads.get(filename.trim()).await {
                Some(stored) => stored.to_string(),
                None => {
                    tracing::warn!("Upload {:?} not found", filename);
                    String::new()
                }
            };
            SourceDescriptor::Upload { filename, content }
        }
        other => other,
    }
}

/// POST /api/resolve - Resolve a source descriptor into channels and folders
pub async fn resolve_source(
    State(state): State<Arc<AppState>>,
    Json(source): Json<SourceDescriptor>,
) -> Result<Json<ResolutionResult>, (StatusCode, Json<serde_json::Value>)> {
    let kind = source.kind();
    RESOLVE_REQUESTS.with_label_values(&[kind]).inc();

    let source = attach_upload(&state, source).await;

    match state.resolver.resolve(source).await {
        Ok(result) => {
            CHANNELS_RETURNED.observe(result.channels.len() as f64);
            if result.is_empty() {
                tracing::info!("Nothing found for {} source", kind);
                return Ok(Json(result));
            }
            if let Some(first) = result.channels.first() {
                tracing::debug!("First channel: {} -> {}", first.name(), first.url());
            }
            tracing::info!(
                "Resolved {} source: {} channels, {} folders",
                kind,
                result.channels.len(),
                result.folders.len()
            );
            Ok(Json(result))
        }
        Err(e) => {
            RESOLVE_FAILURES.with_label_values(&[kind]).inc();
            tracing::error!("Failed to resolve {} source: {}", kind, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": "failed to fetch playlist",
                    "detail": e.to_string(),
                })),
            ))
        }
    }
}
