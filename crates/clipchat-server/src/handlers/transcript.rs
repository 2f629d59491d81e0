//! `POST /api/transcript` - fetch a video's caption segments.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use super::ErrorDetail;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub video_id: String,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

/// Returns the transcript as a JSON array of segments, or 404 with a
/// `detail` message when no captions exist.
pub async fn transcript_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranscriptRequest>,
) -> Response {
    tracing::info!(
        video_id = %request.video_id,
        timestamp = ?request.timestamp,
        "transcript request"
    );

    match state
        .fetcher
        .fetch(&request.video_id, request.timestamp)
        .await
    {
        Ok(segments) => (StatusCode::OK, Json(segments)).into_response(),
        Err(e) => {
            tracing::warn!(video_id = %request.video_id, error = %e, "transcript unavailable");
            (StatusCode::NOT_FOUND, Json(ErrorDetail::new(e.to_string()))).into_response()
        }
    }
}
