//! `POST /api/chat` - ask a question about a video.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use clipchat_core::transcript::{CaptionSegment, VideoMetadata};
use serde::{Deserialize, Serialize};

use super::ErrorDetail;
use crate::conversation::ConversationError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub video_id: String,
    pub question: String,
    /// Absent on follow-up questions; the handler fetches one on first use
    #[serde(default)]
    pub transcript: Option<Vec<CaptionSegment>>,
    #[serde(default)]
    pub metadata: VideoMetadata,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub response: String,
}

/// Answer a question about a video.
///
/// Completion failures still come back as HTTP 200 with the failure text in
/// `response` - the extension renders whatever text it gets, and the legacy
/// contract promised it always gets some. A missing transcript is fetched
/// here (no windowing) before the conversation runs; if that fetch fails the
/// request fails with 500 like any other unexpected error.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequestBody>,
) -> Response {
    tracing::info!(video_id = %request.video_id, "chat request");

    let transcript = match request.transcript {
        Some(segments) if !segments.is_empty() => segments,
        _ => {
            tracing::info!(video_id = %request.video_id, "no transcript provided, fetching");
            match state.fetcher.fetch(&request.video_id, None).await {
                Ok(segments) => segments,
                Err(e) => {
                    tracing::error!(video_id = %request.video_id, error = %e, "chat transcript fetch failed");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorDetail::new(e.to_string())),
                    )
                        .into_response();
                }
            }
        }
    };

    match state
        .conversations
        .ask(
            &request.video_id,
            &request.question,
            &transcript,
            &request.metadata,
        )
        .await
    {
        Ok(answer) => (StatusCode::OK, Json(ChatResponseBody { response: answer })).into_response(),
        Err(e @ ConversationError::Completion(_)) => {
            tracing::error!(video_id = %request.video_id, error = %e, "chat completion failed");
            (
                StatusCode::OK,
                Json(ChatResponseBody {
                    response: format!("Error processing question: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_null_deserializes_as_absent() {
        let body: ChatRequestBody = serde_json::from_str(
            r#"{"video_id":"abc123","question":"why?","transcript":null,"metadata":{"title":"t","description":"d"}}"#,
        )
        .unwrap();
        assert!(body.transcript.is_none());
        assert_eq!(body.metadata.title, "t");
    }

    #[test]
    fn transcript_segments_deserialize_in_order() {
        let body: ChatRequestBody = serde_json::from_str(
            r#"{"video_id":"abc123","question":"why?","transcript":[{"text":"a","start":0.0,"duration":1.0},{"text":"b","start":5.0,"duration":1.0}],"metadata":{}}"#,
        )
        .unwrap();
        let transcript = body.transcript.unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].text, "b");
    }

    #[test]
    fn missing_metadata_defaults_to_empty() {
        let body: ChatRequestBody =
            serde_json::from_str(r#"{"video_id":"abc123","question":"why?"}"#).unwrap();
        assert!(body.metadata.title.is_empty());
        assert!(body.transcript.is_none());
    }
}
