//! Endpoint behavior tests with scripted caption and completion backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::Response;

use clipchat_core::chat::{ChatRequest, ChatResponse, Message};
use clipchat_core::transcript::CaptionSegment;
use clipchat_llm::{ChatProvider, LLMError};
use clipchat_server::handlers::chat::{chat_handler, ChatRequestBody};
use clipchat_server::handlers::transcript::{transcript_handler, TranscriptRequest};
use clipchat_server::{AppState, ConversationManager};
use clipchat_session::SessionStore;
use clipchat_transcript::{CaptionSource, TranscriptFetcher};

/// Caption source that counts lookups and serves a fixed manual track
struct CountingSource {
    manual: Option<Vec<CaptionSegment>>,
    lookups: AtomicUsize,
}

impl CountingSource {
    fn with_manual(segments: Vec<CaptionSegment>) -> Arc<Self> {
        Arc::new(Self {
            manual: Some(segments),
            lookups: AtomicUsize::new(0),
        })
    }

    fn empty() -> Arc<Self> {
        Arc::new(Self {
            manual: None,
            lookups: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CaptionSource for CountingSource {
    async fn manual(&self, _video_id: &str) -> Option<Vec<CaptionSegment>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.manual.clone()
    }

    async fn generated(&self, _video_id: &str) -> Option<Vec<CaptionSegment>> {
        None
    }
}

/// Provider that either echoes a canned answer or fails every call
struct StubProvider {
    answer: Option<String>,
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn provider_id(&self) -> &str {
        "stub"
    }

    async fn chat(&self, _request: ChatRequest) -> clipchat_llm::Result<ChatResponse> {
        match &self.answer {
            Some(text) => Ok(ChatResponse::new(
                "stub-1",
                "stub-model",
                Message::assistant(text.clone()),
            )),
            None => Err(LLMError::Api {
                status: 500,
                message: "completion backend down".to_string(),
            }),
        }
    }
}

fn segments() -> Vec<CaptionSegment> {
    vec![
        CaptionSegment::new("hi", 0.0, 2.0),
        CaptionSegment::new("there", 65.0, 2.0),
    ]
}

fn state_with(source: Arc<CountingSource>, provider: StubProvider) -> Arc<AppState> {
    let fetcher = Arc::new(TranscriptFetcher::new(source));
    let conversations = Arc::new(ConversationManager::new(
        Arc::new(provider),
        SessionStore::default(),
        "stub-model",
    ));
    Arc::new(AppState {
        fetcher,
        conversations,
    })
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn chat_body(transcript: Option<Vec<CaptionSegment>>) -> ChatRequestBody {
    serde_json::from_value(serde_json::json!({
        "video_id": "abc123",
        "question": "summarize",
        "transcript": transcript,
        "metadata": {"title": "t", "description": "d"}
    }))
    .unwrap()
}

#[tokio::test]
async fn transcript_endpoint_returns_segments() {
    let state = state_with(
        CountingSource::with_manual(segments()),
        StubProvider { answer: None },
    );

    let request = TranscriptRequest {
        video_id: "abc123".to_string(),
        timestamp: None,
    };
    let response = transcript_handler(State(state), Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["text"], "hi");
}

#[tokio::test]
async fn transcript_endpoint_404s_with_detail_when_unavailable() {
    let state = state_with(CountingSource::empty(), StubProvider { answer: None });

    let request = TranscriptRequest {
        video_id: "does-not-exist".to_string(),
        timestamp: None,
    };
    let response = transcript_handler(State(state), Json(request)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    let detail = json["detail"].as_str().unwrap();
    assert!(!detail.is_empty());
}

#[tokio::test]
async fn chat_without_transcript_fetches_exactly_once() {
    let source = CountingSource::with_manual(segments());
    let state = state_with(
        source.clone(),
        StubProvider {
            answer: Some("an answer".to_string()),
        },
    );

    let response = chat_handler(State(state), Json(chat_body(None))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.lookups.load(Ordering::SeqCst), 1);
    let json = body_json(response).await;
    assert_eq!(json["response"], "an answer");
}

#[tokio::test]
async fn chat_with_transcript_never_fetches() {
    let source = CountingSource::with_manual(segments());
    let state = state_with(
        source.clone(),
        StubProvider {
            answer: Some("an answer".to_string()),
        },
    );

    let response = chat_handler(State(state), Json(chat_body(Some(segments())))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_completion_failure_still_answers_with_text() {
    let state = state_with(
        CountingSource::with_manual(segments()),
        StubProvider { answer: None },
    );

    let response = chat_handler(State(state), Json(chat_body(Some(segments())))).await;

    // Legacy contract: completion failures are a 200 whose text describes
    // the error, not an HTTP error.
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let text = json["response"].as_str().unwrap();
    assert!(text.starts_with("Error processing question:"));
    assert!(text.contains("completion backend down"));
}

#[tokio::test]
async fn chat_transcript_fetch_failure_is_a_500() {
    let state = state_with(
        CountingSource::empty(),
        StubProvider {
            answer: Some("never reached".to_string()),
        },
    );

    let response = chat_handler(State(state), Json(chat_body(None))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("transcript"));
}
