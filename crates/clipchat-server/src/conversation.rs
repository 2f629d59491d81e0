//! Per-video conversation orchestration.
//!
//! Seeds a session with the system prompt and transcript context on the
//! first question, then keeps forwarding the whole history to the chat
//! provider. The session lock is held across the completion call, so
//! concurrent questions for the same video serialize.

use std::sync::Arc;

use clipchat_core::chat::{ChatRequest, Message};
use clipchat_core::format::render_transcript;
use clipchat_core::transcript::{CaptionSegment, VideoMetadata};
use clipchat_llm::{ChatProvider, LLMError};
use clipchat_session::SessionStore;
use thiserror::Error;

/// Fixed sampling temperature for every completion
const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens per answer
const MAX_RESPONSE_TOKENS: u32 = 500;

#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("chat completion failed: {0}")]
    Completion(#[from] LLMError),
}

/// Drives the per-video Q&A loop against a chat completion provider
pub struct ConversationManager {
    provider: Arc<dyn ChatProvider>,
    store: SessionStore,
    model: String,
}

impl ConversationManager {
    pub fn new(provider: Arc<dyn ChatProvider>, store: SessionStore, model: impl Into<String>) -> Self {
        Self {
            provider,
            store,
            model: model.into(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Answer `question` about the video, grounded in `transcript`.
    ///
    /// The caller must supply a transcript; when the client did not send
    /// one, the HTTP layer fetches it before calling here.
    ///
    /// On provider failure the question stays in the session, so a retry by
    /// the user continues the same history.
    pub async fn ask(
        &self,
        video_id: &str,
        question: &str,
        transcript: &[CaptionSegment],
        metadata: &VideoMetadata,
    ) -> Result<String, ConversationError> {
        let session = self.store.get_or_create(video_id);
        let mut session = session.lock().await;

        if !session.is_seeded() {
            tracing::debug!(video_id, segments = transcript.len(), "seeding session");
            session.push(Message::system(system_prompt(metadata)));
            session.push(Message::system(format!(
                "Here's the video transcript:\n{}",
                render_transcript(transcript)
            )));
        }

        session.push(Message::user(question));

        let request = ChatRequest::new(self.model.clone())
            .with_messages(session.messages.clone())
            .temperature(TEMPERATURE)
            .max_tokens(MAX_RESPONSE_TOKENS);

        let response = self.provider.chat(request).await?;
        let answer = response.text().to_string();

        session.push(Message::assistant(answer.clone()));
        tracing::debug!(video_id, history = session.len(), "appended assistant reply");

        Ok(answer)
    }
}

/// Build the fixed system prompt for a video.
///
/// The timestamp examples here must match `format_timestamp`: the model is
/// told to answer in the same format the transcript context uses.
fn system_prompt(metadata: &VideoMetadata) -> String {
    format!(
        "You are an AI assistant analyzing a YouTube video.\n\
         Video Title: {}\n\
         Video Description: {}\n\
         \n\
         You have access to the video's transcript and can answer questions about its content.\n\
         Base your answers only on the provided transcript and metadata.\n\
         If asked about timestamps, refer to the transcript segments.\n\
         \n\
         Important instructions for timestamp format:\n\
         1. For videos under 1 hour, use [MM:SS].\n\
            Example: [05:35] for 5 minutes 35 seconds.\n\
            Example: [14:02] for 14 minutes 2 seconds.\n\
         2. For videos of 1 hour or more, use [H:MM:SS].\n\
            Example: [1:05:35] for 1 hour 5 minutes 35 seconds.\n\
            Example: [2:14:02] for 2 hours 14 minutes 2 seconds.",
        metadata.title, metadata.description
    )
}
