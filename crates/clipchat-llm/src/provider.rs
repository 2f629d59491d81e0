use async_trait::async_trait;
use clipchat_core::chat::{ChatRequest, ChatResponse};

use crate::error::Result;

/// A chat completion backend.
///
/// The server talks to this trait only, so tests can swap the hosted API
/// for a scripted mock.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Stable identifier for logging
    fn provider_id(&self) -> &str;

    /// Send a full message history and get one generated message back
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}
