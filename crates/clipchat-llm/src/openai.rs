//! OpenAI chat completions provider.
//!
//! Works with api.openai.com or any compatible endpoint via a custom base
//! URL. One request per call, no retries: a failed completion is reported to
//! the caller, not papered over.

use async_trait::async_trait;
use clipchat_core::chat::{ChatRequest, ChatResponse, ChatUsage, Message, Role};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::error::{LLMError, Result};
use crate::provider::ChatProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-1106-preview";

/// Provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL for the API
    pub base_url: String,
    /// API key; `None` means requests go out unauthenticated and the API
    /// rejects them, which surfaces as an `Auth` error downstream
    pub api_key: Option<String>,
    /// Default model to use
    pub model: String,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// OpenAI-compatible chat completion provider
pub struct OpenAiProvider {
    config: ProviderConfig,
    http_client: Client,
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| LLMError::Config(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(key) = &self.config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| LLMError::Config(format!("invalid api key header: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn provider_id(&self) -> &str {
        "openai"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = WireChatRequest::from_request(&request);
        let headers = self.build_headers()?;
        let url = format!("{}/chat/completions", self.config.base_url);

        tracing::debug!(model = %body.model, messages = body.messages.len(), "sending chat completion request");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LLMError::Auth(error_text),
                _ => LLMError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let data: WireChatResponse = response
            .json()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        data.into_response()
    }
}

/// OpenAI-compatible chat completion request body
#[derive(Debug, Serialize)]
struct WireChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl WireChatRequest {
    fn from_request(request: &ChatRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }
}

/// OpenAI-compatible message
#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct WireChatResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

impl WireChatResponse {
    fn into_response(self) -> Result<ChatResponse> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::InvalidResponse("response contained no choices".to_string()))?;

        let message = Message {
            role: match choice.message.role.as_str() {
                "system" => Role::System,
                "user" => Role::User,
                _ => Role::Assistant,
            },
            content: choice.message.content,
        };

        let usage = self
            .usage
            .map(|u| ChatUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(ChatResponse::new(self.id, self.model, message).with_usage(usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipchat_core::chat::Message;

    #[test]
    fn wire_request_carries_sampling_options() {
        let request = ChatRequest::new("gpt-4-1106-preview")
            .with_message(Message::system("prompt"))
            .with_message(Message::user("question"))
            .temperature(0.7)
            .max_tokens(500);

        let body = WireChatRequest::from_request(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4-1106-preview");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "question");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn wire_response_takes_first_choice() {
        let raw = serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-4-1106-preview",
            "choices": [
                {"message": {"role": "assistant", "content": "answer"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });

        let parsed: WireChatResponse = serde_json::from_value(raw).unwrap();
        let response = parsed.into_response().unwrap();
        assert_eq!(response.text(), "answer");
        assert_eq!(response.usage.total_tokens, 15);
    }

    #[test]
    fn wire_response_without_choices_is_an_error() {
        let raw = serde_json::json!({"id": "x", "model": "m", "choices": []});
        let parsed: WireChatResponse = serde_json::from_value(raw).unwrap();
        assert!(parsed.into_response().is_err());
    }
}
