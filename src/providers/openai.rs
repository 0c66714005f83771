use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::ChatProvider;

/// Client for an OpenAI-compatible chat completions API
#[derive(Debug)]
pub struct OpenAICompatible {
    /// HTTP client for API requests
    client: Client,
    /// API key passed as a bearer token
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// One completion choice in a chat response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// The completion choices; the first entry carries the output
    pub choices: Vec<ChatChoice>,

    /// Token usage information, when the API reports it
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatCompletionRequest {
    /// Create a new chat completion request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token bound
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// The messages currently on the request
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl ChatCompletionResponse {
    /// Extract the first choice's message content
    pub fn first_content(&self) -> Result<&str, ProviderError> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ProviderError::ParseError("Response contained no choices".to_string()))
    }
}

impl OpenAICompatible {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, 60)
    }

    /// Create a new client with a request timeout in seconds
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Send a chat completion request
    pub async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        };

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to send generation request: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = api_error_from(status, &body);
            error!("Generation API error: {}", error);
            return Err(error);
        }

        response.json::<ChatCompletionResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse generation response: {}", e))
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatible {
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        self.send(&request).await
    }
}

/// Map a non-success response to an `ApiError`.
///
/// The message is taken from the body when it carries one; otherwise a
/// generic fallback naming the status, so the surfaced message is never
/// empty.
fn api_error_from(status: reqwest::StatusCode, body: &str) -> ProviderError {
    let message = error_message_from_body(body)
        .unwrap_or_else(|| format!("Generation request failed with status {}", status));
    ProviderError::ApiError {
        status_code: status.as_u16(),
        message,
    }
}

/// Pull the error message out of an API error body.
///
/// The APIs in play report errors as `{"error": {"message": "..."}}`; anything
/// else (empty body, HTML error page, unexpected shape) yields `None` and the
/// caller falls back to a generic message.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}
