//! # `OpenAI`-Compatible Vision Client
//!
//! Sends nutrition prompts to any `OpenAI`-compatible `chat/completions` endpoint.
//! Images travel inline as `data:` URLs in an `image_url` content part.
//!
//! ## Configuration
//!
//! - `AI_BASE_URL`: Base URL (default: <https://api.openai.com/v1>)
//! - `AI_MODEL`: Model to use (default: `gpt-4o`)
//! - `OPENAI_API_KEY`: Bearer token; without it every request fails fast
//!
//! There is no retry. A failed call is reported straight back to the caller.

use super::{VisionModel, VisionRequest};
use crate::config::settings::AiSettings;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

/// Plain text for the system message, content parts when an image is attached.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Vision client for `OpenAI`-compatible providers.
pub struct OpenAiVisionClient {
    client: Client,
    settings: AiSettings,
}

impl OpenAiVisionClient {
    /// Creates a client for the provider described by `settings`.
    #[must_use]
    pub fn new(settings: AiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url)
    }

    fn build_body(&self, request: &VisionRequest) -> ChatCompletionRequest {
        let user_content = match &request.image_url {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: request.text.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: url.clone() },
                },
            ]),
            None => MessageContent::Text(request.text.clone()),
        };

        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system.clone()),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            max_tokens: request.max_tokens,
        }
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> Error {
        let detail = serde_json::from_str::<ApiErrorBody>(body)
            .map_or_else(|_| body.chars().take(200).collect(), |b| b.error.message);
        Error::provider(format!("provider returned {status}: {detail}"))
    }
}

#[async_trait]
impl VisionModel for OpenAiVisionClient {
    #[instrument(skip_all, fields(has_image = request.image_url.is_some()))]
    async fn complete(&self, request: &VisionRequest) -> Result<String> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| Error::provider("AI provider is not configured (OPENAI_API_KEY)"))?;

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to AI provider: {}", e);
                Error::provider(format!("failed to reach provider: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read AI provider response: {}", e);
            Error::provider(format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::provider(format!("unexpected response shape: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::provider("provider returned no content"))?;

        debug!("Received {} chars from AI provider", content.len());
        Ok(content)
    }
}
