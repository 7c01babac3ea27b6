//! Google Gemini provider over the `generateContent` REST endpoint.
//!
//! API-key authentication only: the key rides in the URL query string,
//! matching `generativelanguage.googleapis.com` conventions. One call
//! submits one prompt and awaits the full (non-streaming) response.

pub mod types;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, instrument};

use crate::provider::{Provider, ProviderError, ProviderResult};

use types::{
    Content, DEFAULT_BASE_URL, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};

/// Configuration for the Gemini client.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Upstream API key.
    pub api_key: String,
    /// Override for the API base URL (tests point this at a mock server).
    pub base_url: Option<String>,
    /// Generation parameters applied to every request.
    pub generation: Option<GenerationConfig>,
}

impl GeminiConfig {
    /// Config with just an API key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            generation: None,
        }
    }
}

/// Gemini client implementing [`Provider`].
pub struct GeminiClient {
    config: GeminiConfig,
    /// HTTP client (reused across requests).
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client with its own HTTP connection pool.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a new client with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: GeminiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// URL for a `generateContent` call against `model`.
    fn api_url(&self, model: &str) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{base}/models/{model}:generateContent?key={}", self.config.api_key)
    }
}

/// Parse an API error response body.
///
/// Gemini error bodies look like `{"error":{"message","status"}}`;
/// anything else is reported as the raw body.
fn parse_api_error(body: &str, status: u16) -> (String, Option<String>) {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &json["error"];
        let message = error["message"]
            .as_str()
            .unwrap_or("Unknown error")
            .to_string();
        let code = error["status"].as_str().map(String::from);
        (message, code)
    } else {
        (format!("HTTP {status}: {body}"), None)
    }
}

#[async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, prompt))]
    async fn generate(&self, model: &str, prompt: &str) -> ProviderResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: prompt.to_string() }],
            }],
            generation_config: self.config.generation.clone(),
        };

        debug!(prompt_len = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.api_url(model))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let (message, code) = parse_api_error(&body_text, status.as_u16());
            error!(
                status = status.as_u16(),
                code = code.as_deref().unwrap_or("unknown"),
                "Gemini API error"
            );
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
                code,
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(ProviderError::Http)?;

        parsed
            .first_candidate_text()
            .ok_or_else(|| ProviderError::EmptyResponse {
                model: model.to_string(),
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
