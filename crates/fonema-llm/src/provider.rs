//! # Provider Trait
//!
//! Core abstraction over the upstream generative-language API. The HTTP
//! handler and the fallback runner talk to `dyn Provider`, so tests can
//! substitute a scripted stub without network access.

use async_trait::async_trait;

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when calling an upstream model.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream returned an API error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
        /// Provider-specific error code.
        code: Option<String>,
    },

    /// The model returned a response with no usable text.
    #[error("empty response from model {model}")]
    EmptyResponse {
        /// Model that produced the empty response.
        model: String,
    },

    /// Every candidate model failed.
    #[error("all {attempts} candidate models failed")]
    Exhausted {
        /// Number of candidates attempted.
        attempts: usize,
        /// The last underlying error, if any candidate was attempted.
        last: Option<Box<ProviderError>>,
    },
}

impl ProviderError {
    /// Error category string for structured log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(_) => "network",
            Self::Json(_) => "parse",
            Self::Api { .. } => "api",
            Self::EmptyResponse { .. } => "empty",
            Self::Exhausted { .. } => "exhausted",
        }
    }
}

/// Upstream text-generation trait.
///
/// Implementors must be `Send + Sync` for use across async tasks. One
/// call submits one prompt to one named model and resolves with the
/// model's raw text output; the caller owns sanitization and parsing.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g., `"gemini"`).
    fn name(&self) -> &str;

    /// Submit `prompt` to `model` and return the raw text response.
    async fn generate(&self, model: &str, prompt: &str) -> ProviderResult<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
