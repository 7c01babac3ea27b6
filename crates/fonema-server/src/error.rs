//! API error responses.
//!
//! Every failure path in the service converges here and leaves as a
//! JSON body `{"error": <message>}` (plus an optional `details` field
//! on exhaustion); nothing reaches the transport layer as a raw fault.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fonema_llm::provider::ProviderError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request used a method other than POST.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The `text` field is missing or blank.
    #[error("Text is required")]
    MissingText,

    /// Every upstream candidate failed.
    #[error("All models failed")]
    Exhausted {
        /// Last underlying error, when upstream details are exposed.
        details: Option<String>,
    },
}

impl ApiError {
    /// Map an upstream error to the caller-facing 500.
    ///
    /// `expose` selects between the two observed conventions: surface
    /// the last underlying error as `details`, or the generic message
    /// alone.
    pub fn from_provider(err: ProviderError, expose: bool) -> Self {
        let details = expose.then(|| match err {
            ProviderError::Exhausted { last: Some(last), .. } => last.to_string(),
            other => other.to_string(),
        });
        Self::Exhausted { details }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingText => StatusCode::BAD_REQUEST,
            Self::Exhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.to_string() });
        if let Self::Exhausted { details: Some(ref details) } = self {
            body["details"] = json!(details);
        }
        (self.status(), Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
