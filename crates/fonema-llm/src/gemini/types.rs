//! Gemini wire types for the `generateContent` endpoint.
//!
//! Only the subset of the API this service touches: a single-turn text
//! request, optional generation parameters, and the candidate/part
//! structure of the response.

use serde::{Deserialize, Serialize};

/// Default base URL for API-key access to the generative-language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request body for `models/{model}:generateContent`.
#[derive(Clone, Debug, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn for this service.
    pub contents: Vec<Content>,
    /// Generation parameters.
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversation turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Content {
    /// Turn role (`"user"` on requests, `"model"` on responses).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Text parts of the turn.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single text part.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Part {
    /// UTF-8 text payload.
    pub text: String,
}

/// Generation parameters (subset used by this service).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Response body for `generateContent`.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates; only the first is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
    /// Generated content.
    pub content: Option<Content>,
    /// Why generation stopped (e.g. `"STOP"`, `"MAX_TOKENS"`).
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    ///
    /// `None` when there are no candidates or the first candidate
    /// carries no text.
    pub fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
