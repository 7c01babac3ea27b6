//! Server and upstream configuration.

use serde::{Deserialize, Serialize};

use fonema_llm::analysis::DEFAULT_MODEL_CANDIDATES;

/// Errors raised while assembling configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The upstream credential environment variable is absent or empty.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

/// HTTP server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Include the last upstream error as a `details` field on 500s.
    pub expose_upstream_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            expose_upstream_errors: true,
        }
    }
}

/// Upstream (Gemini) configuration: credential plus candidate models.
///
/// The credential is an explicit value injected at construction time —
/// never read ad hoc inside a handler — so tests can substitute a stub
/// provider without touching the process environment.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// API key for the generative-language API.
    pub api_key: String,
    /// Override for the API base URL.
    pub base_url: Option<String>,
    /// Candidate models in priority order.
    pub models: Vec<String>,
}

impl UpstreamConfig {
    /// Environment variable holding the upstream credential.
    pub const API_KEY_VAR: &'static str = "GEMINI_API_KEY";

    /// Build from the process environment.
    ///
    /// Fails when [`Self::API_KEY_VAR`] is absent or blank; a missing
    /// credential is a fatal configuration error, not something to
    /// discover on the first request.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(Self::API_KEY_VAR).ok())
    }

    /// Build from an already-looked-up credential value.
    ///
    /// The seam [`Self::from_env`] goes through; tests exercise this
    /// directly instead of mutating the process environment.
    pub fn from_env_value(value: Option<String>) -> Result<Self, ConfigError> {
        let api_key = value
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key,
            base_url: None,
            models: default_models(),
        })
    }
}

/// The default candidate list as owned strings.
pub fn default_models() -> Vec<String> {
    DEFAULT_MODEL_CANDIDATES.iter().map(|m| (*m).to_string()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
