//! Ordered candidate fallback.
//!
//! Candidates are tried strictly in sequence; the first whose response
//! parses to a JSON object wins and later candidates are never invoked.
//! Every per-candidate failure (transport, API error, empty response,
//! malformed JSON) advances the loop. There is no backoff, no delay,
//! and no parallelism — the list is ordered most-preferred-first and
//! exits early, it does not race.

use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::analysis_prompt;
use crate::provider::{Provider, ProviderError, ProviderResult};
use crate::sanitize::parse_object;

/// Run the candidate sequence for `text` and return the first response
/// that parses to a JSON object.
///
/// When every candidate fails, returns [`ProviderError::Exhausted`]
/// carrying the last underlying error. An empty candidate list is
/// immediate exhaustion.
pub async fn generate_analysis(
    provider: &dyn Provider,
    candidates: &[String],
    text: &str,
) -> ProviderResult<Value> {
    let prompt = analysis_prompt(text);
    let mut last: Option<ProviderError> = None;

    for model in candidates {
        info!(provider = provider.name(), model = %model, "attempting candidate");
        match attempt(provider, model, &prompt).await {
            Ok(value) => {
                info!(model = %model, "candidate succeeded");
                return Ok(value);
            }
            Err(err) => {
                warn!(model = %model, category = err.category(), error = %err, "candidate failed");
                last = Some(err);
            }
        }
    }

    Err(ProviderError::Exhausted {
        attempts: candidates.len(),
        last: last.map(Box::new),
    })
}

/// One candidate attempt: generate, sanitize, parse.
async fn attempt(provider: &dyn Provider, model: &str, prompt: &str) -> ProviderResult<Value> {
    let raw = provider.generate(model, prompt).await?;
    Ok(parse_object(&raw)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
