//! Defensive extraction of a JSON object from model output.
//!
//! Models asked for "raw JSON only" still wrap the payload in markdown
//! code fences or surround it with conversational prose. The pipeline
//! here strips fence markers, slices the text to the outermost brace
//! span, and only then hands it to the JSON parser. Parsing fails
//! closed: an unparseable response is an error that advances the
//! candidate fallback, never a silent empty result.

use serde_json::Value;

/// Remove markdown code-fence markers and trim surrounding whitespace.
///
/// Both ```` ```json ```` and bare ```` ``` ```` markers are removed
/// wherever they appear.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Slice from the first `{` to the last `}`, inclusive.
///
/// Returns the input unchanged when either bracket is missing or the
/// brackets are in the wrong order; the caller's parse then reports the
/// real problem.
pub fn extract_json_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => &text[first..=last],
        _ => text,
    }
}

/// Parse a raw model response into a JSON object.
///
/// Applies [`strip_code_fences`] and [`extract_json_span`], then
/// requires the result to parse as a JSON object — an array, string, or
/// other value is rejected, since the analysis contract promises an
/// object.
pub fn parse_object(text: &str) -> Result<Value, serde_json::Error> {
    use serde::de::Error;

    let cleaned = strip_code_fences(text);
    let span = extract_json_span(&cleaned);
    let value: Value = serde_json::from_str(span)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(serde_json::Error::custom("expected a JSON object"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
