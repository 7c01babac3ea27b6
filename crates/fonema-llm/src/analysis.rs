//! The fixed analysis prompt and the nominal result shape.

use serde::{Deserialize, Serialize};

/// Candidate Gemini models in priority order: current standard model
/// first, then progressively older fallbacks.
pub const DEFAULT_MODEL_CANDIDATES: [&str; 4] = [
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-flash-latest",
    "gemini-1.5-flash-latest",
];

/// Nominal shape of a pronunciation analysis.
///
/// The upstream model is instructed to produce exactly these keys. The
/// HTTP handler passes the parsed object through without enforcing this
/// shape; the struct documents the contract and backs the tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// IPA transcription, e.g. `/tʃiz/`.
    pub ipa: String,
    /// Approximate respelling using Spanish orthography, e.g. `chiis`.
    pub spanish_sound: String,
    /// One short pronunciation instruction.
    pub tip: String,
}

/// Build the fixed instructional prompt embedding `text` verbatim.
///
/// The wording demands a bare JSON object, no fences, no prose.
/// Sanitization still runs on the response because models routinely
/// ignore the formatting demand.
pub fn analysis_prompt(text: &str) -> String {
    format!(
        r#"Analiza la palabra/frase: "{text}".
Responde SOLO un JSON con este formato exacto (sin bloques de código markdown, solo el json plano):
{{
    "ipa": "IPA standard",
    "spanish_sound": "pronunciación figurada (ej: chiis)",
    "tip": "Un consejo corto y práctico para pronunciarlo bien en español."
}}"#
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
