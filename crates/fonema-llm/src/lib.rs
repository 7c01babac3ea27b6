//! # fonema-llm
//!
//! Upstream model access for the pronunciation analyzer:
//! - `Provider` trait abstracting the generative-language API
//! - Gemini `generateContent` client (API-key auth)
//! - Response sanitization (fence stripping, brace-span extraction)
//! - Ordered candidate fallback with first-success-wins semantics

#![deny(unsafe_code)]

pub mod analysis;
pub mod fallback;
pub mod gemini;
pub mod provider;
pub mod sanitize;
