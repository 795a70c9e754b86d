//! Outline generation adapter.
//!
//! Bridges user intent (free-text prompt, reprompt instruction, uploaded
//! document text, model id) to a structural slide delta. Callers treat the
//! generator as an opaque capability behind [`OutlineGenerator`], so the
//! HTTP-backed implementation and the test stubs are interchangeable without
//! touching the store or the routes.

mod http;

pub use http::HttpGenerator;

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use crate::models::presentation::Slide;

#[derive(Debug)]
pub enum GenerateError {
    /// No credential available for any supported backend.
    Configuration(String),
    /// Backend unreachable, timed out, rejected the request, or returned
    /// content that could not be parsed.
    Upstream(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Configuration(e) => write!(f, "configuration: {e}"),
            GenerateError::Upstream(e) => write!(f, "upstream: {e}"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// A generated presentation outline: a title plus an ordered slide sequence.
/// Generated slides carry generator-assigned ids and empty `images` (images
/// are only ever uploaded, never generated).
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedOutline {
    #[serde(default)]
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

#[async_trait]
pub trait OutlineGenerator: Send + Sync {
    /// Generate an outline from a prompt and pre-assembled document context
    /// (concatenated extracted text with filename headers; assembling it is
    /// the caller's job). On failure no presentation is created.
    async fn generate_outline(
        &self,
        prompt: &str,
        document_context: &str,
        model: &str,
    ) -> Result<GeneratedOutline, GenerateError>;

    /// Regenerate one slide per a free-text instruction. Returns a complete
    /// replacement slide with the same id; `images` are preserved from the
    /// current slide. On failure the enclosing presentation is untouched
    /// (callers must not write to the store until this succeeds).
    async fn reprompt_slide(
        &self,
        current: &Slide,
        instruction: &str,
        model: &str,
    ) -> Result<Slide, GenerateError>;
}

pub(crate) fn missing_credentials_error() -> GenerateError {
    GenerateError::Configuration(
        "no generation API key configured (set GROQ_API_KEY, TOGETHER_API_KEY or OPENROUTER_API_KEY)"
            .to_string(),
    )
}
