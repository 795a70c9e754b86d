//! OpenAI-compatible chat-completions backend for outline generation.
//!
//! Credentials are resolved from the environment at call time, not startup:
//! the model id's provider prefix picks the backend, falling back to any
//! configured one. Supported backends all speak the chat-completions wire
//! format, so one request/response path covers Groq, Together, and
//! OpenRouter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{GenerateError, GeneratedOutline, OutlineGenerator, missing_credentials_error};
use crate::models::presentation::Slide;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const TOGETHER_API_URL: &str = "https://api.together.xyz/v1/chat/completions";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

const BACKENDS: [(&str, &str, &str); 3] = [
    ("groq", GROQ_API_URL, "GROQ_API_KEY"),
    ("together", TOGETHER_API_URL, "TOGETHER_API_KEY"),
    ("openrouter", OPENROUTER_API_URL, "OPENROUTER_API_KEY"),
];

const OUTLINE_SYSTEM_PROMPT: &str = "You design presentation outlines. Respond with a single JSON \
object: {\"title\": string, \"slides\": [{\"id\": string, \"title\": string, \"bullets\": \
[string], \"layout\": \"title-bullets\" | \"image-text\" | \"full-image\", \"images\": [], \
\"notes\": string}]}. Use 3 to 8 slides and concise bullets. No prose outside the JSON.";

const REPROMPT_SYSTEM_PROMPT: &str = "You revise a single presentation slide. Respond with one \
JSON object with the same shape as the slide you were given, keeping its \"id\". Apply the \
user's instruction; keep the layout unless the instruction clearly calls for a different one. \
No prose outside the JSON.";

pub struct HttpGenerator {
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl HttpGenerator {
    /// Build a generator whose requests are bounded by `timeout`; a timeout
    /// surfaces as an upstream error, never a partial store mutation.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");
        HttpGenerator { client }
    }

    async fn chat(&self, system: &str, user: &str, model: &str) -> Result<String, GenerateError> {
        let (url, key) = resolve_backend(model)?;
        let body = json!({
            "model": request_model(model),
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.7,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Upstream("generation backend timed out".to_string())
                } else {
                    GenerateError::Upstream(format!("generation request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerateError::Upstream(format!("failed to read backend response: {e}")))?;
        if !status.is_success() {
            return Err(GenerateError::Upstream(format!(
                "generation backend returned {status}: {text}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GenerateError::Upstream(format!("malformed backend response: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GenerateError::Upstream("backend response had no choices".to_string()))
    }
}

#[async_trait]
impl OutlineGenerator for HttpGenerator {
    async fn generate_outline(
        &self,
        prompt: &str,
        document_context: &str,
        model: &str,
    ) -> Result<GeneratedOutline, GenerateError> {
        let mut user = prompt.to_string();
        if !document_context.trim().is_empty() {
            user.push_str("\n\nSource material:");
            user.push_str(document_context);
        }

        let content = self.chat(OUTLINE_SYSTEM_PROMPT, &user, model).await?;
        let mut outline: GeneratedOutline = parse_json_payload(&content)?;
        for (i, slide) in outline.slides.iter_mut().enumerate() {
            if slide.id.is_empty() {
                slide.id = format!("slide-{}", i + 1);
            }
            // Images are only ever uploaded, never generated.
            slide.images.clear();
        }
        Ok(outline)
    }

    async fn reprompt_slide(
        &self,
        current: &Slide,
        instruction: &str,
        model: &str,
    ) -> Result<Slide, GenerateError> {
        let current_json = serde_json::to_string(current)
            .map_err(|e| GenerateError::Upstream(format!("failed to encode slide: {e}")))?;
        let user = format!("Current slide:\n{current_json}\n\nInstruction: {instruction}");

        let content = self.chat(REPROMPT_SYSTEM_PROMPT, &user, model).await?;
        let mut slide: Slide = parse_json_payload(&content)?;
        slide.id = current.id.clone();
        slide.images = current.images.clone();
        Ok(slide)
    }
}

/// Pick the backend by model-id prefix (`groq-mixtral` goes to Groq when a
/// Groq key is set), falling back to the first configured backend. Only when
/// no key is set anywhere is this a configuration error.
fn resolve_backend(model: &str) -> Result<(&'static str, String), GenerateError> {
    for (prefix, url, var) in BACKENDS {
        if model.starts_with(prefix) {
            if let Ok(key) = std::env::var(var) {
                return Ok((url, key));
            }
        }
    }
    for (_, url, var) in BACKENDS {
        if let Ok(key) = std::env::var(var) {
            return Ok((url, key));
        }
    }
    Err(missing_credentials_error())
}

/// Strip a known provider prefix from the model id before sending it
/// upstream; backends expect their own model names.
fn request_model(model: &str) -> &str {
    for (prefix, _, _) in BACKENDS {
        if let Some(rest) = model.strip_prefix(prefix).and_then(|m| m.strip_prefix('-')) {
            return rest;
        }
    }
    model
}

fn parse_json_payload<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, GenerateError> {
    serde_json::from_str(strip_code_fences(content))
        .map_err(|e| GenerateError::Upstream(format!("backend returned unusable content: {e}")))
}

/// Models sometimes wrap JSON output in a markdown code fence even when asked
/// not to; tolerate that.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_model_strips_known_prefixes() {
        assert_eq!(request_model("groq-mixtral"), "mixtral");
        assert_eq!(request_model("together-llama-3"), "llama-3");
        assert_eq!(request_model("gpt-4o"), "gpt-4o");
    }

    #[test]
    fn strip_code_fences_handles_fenced_and_bare() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn parse_json_payload_reports_unusable_content() {
        let err = parse_json_payload::<GeneratedOutline>("not json").unwrap_err();
        assert!(matches!(err, GenerateError::Upstream(_)));
    }

    #[test]
    fn parse_json_payload_fills_slide_defaults() {
        let outline: GeneratedOutline = parse_json_payload(
            "{\"title\": \"T\", \"slides\": [{\"title\": \"S\", \"bullets\": [\"b\"]}]}",
        )
        .expect("parse");
        assert_eq!(outline.slides.len(), 1);
        assert_eq!(
            outline.slides[0].layout,
            crate::models::presentation::SlideLayout::TitleBullets
        );
    }
}
