//! Direct calls to the four language-model providers.
//!
//! Used when the chat mode is `direct`: the desktop app fans a prompt out
//! itself instead of going through the chat service.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{error, info};

use crate::error::ScanError;
use crate::http::{build_client, read_success_body};

pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelBackend {
    Gpt4,
    Gemini,
    Llama,
    Claude,
}

impl ModelBackend {
    pub const ALL: [ModelBackend; 4] = [
        ModelBackend::Gpt4,
        ModelBackend::Gemini,
        ModelBackend::Llama,
        ModelBackend::Claude,
    ];

    /// Key used in the chat response mapping.
    pub fn id(self) -> &'static str {
        match self {
            ModelBackend::Gpt4 => "gpt4",
            ModelBackend::Gemini => "gemini",
            ModelBackend::Llama => "llama",
            ModelBackend::Claude => "claude",
        }
    }

    /// Short name used in `Error (...)` answers.
    pub fn error_label(self) -> &'static str {
        match self {
            ModelBackend::Gpt4 => "GPT",
            ModelBackend::Gemini => "Gemini",
            ModelBackend::Llama => "Llama",
            ModelBackend::Claude => "Claude",
        }
    }

    pub fn keychain_service(self) -> &'static str {
        match self {
            ModelBackend::Gpt4 => "dentai-openai-api",
            ModelBackend::Gemini => "dentai-gemini-api",
            ModelBackend::Llama => "dentai-groq-api",
            ModelBackend::Claude => "dentai-claude-api",
        }
    }

    /// Environment variable consulted when the keychain has no entry.
    pub fn env_var(self) -> &'static str {
        match self {
            ModelBackend::Gpt4 => "OPENAI_KEY",
            ModelBackend::Gemini => "GEMINI_KEY",
            ModelBackend::Llama => "GROQ_KEY",
            ModelBackend::Claude => "CLAUDE_KEY",
        }
    }

    pub fn model(self) -> &'static str {
        match self {
            ModelBackend::Gpt4 => "gpt-4o",
            ModelBackend::Gemini => "gemini-flash-latest",
            ModelBackend::Llama => "llama-3.1-8b-instant",
            ModelBackend::Claude => "claude-sonnet-4-20250514",
        }
    }
}

/// Something that can put one prompt to one backend.
#[allow(async_fn_in_trait)]
pub trait ModelClient {
    /// Whether credentials exist for this backend. Unconfigured backends
    /// are skipped and reported as no answer.
    fn is_configured(&self, backend: ModelBackend) -> bool;

    async fn ask(&self, backend: ModelBackend, prompt: &str) -> Result<String, ScanError>;
}

/// Provider client backed by reqwest and per-backend API keys.
pub struct HttpModelClient {
    http: reqwest::Client,
    keys: HashMap<ModelBackend, String>,
}

impl HttpModelClient {
    /// Resolve a key for every backend with `lookup`; blank keys are dropped.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScanError>
    where
        F: Fn(ModelBackend) -> Option<String>,
    {
        let keys = ModelBackend::ALL
            .iter()
            .filter_map(|&b| {
                lookup(b)
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .map(|k| (b, k))
            })
            .collect();
        Ok(Self {
            http: build_client(PROVIDER_TIMEOUT)?,
            keys,
        })
    }

    async fn post_json(
        &self,
        backend: ModelBackend,
        request: reqwest::RequestBuilder,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ScanError> {
        let response = request
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let err = ScanError::from(e);
                error!("{} request failed: {}", backend.error_label(), err);
                err
            })?;
        let text = read_success_body(response, backend.error_label()).await?;
        serde_json::from_str(&text).map_err(|e| {
            ScanError::MalformedResponse(format!(
                "{} response is not JSON: {}",
                backend.error_label(),
                e
            ))
        })
    }
}

impl ModelClient for HttpModelClient {
    fn is_configured(&self, backend: ModelBackend) -> bool {
        self.keys.contains_key(&backend)
    }

    async fn ask(&self, backend: ModelBackend, prompt: &str) -> Result<String, ScanError> {
        let key = self.keys.get(&backend).ok_or_else(|| {
            ScanError::Keychain(format!("No API key configured for {}", backend.error_label()))
        })?;
        info!("Asking {} ({})", backend.error_label(), backend.model());

        match backend {
            ModelBackend::Gpt4 | ModelBackend::Llama => {
                let url = if backend == ModelBackend::Gpt4 {
                    "https://api.openai.com/v1/chat/completions"
                } else {
                    "https://api.groq.com/openai/v1/chat/completions"
                };
                let body = serde_json::json!({
                    "model": backend.model(),
                    "max_tokens": MAX_TOKENS,
                    "messages": [{"role": "user", "content": prompt}]
                });
                let request = self
                    .http
                    .post(url)
                    .header("Authorization", format!("Bearer {}", key));
                let json = self.post_json(backend, request, &body).await?;
                chat_completion_text(&json, backend)
            }
            ModelBackend::Gemini => {
                let url = format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    backend.model()
                );
                let body = serde_json::json!({
                    "contents": [{"parts": [{"text": prompt}]}]
                });
                let request = self.http.post(url).header("x-goog-api-key", key.as_str());
                let json = self.post_json(backend, request, &body).await?;
                gemini_text(&json)
            }
            ModelBackend::Claude => {
                let body = serde_json::json!({
                    "model": backend.model(),
                    "max_tokens": MAX_TOKENS,
                    "messages": [{"role": "user", "content": prompt}]
                });
                let request = self
                    .http
                    .post("https://api.anthropic.com/v1/messages")
                    .header("x-api-key", key.as_str())
                    .header("anthropic-version", "2023-06-01");
                let json = self.post_json(backend, request, &body).await?;
                claude_text(&json)
            }
        }
    }
}

/// OpenAI-style body: `{ "choices": [{"message": {"content": "..."}}] }`.
/// Groq serves the same shape.
pub fn chat_completion_text(
    json: &serde_json::Value,
    backend: ModelBackend,
) -> Result<String, ScanError> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ScanError::MalformedResponse(format!(
                "No content in {} response",
                backend.error_label()
            ))
        })
}

/// Gemini body: `{ "candidates": [{"content": {"parts": [{"text": "..."}]}}] }`.
pub fn gemini_text(json: &serde_json::Value) -> Result<String, ScanError> {
    let parts = json["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| ScanError::MalformedResponse("No parts in Gemini response".to_string()))?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        return Err(ScanError::MalformedResponse(
            "No text in Gemini response".to_string(),
        ));
    }
    Ok(text)
}

/// Anthropic body: `{ "content": [{"type": "text", "text": "..."}] }`.
pub fn claude_text(json: &serde_json::Value) -> Result<String, ScanError> {
    json["content"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ScanError::MalformedResponse("No text content in Claude response".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_ids_match_wire_keys() {
        let ids: Vec<_> = ModelBackend::ALL.iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["gpt4", "gemini", "llama", "claude"]);
    }

    #[test]
    fn test_from_lookup_drops_blank_keys() {
        let client = HttpModelClient::from_lookup(|b| match b {
            ModelBackend::Gpt4 => Some("sk-test".to_string()),
            ModelBackend::Gemini => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(client.is_configured(ModelBackend::Gpt4));
        assert!(!client.is_configured(ModelBackend::Gemini));
        assert!(!client.is_configured(ModelBackend::Claude));
    }

    #[test]
    fn test_chat_completion_text() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "Hello"}}]});
        assert_eq!(chat_completion_text(&body, ModelBackend::Llama).unwrap(), "Hello");
    }

    #[test]
    fn test_chat_completion_text_missing() {
        let err = chat_completion_text(&json!({"choices": []}), ModelBackend::Gpt4).unwrap_err();
        assert!(err.to_string().contains("GPT"));
    }

    #[test]
    fn test_gemini_text_joins_parts() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "Third "}, {"text": "molars."}]}}]});
        assert_eq!(gemini_text(&body).unwrap(), "Third molars.");
    }

    #[test]
    fn test_gemini_text_blocked() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(gemini_text(&body).unwrap_err().is_malformed());
    }

    #[test]
    fn test_claude_text() {
        let body = json!({"content": [{"type": "text", "text": "Usually between 17 and 25."}]});
        assert_eq!(claude_text(&body).unwrap(), "Usually between 17 and 25.");
        assert!(claude_text(&json!({"content": []})).is_err());
    }

    #[tokio::test]
    async fn test_ask_without_key_fails() {
        let client = HttpModelClient::from_lookup(|_| None).unwrap();
        let err = client.ask(ModelBackend::Claude, "hi").await.unwrap_err();
        assert!(matches!(err, ScanError::Keychain(_)));
    }
}
