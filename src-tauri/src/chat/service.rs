use std::time::Duration;

use tracing::{error, info};
use url::Url;

use super::types::{ChatRequest, ModelResponses};
use crate::error::ScanError;
use crate::http::{build_client, read_success_body, truncate};

/// The service waits on four models before answering.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ChatServiceClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ChatServiceClient {
    pub fn new(endpoint: Url) -> Result<Self, ScanError> {
        Ok(Self {
            http: build_client(CHAT_TIMEOUT)?,
            endpoint,
        })
    }

    pub async fn send(&self, message: &str) -> Result<ModelResponses, ScanError> {
        info!("Sending chat prompt ({} chars) to {}", message.len(), self.endpoint);

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                let err = ScanError::from(e);
                error!("Chat request failed: {}", err);
                err
            })?;

        let body = read_success_body(response, "chat service").await?;
        let responses = parse_chat_body(&body)?;
        info!("Chat service answered for {}/4 models", responses.answered());
        Ok(responses)
    }
}

/// Parse a chat service body. Answers live under `responses`; when that
/// field is absent the whole body is read as the mapping.
pub fn parse_chat_body(body: &str) -> Result<ModelResponses, ScanError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        let msg = format!("Chat response is not JSON: {}. Body: {}", e, truncate(body));
        error!("{}", msg);
        ScanError::MalformedResponse(msg)
    })?;

    let mapping = value.get("responses").unwrap_or(&value);
    match mapping.as_object() {
        Some(obj) => Ok(ModelResponses::from_mapping(obj)),
        None => {
            let msg = format!("Chat response has no model mapping: {}", truncate(body));
            error!("{}", msg);
            Err(ScanError::MalformedResponse(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_responses() {
        let body = r#"{"type":"multi_model","responses":{
            "gpt4":"Wisdom teeth are third molars.",
            "gemini":"They usually erupt at 17-25.",
            "llama":null,
            "claude":"Impaction is common."
        }}"#;

        let responses = parse_chat_body(body).unwrap();
        assert_eq!(responses.gpt4.as_deref(), Some("Wisdom teeth are third molars."));
        assert!(responses.llama.is_none());
        assert_eq!(responses.answered(), 3);
    }

    #[test]
    fn test_parse_falls_back_to_raw_body() {
        let body = r#"{"gpt4":"a","gemini":"b","llama":"c","claude":"d"}"#;
        let responses = parse_chat_body(body).unwrap();
        assert_eq!(responses.claude.as_deref(), Some("d"));
        assert_eq!(responses.answered(), 4);
    }

    #[test]
    fn test_parse_absent_models_are_none() {
        let responses = parse_chat_body(r#"{"responses":{"gemini":"only me"}}"#).unwrap();
        assert!(responses.gpt4.is_none());
        assert_eq!(responses.gemini.as_deref(), Some("only me"));
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_chat_body("Internal Server Error").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_responses_not_object() {
        let err = parse_chat_body(r#"{"responses":"nope"}"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_top_level_array() {
        let err = parse_chat_body("[1, 2]").unwrap_err();
        assert!(err.is_malformed());
    }
}
