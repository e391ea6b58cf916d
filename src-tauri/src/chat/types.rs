use serde::{Deserialize, Serialize};

/// Request body sent to the chat service.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Per-model answers. `None` means that backend did not answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResponses {
    #[serde(default)]
    pub gpt4: Option<String>,
    #[serde(default)]
    pub gemini: Option<String>,
    #[serde(default)]
    pub llama: Option<String>,
    #[serde(default)]
    pub claude: Option<String>,
}

impl ModelResponses {
    /// Read the four answers out of a JSON object. Non-string values count
    /// as no answer.
    pub fn from_mapping(mapping: &serde_json::Map<String, serde_json::Value>) -> Self {
        let text = |key: &str| mapping.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());
        Self {
            gpt4: text("gpt4"),
            gemini: text("gemini"),
            llama: text("llama"),
            claude: text("claude"),
        }
    }

    pub fn answered(&self) -> usize {
        [&self.gpt4, &self.gemini, &self.llama, &self.claude]
            .iter()
            .filter(|a| a.is_some())
            .count()
    }
}
