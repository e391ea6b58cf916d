use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::detection::Detection;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct SetApiKeyArgs {
    service: String,
    key: String,
}

#[derive(Serialize)]
struct GetApiKeyArgs {
    service: String,
}

#[derive(Serialize)]
struct DeleteApiKeyArgs {
    service: String,
}

#[derive(Serialize)]
struct GetPreferenceArgs {
    key: String,
}

#[derive(Serialize)]
struct SetPreferenceArgs {
    key: String,
    value: String,
}

/// Inner request matching the backend DetectRequest struct.
#[derive(Serialize)]
struct DetectRequest {
    image_base64: String,
    file_name: String,
}

#[derive(Serialize)]
struct DetectImageArgs {
    request: DetectRequest,
}

#[derive(Serialize)]
struct SendChatArgs {
    message: String,
}

// -- Types matching backend structs --

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectResponse {
    pub detections: Vec<Detection>,
    pub count: usize,
    pub analyzed_at: String,
}

/// Per-model chat answers. `None` means the model did not answer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ModelReplies {
    #[serde(default)]
    pub gpt4: Option<String>,
    #[serde(default)]
    pub gemini: Option<String>,
    #[serde(default)]
    pub llama: Option<String>,
    #[serde(default)]
    pub claude: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthReport {
    pub service_url: Option<String>,
    pub service_url_error: Option<String>,
    pub detector_reachable: bool,
    pub chat_reachable: bool,
    pub chat_mode: Option<String>,
    pub openai_api_key_set: bool,
    pub gemini_api_key_set: bool,
    pub groq_api_key_set: bool,
    pub claude_api_key_set: bool,
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

// -- Typed invoke helpers --

pub async fn set_api_key(service: &str, key: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SetApiKeyArgs {
        service: service.to_string(),
        key: key.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("set_api_key", args).await.map(|_| ()).map_err(js_error)
}

pub async fn get_api_key(service: &str) -> Result<Option<String>, String> {
    let args = serde_wasm_bindgen::to_value(&GetApiKeyArgs {
        service: service.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("get_api_key", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn delete_api_key(service: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&DeleteApiKeyArgs {
        service: service.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("delete_api_key", args).await.map(|_| ()).map_err(js_error)
}

pub async fn run_health_check() -> Result<HealthReport, String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({}))
        .map_err(|e| e.to_string())?;

    let result = invoke("run_health_check", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    let args = serde_wasm_bindgen::to_value(&GetPreferenceArgs {
        key: key.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("get_preference", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SetPreferenceArgs {
        key: key.to_string(),
        value: value.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("set_preference", args).await.map(|_| ()).map_err(js_error)
}

pub async fn detect_image(image_base64: String, file_name: String) -> Result<DetectResponse, String> {
    let args = serde_wasm_bindgen::to_value(&DetectImageArgs {
        request: DetectRequest {
            image_base64,
            file_name,
        },
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("detect_image", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn send_chat(message: &str) -> Result<ModelReplies, String> {
    let args = serde_wasm_bindgen::to_value(&SendChatArgs {
        message: message.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("send_chat", args).await.map_err(js_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
