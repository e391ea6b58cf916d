use std::time::Duration;

use serde::Serialize;
use tracing::info;
use url::Url;

use super::keychain::resolve_provider_key;
use crate::chat::ModelBackend;
use crate::http::build_client;
use crate::settings::{ChatMode, ServiceSettings};

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub service_url: Option<String>,
    pub service_url_error: Option<String>,
    pub detector_reachable: bool,
    pub chat_reachable: bool,
    pub chat_mode: Option<ChatMode>,
    pub openai_api_key_set: bool,
    pub gemini_api_key_set: bool,
    pub groq_api_key_set: bool,
    pub claude_api_key_set: bool,
}

/// Any HTTP answer counts as reachable; the endpoints only accept POST.
async fn probe(client: &reqwest::Client, url: Url) -> bool {
    match client.get(url.clone()).send().await {
        Ok(resp) => {
            info!("Probe {} -> {}", url, resp.status());
            true
        }
        Err(e) => {
            info!("Probe {} failed: {}", url, e);
            false
        }
    }
}

#[tauri::command]
pub async fn run_health_check(app: tauri::AppHandle) -> Result<HealthReport, String> {
    info!("Running health check");

    let key_set = |b: ModelBackend| resolve_provider_key(b).is_some();
    let mut report = HealthReport {
        service_url: None,
        service_url_error: None,
        detector_reachable: false,
        chat_reachable: false,
        chat_mode: None,
        openai_api_key_set: key_set(ModelBackend::Gpt4),
        gemini_api_key_set: key_set(ModelBackend::Gemini),
        groq_api_key_set: key_set(ModelBackend::Llama),
        claude_api_key_set: key_set(ModelBackend::Claude),
    };

    match ServiceSettings::load(&app) {
        Ok(settings) => {
            report.service_url = Some(settings.service_url.to_string());
            report.chat_mode = Some(settings.chat_mode);

            let client = build_client(PROBE_TIMEOUT)?;
            let detect_url = settings.detect_url()?;
            let chat_url = settings.chat_url()?;
            let (detector, chat) =
                tokio::join!(probe(&client, detect_url), probe(&client, chat_url));
            report.detector_reachable = detector;
            report.chat_reachable = chat;
        }
        Err(e) => {
            report.service_url_error = Some(e.to_string());
        }
    }

    info!(
        "Health: detector={}, chat={}, keys gpt={} gemini={} groq={} claude={}",
        report.detector_reachable,
        report.chat_reachable,
        report.openai_api_key_set,
        report.gemini_api_key_set,
        report.groq_api_key_set,
        report.claude_api_key_set
    );
    Ok(report)
}
