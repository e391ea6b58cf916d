use tracing::{info, warn};

use super::providers::{ModelBackend, ModelClient};
use super::types::ModelResponses;

/// Put the same prompt to all four backends concurrently and collect every
/// answer. A failing backend answers with its error text; an unconfigured
/// one does not answer at all.
pub async fn fan_out<C: ModelClient>(client: &C, prompt: &str) -> ModelResponses {
    let (gpt4, gemini, llama, claude) = tokio::join!(
        answer(client, ModelBackend::Gpt4, prompt),
        answer(client, ModelBackend::Gemini, prompt),
        answer(client, ModelBackend::Llama, prompt),
        answer(client, ModelBackend::Claude, prompt),
    );

    let responses = ModelResponses {
        gpt4,
        gemini,
        llama,
        claude,
    };
    info!("Fan-out finished: {}/4 answers", responses.answered());
    responses
}

async fn answer<C: ModelClient>(client: &C, backend: ModelBackend, prompt: &str) -> Option<String> {
    if !client.is_configured(backend) {
        info!("Skipping {}: no API key", backend.error_label());
        return None;
    }
    match client.ask(backend, prompt).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("{} failed: {}", backend.error_label(), e);
            Some(format!("Error ({}): {}", backend.error_label(), e))
        }
    }
}
