use tracing::{info, warn};

use super::keychain::resolve_provider_key;
use crate::chat::{fan_out, ChatServiceClient, HttpModelClient, ModelResponses};
use crate::settings::{ChatMode, ServiceSettings};

/// Send an already-routed prompt to every model and return their answers.
///
/// In `service` mode the chat service does the fan-out; in `direct` mode this
/// process calls the providers itself with keys from the keychain.
#[tauri::command]
pub async fn send_chat(app: tauri::AppHandle, message: String) -> Result<ModelResponses, String> {
    let settings = ServiceSettings::load(&app)?;
    info!("Chat submitted ({:?} mode)", settings.chat_mode);

    let result = match settings.chat_mode {
        ChatMode::Service => {
            let client = ChatServiceClient::new(settings.chat_url()?)?;
            client.send(&message).await
        }
        ChatMode::Direct => {
            let client = HttpModelClient::from_lookup(resolve_provider_key)?;
            Ok(fan_out(&client, &message).await)
        }
    };

    result.map_err(|e| {
        warn!("Chat failed: {}", e);
        e.into()
    })
}
