use keyring::Entry;
use tracing::{info, warn};

use crate::chat::ModelBackend;
use crate::error::ScanError;

const KEYRING_USER: &str = "dentai-scan";

fn entry(service: &str) -> Result<Entry, ScanError> {
    Entry::new(service, KEYRING_USER).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        ScanError::Keychain(e.to_string())
    })
}

/// Read a stored key. A missing entry is `Ok(None)`.
pub fn read_api_key(service: &str) -> Result<Option<String>, ScanError> {
    match entry(service)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            warn!("Failed to get password for {}: {}", service, e);
            Err(ScanError::Keychain(e.to_string()))
        }
    }
}

/// Keychain first, then the backend's environment variable.
pub fn resolve_provider_key(backend: ModelBackend) -> Option<String> {
    let from_keychain = read_api_key(backend.keychain_service()).unwrap_or_else(|e| {
        warn!("{}", e);
        None
    });
    from_keychain.or_else(|| std::env::var(backend.env_var()).ok())
}

#[tauri::command]
pub fn set_api_key(service: &str, key: &str) -> Result<(), String> {
    info!("Setting API key for service: {}", service);
    entry(service)?.set_password(key).map_err(|e| {
        warn!("Failed to set password for {}: {}", service, e);
        e.to_string()
    })
}

#[tauri::command]
pub fn get_api_key(service: &str) -> Result<Option<String>, String> {
    info!("Getting API key for service: {}", service);
    let key = read_api_key(service)?;
    if key.is_none() {
        info!("No API key found for service: {}", service);
    }
    Ok(key)
}

#[tauri::command]
pub fn delete_api_key(service: &str) -> Result<(), String> {
    info!("Deleting API key for service: {}", service);
    entry(service)?.delete_credential().map_err(|e| {
        warn!("Failed to delete credential for {}: {}", service, e);
        e.to_string()
    })
}
