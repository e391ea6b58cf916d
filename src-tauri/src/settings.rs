use serde::Serialize;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::warn;
use url::Url;

use crate::error::ScanError;

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// How chat prompts reach the language models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// POST to the chat service, which fans out on its side.
    Service,
    /// Fan out from this process straight to the provider APIs.
    Direct,
}

impl ChatMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "direct" => ChatMode::Direct,
            _ => ChatMode::Service,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub service_url: Url,
    pub chat_mode: ChatMode,
}

impl ServiceSettings {
    /// Build settings from raw preference values, applying defaults for
    /// missing or blank entries.
    pub fn from_values(
        service_url: Option<&str>,
        chat_mode: Option<&str>,
    ) -> Result<Self, ScanError> {
        let raw = service_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVICE_URL);

        let mut service_url = Url::parse(raw)
            .map_err(|e| ScanError::Config(format!("Invalid service URL '{}': {}", raw, e)))?;
        if !matches!(service_url.scheme(), "http" | "https") {
            return Err(ScanError::Config(format!(
                "Service URL must be http or https, got '{}'",
                service_url.scheme()
            )));
        }
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !service_url.path().ends_with('/') {
            let path = format!("{}/", service_url.path());
            service_url.set_path(&path);
        }

        Ok(Self {
            service_url,
            chat_mode: chat_mode.map(ChatMode::parse).unwrap_or(ChatMode::Service),
        })
    }

    pub fn load(app: &AppHandle) -> Result<Self, ScanError> {
        let store = app.store(PREFERENCES_FILE).map_err(|e| {
            warn!("Failed to open preferences store: {}", e);
            ScanError::Config(e.to_string())
        })?;
        let read = |key: &str| store.get(key).and_then(|v| v.as_str().map(|s| s.to_string()));

        Self::from_values(read("service_url").as_deref(), read("chat_mode").as_deref())
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ScanError> {
        self.service_url
            .join(path)
            .map_err(|e| ScanError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    pub fn detect_url(&self) -> Result<Url, ScanError> {
        self.endpoint("detect")
    }

    pub fn chat_url(&self) -> Result<Url, ScanError> {
        self.endpoint("chat")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let settings = ServiceSettings::from_values(None, None).unwrap();
        assert_eq!(settings.detect_url().unwrap().as_str(), "http://127.0.0.1:5000/detect");
        assert_eq!(settings.chat_url().unwrap().as_str(), "http://127.0.0.1:5000/chat");
        assert_eq!(settings.chat_mode, ChatMode::Service);
    }

    #[test]
    fn test_blank_url_uses_default() {
        let settings = ServiceSettings::from_values(Some("   "), Some("")).unwrap();
        assert_eq!(settings.service_url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_url_with_path_prefix_keeps_prefix() {
        let settings =
            ServiceSettings::from_values(Some("https://scan.example.com/api"), None).unwrap();
        assert_eq!(
            settings.detect_url().unwrap().as_str(),
            "https://scan.example.com/api/detect"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        let err = ServiceSettings::from_values(Some("not a url"), None).unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = ServiceSettings::from_values(Some("ftp://example.com"), None).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_chat_mode_parsing() {
        assert_eq!(ChatMode::parse("direct"), ChatMode::Direct);
        assert_eq!(ChatMode::parse(" Direct "), ChatMode::Direct);
        assert_eq!(ChatMode::parse("service"), ChatMode::Service);
        assert_eq!(ChatMode::parse("anything"), ChatMode::Service);
    }
}
