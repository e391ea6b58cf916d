use std::time::Duration;

use tracing::error;

use crate::error::ScanError;

/// Longest body excerpt carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Build a reqwest client with the given request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ScanError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ScanError::Transport(format!("Failed to build HTTP client: {}", e)))
}

/// Check the status and read the body text. Non-2xx is a transport failure.
pub async fn read_success_body(
    response: reqwest::Response,
    service: &str,
) -> Result<String, ScanError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        let msg = format!("{} returned {} - {}", service, status, truncate(&body));
        error!("{}", msg);
        return Err(ScanError::Transport(msg));
    }
    response.text().await.map_err(|e| {
        ScanError::Transport(format!("Failed to read response body from {}: {}", service, e))
    })
}

/// Shorten a body for logs and error messages without splitting a char.
pub fn truncate(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
