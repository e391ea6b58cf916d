use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Connection failure, timeout, or a non-2xx status from a remote service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered but the body lacked the expected fields.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ScanError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ScanError::Transport(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ScanError::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScanError::Transport(format!("request timed out: {}", err))
        } else {
            ScanError::Transport(err.to_string())
        }
    }
}

impl From<ScanError> for String {
    fn from(err: ScanError) -> Self {
        err.to_string()
    }
}
