use thiserror::Error;

/// Error types for the Machine Translation module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// Provider was reached but answered with a non-success status
    #[error("response status: {0}")]
    Transport(u16),
    /// Provider answered but the expected translation payload is missing
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Request never produced a response (DNS, TLS, timeout...)
    #[error("network error: {0}")]
    Network(String),
    /// Provider could not be configured (credentials, locales)
    #[error("configuration error: {0}")]
    Config(String),
    /// Provider-independent translation failure (used by the mock)
    #[error("translation error: {0}")]
    Translation(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => MtError::Transport(status.as_u16()),
            None => MtError::Network(err.to_string()),
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
