use std::path::PathBuf;

use thiserror::Error;

/// Preconditions that stop a run before any network activity.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("File {} not found.", .0.display())]
    MissingInputFile(PathBuf),
    #[error("GEMINI_API_KEY environment variable not set.")]
    MissingCredential,
}

/// Anything that went wrong while talking to the model. Never fatal.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} - {message}")]
    Api { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("prompt was blocked: {0}")]
    Blocked(String),
    #[error("no text returned from the model")]
    EmptyResponse,
}

impl ServiceError {
    /// True when the service rejected the credential itself.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ServiceError::Api { status: 401 | 403, .. })
    }
}
