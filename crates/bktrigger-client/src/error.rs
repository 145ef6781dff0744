//! Error types for the Buildkite client.

use thiserror::Error;

/// Boxed underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when talking to the Buildkite API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable response: connection, timeout, DNS or unreadable body.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Response status outside [200, 400).
    #[error("Buildkite API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// The configured base URL can't be used to build API URLs.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Success status but the body is not a valid build.
    #[error("failed to parse build response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Wrap any error as a transport failure.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// HTTP status, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
