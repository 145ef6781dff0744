//! Step errors.

use std::fmt;

use bktrigger_client::ClientError;
use bktrigger_core::BuildState;
use thiserror::Error;

/// Why a wait was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The cancellation token fired.
    Interrupted,
    /// The host reported its job as paused.
    Paused,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted => f.write_str("interrupted"),
            Self::Paused => f.write_str("host build was paused"),
        }
    }
}

/// Failure verdict of a step invocation.
#[derive(Debug, Error)]
pub enum StepError {
    /// No token stored under the configured credentials id. No request was sent.
    #[error("Could not find Credentials with id: {0}")]
    CredentialNotFound(String),

    /// The HTTP client could not be built.
    #[error("failed to initialize Buildkite client: {0}")]
    Client(#[from] ClientError),

    /// The create call failed.
    #[error("failed to create build for {organization}/{pipeline}: {source}")]
    Create {
        organization: String,
        pipeline: String,
        #[source]
        source: ClientError,
    },

    /// A status fetch failed.
    #[error("failed to fetch status of {organization}/{pipeline}#{number}: {source}")]
    Poll {
        organization: String,
        pipeline: String,
        number: u64,
        #[source]
        source: ClientError,
    },

    /// The build finished in a state other than `passed`.
    #[error("{organization}/{pipeline}#{number} finished with state: {state}")]
    BuildFailed {
        organization: String,
        pipeline: String,
        number: u64,
        state: BuildState,
    },

    /// Waiting was cancelled before the build finished.
    #[error("wait canceled: {0}")]
    Cancelled(CancelReason),
}

impl StepError {
    /// True when the step was aborted rather than the build failing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// The underlying client error, if the failure came from the API.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(source) | Self::Create { source, .. } | Self::Poll { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
