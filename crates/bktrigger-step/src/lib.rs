//! Build trigger step for bktrigger.
//!
//! [`BuildOrchestrator`] creates a Buildkite build and, unless the request is
//! asynchronous, polls it until it reaches a terminal state, writing progress
//! lines to a [`ProgressSink`]. [`BuildkiteStep`] wraps it with credential
//! resolution and client construction.

pub mod credentials;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod settings;
pub mod step;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{CredentialStore, EnvCredentialStore, StaticCredentialStore};
pub use error::{CancelReason, StepError};
pub use host::{provenance_message, ConsoleSink, HostContext, ProgressSink};
pub use orchestrator::BuildOrchestrator;
pub use settings::PollSettings;
pub use step::BuildkiteStep;
