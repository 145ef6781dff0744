//! Buildkite REST client for bktrigger.
//!
//! Provides the [`BuildApi`] seam used by the step orchestrator and its HTTP
//! implementation, [`BuildkiteClient`].

pub mod api;
pub mod error;
pub mod http;
pub mod token;

pub use api::{BuildApi, CreateBuildRequest};
pub use error::{BoxError, ClientError};
pub use http::{BuildkiteClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use token::ApiToken;
