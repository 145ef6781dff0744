//! bktrigger Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Credential storage
//! - Runtime specifics
//!
//! All types here describe a Buildkite build and the request that creates one.

pub mod build;
pub mod request;
pub mod state;
pub mod validation;

// Re-export commonly used types
pub use build::Build;
pub use request::{BuildRequest, BuildRequestBuilder, DEFAULT_BRANCH, DEFAULT_COMMIT};
pub use state::BuildState;
pub use validation::{validate_base_url, validate_required, Validation};
