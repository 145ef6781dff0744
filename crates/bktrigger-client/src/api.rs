//! The operations the orchestrator needs from Buildkite.

use async_trait::async_trait;
use bktrigger_core::Build;
use serde::Serialize;

use crate::error::ClientError;

/// JSON body of a create-build call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBuildRequest {
    pub commit: String,
    pub branch: String,
    pub message: String,
}

/// Create and look up builds.
///
/// Each call maps to exactly one HTTP request; implementations never retry.
#[async_trait]
pub trait BuildApi: Send + Sync {
    /// Create a build on `organization/pipeline`.
    async fn create_build(
        &self,
        organization: &str,
        pipeline: &str,
        request: &CreateBuildRequest,
    ) -> Result<Build, ClientError>;

    /// Fetch a build by number.
    async fn get_build(
        &self,
        organization: &str,
        pipeline: &str,
        number: u64,
    ) -> Result<Build, ClientError>;
}
