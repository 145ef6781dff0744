//! The Build record returned by Buildkite.

use serde::{Deserialize, Serialize};

use crate::BuildState;

/// A Build as seen by the Buildkite REST API.
///
/// Every field except `message` must be present when decoding; unknown
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Opaque build identifier.
    pub id: String,

    /// Sequential build number within the pipeline.
    pub number: u64,

    /// Current build state.
    pub state: BuildState,

    /// Human-facing URL of the build page.
    pub web_url: String,

    /// API URL of the build resource.
    pub url: String,

    /// Commit the build runs against.
    pub commit: String,

    /// Branch the build runs against.
    pub branch: String,

    /// Build message, if echoed back.
    #[serde(default)]
    pub message: Option<String>,
}

impl Build {
    /// Check if the build is in a terminal state.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Check if the build passed.
    pub fn is_passed(&self) -> bool {
        self.state.is_passed()
    }
}
