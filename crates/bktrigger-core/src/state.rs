//! Build state as reported by Buildkite.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a Buildkite build.
///
/// Buildkite reports state as a lowercase string. States we don't model
/// explicitly are kept verbatim in `Other` and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildState {
    /// Build is executing jobs.
    Running,
    /// Build is queued and waiting for agents.
    Scheduled,
    /// Build finished and every job passed.
    Passed,
    /// Build finished with at least one failed job.
    Failed,
    /// Build was cancelled.
    Canceled,
    /// Build stopped at a block step.
    Blocked,
    /// Any other state string.
    Other(String),
}

impl BuildState {
    /// Returns the state exactly as Buildkite spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Scheduled => "scheduled",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Blocked => "blocked",
            Self::Other(s) => s,
        }
    }

    /// Returns true if no further transition is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Passed | Self::Failed | Self::Canceled | Self::Blocked
        )
    }

    /// Returns true only for `passed`.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl From<String> for BuildState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => Self::Running,
            "scheduled" => Self::Scheduled,
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "canceled" => Self::Canceled,
            "blocked" => Self::Blocked,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for BuildState {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<BuildState> for String {
    fn from(state: BuildState) -> Self {
        match state {
            BuildState::Other(s) => s,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
