//! Polling delays.

use std::time::Duration;

/// Delays used while waiting for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Wait before the first status fetch, so the build is queryable.
    pub initial_delay: Duration,

    /// Wait between status fetches.
    pub poll_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(2000),
            poll_interval: Duration::from_millis(7000),
        }
    }
}
