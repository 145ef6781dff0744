//! CLI configuration.

use std::time::Duration;

use bktrigger_client::DEFAULT_BASE_URL;
use bktrigger_core::{validate_base_url, Validation};
use bktrigger_step::PollSettings;
use tracing::warn;

/// Environment variable holding the API token unless overridden.
pub const DEFAULT_CREDENTIALS_ID: &str = "BUILDKITE_API_TOKEN";

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    /// Buildkite API host.
    pub base_url: String,

    /// Name of the credential holding the API token.
    pub credentials_id: String,

    /// Delays while waiting for a build.
    pub poll: PollSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials_id: DEFAULT_CREDENTIALS_ID.to_string(),
            poll: PollSettings::default(),
        }
    }
}

impl Config {
    /// Builder method to override the polling delays, in milliseconds.
    pub fn with_poll_millis(mut self, initial_delay_ms: u64, poll_interval_ms: u64) -> Self {
        self.poll = PollSettings {
            initial_delay: Duration::from_millis(initial_delay_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
        };
        self
    }

    /// Reject unusable settings; log suspicious ones.
    pub fn check(&self) -> Result<(), String> {
        match validate_base_url(&self.base_url) {
            Validation::Ok => Ok(()),
            Validation::Warning(msg) => {
                warn!(base_url = %self.base_url, "{}", msg);
                Ok(())
            }
            Validation::Error(msg) => Err(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.buildkite.com/");
        assert_eq!(config.credentials_id, "BUILDKITE_API_TOKEN");
        assert_eq!(config.poll.initial_delay, Duration::from_millis(2000));
        assert_eq!(config.poll.poll_interval, Duration::from_millis(7000));
    }

    #[test]
    fn test_check() {
        assert!(Config::default().check().is_ok());

        let config = Config {
            base_url: "api.buildkite.com".to_string(),
            ..Config::default()
        };
        assert!(config.check().is_ok());

        let config = Config {
            base_url: " ".to_string(),
            ..Config::default()
        };
        assert_eq!(config.check(), Err("Base URL cannot be empty".to_string()));
    }
}
