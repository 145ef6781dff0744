//! Credential resolution and client setup around the orchestrator.

use bktrigger_client::BuildkiteClient;
use bktrigger_core::{Build, BuildRequest};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::credentials::CredentialStore;
use crate::error::StepError;
use crate::host::{HostContext, ProgressSink};
use crate::orchestrator::BuildOrchestrator;
use crate::settings::PollSettings;

/// A configured "trigger a Buildkite build" step.
#[derive(Debug, Clone)]
pub struct BuildkiteStep {
    base_url: String,
    credentials_id: String,
    settings: PollSettings,
}

impl BuildkiteStep {
    pub fn new(base_url: impl Into<String>, credentials_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials_id: credentials_id.into(),
            settings: PollSettings::default(),
        }
    }

    /// Set the polling delays.
    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Resolve the token, then create the build and (unless async) wait for it.
    ///
    /// A missing credential fails before any request is sent.
    pub async fn run(
        &self,
        request: BuildRequest,
        credentials: &dyn CredentialStore,
        host: &dyn HostContext,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Build, StepError> {
        let Some(token) = credentials.lookup(&self.credentials_id) else {
            warn!(credentials_id = %self.credentials_id, "Credentials not found");
            sink.line(&format!(
                "Could not find Credentials with id: {}",
                self.credentials_id
            ));
            return Err(StepError::CredentialNotFound(self.credentials_id.clone()));
        };

        let client = BuildkiteClient::new(&self.base_url, token)?;
        info!(
            api_base = %client.api_base(),
            organization = %request.organization(),
            pipeline = %request.pipeline(),
            async_mode = request.is_async(),
            "Running build step"
        );

        BuildOrchestrator::new(client)
            .with_settings(self.settings)
            .execute(request, host, sink, cancel)
            .await
    }
}
