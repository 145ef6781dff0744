//! Create a build and wait for it to finish.

use std::time::Duration;

use bktrigger_client::{BuildApi, CreateBuildRequest};
use bktrigger_core::{Build, BuildRequest};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{CancelReason, StepError};
use crate::host::{provenance_message, HostContext, ProgressSink};
use crate::settings::PollSettings;

/// Drives one build from creation to a verdict.
///
/// Makes one API call at a time: the create, then status fetches in order.
/// Polling has no attempt limit; it ends on a terminal state, an API error,
/// or cancellation.
pub struct BuildOrchestrator<A> {
    api: A,
    settings: PollSettings,
}

impl<A: BuildApi> BuildOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            settings: PollSettings::default(),
        }
    }

    /// Set the polling delays.
    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the step.
    ///
    /// Returns the build as created on success. A wait is abandoned when
    /// `cancel` fires or `host` reports itself paused.
    pub async fn execute(
        &self,
        request: BuildRequest,
        host: &dyn HostContext,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Build, StepError> {
        let request = request.with_default_message(|| provenance_message(&host.display_name()));
        let organization = request.organization();
        let pipeline = request.pipeline();

        sink.line(&format!(
            "Creating build for {}/{} on {} ({})",
            organization,
            pipeline,
            request.branch(),
            request.commit()
        ));

        let body = CreateBuildRequest {
            commit: request.commit().to_string(),
            branch: request.branch().to_string(),
            message: request.message().unwrap_or_default().to_string(),
        };

        let build = self
            .api
            .create_build(organization, pipeline, &body)
            .await
            .map_err(|source| StepError::Create {
                organization: organization.to_string(),
                pipeline: pipeline.to_string(),
                source,
            })?;

        info!(
            organization = %organization,
            pipeline = %pipeline,
            number = build.number,
            web_url = %build.web_url,
            "Build created"
        );
        sink.line(&format!(
            "{}/{}#{} created: {}",
            organization, pipeline, build.number, build.web_url
        ));

        if request.is_async() {
            return Ok(build);
        }

        let finished = self
            .wait_for_completion(&request, &build, host, sink, cancel)
            .await?;

        info!(
            organization = %organization,
            pipeline = %pipeline,
            number = build.number,
            state = %finished.state,
            "Build finished"
        );
        sink.line(&format!(
            "{}/{}#{} finished with state: {}",
            organization, pipeline, build.number, finished.state
        ));

        if finished.is_passed() {
            Ok(build)
        } else {
            Err(StepError::BuildFailed {
                organization: organization.to_string(),
                pipeline: pipeline.to_string(),
                number: build.number,
                state: finished.state,
            })
        }
    }

    /// Poll until the build is terminal. Returns the last fetched snapshot.
    async fn wait_for_completion(
        &self,
        request: &BuildRequest,
        build: &Build,
        host: &dyn HostContext,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Build, StepError> {
        sink.line("Waiting for build to finish");
        self.pause(self.settings.initial_delay, host, sink, cancel)
            .await?;

        loop {
            let current = self
                .api
                .get_build(request.organization(), request.pipeline(), build.number)
                .await
                .map_err(|source| StepError::Poll {
                    organization: request.organization().to_string(),
                    pipeline: request.pipeline().to_string(),
                    number: build.number,
                    source,
                })?;

            debug!(number = current.number, state = %current.state, "Polled build");
            sink.line(&format!("  {}", current.state));

            if current.is_finished() {
                return Ok(current);
            }

            self.pause(self.settings.poll_interval, host, sink, cancel)
                .await?;
        }
    }

    /// Sleep for `delay`, then consult the host. Either source of
    /// cancellation ends the wait.
    async fn pause(
        &self,
        delay: Duration,
        host: &dyn HostContext,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<(), StepError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Wait canceled by interrupt");
                sink.line("Wait canceled");
                return Err(StepError::Cancelled(CancelReason::Interrupted));
            }
            _ = tokio::time::sleep(delay) => {}
        }

        if host.is_paused() {
            warn!("Wait canceled, host build paused");
            sink.line("Wait canceled - host build was paused.");
            return Err(StepError::Cancelled(CancelReason::Paused));
        }

        Ok(())
    }
}
