//! HTTP client for the Buildkite REST API.

use std::time::Duration;

use async_trait::async_trait;
use bktrigger_core::Build;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use tracing::{debug, warn};

use crate::api::{BuildApi, CreateBuildRequest};
use crate::error::ClientError;
use crate::token::ApiToken;

/// Public Buildkite API host.
pub const DEFAULT_BASE_URL: &str = "https://api.buildkite.com/";

/// Connect and request timeout for every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Buildkite REST API.
///
/// Holds one pooled `reqwest::Client`, so the create call and every
/// following poll reuse connections.
pub struct BuildkiteClient {
    inner: reqwest::Client,
    api_base: Url,
    token: ApiToken,
}

impl BuildkiteClient {
    /// Create a new client.
    ///
    /// `base_url` is the API host (e.g. "https://api.buildkite.com/"); the
    /// `/v2` prefix is appended here.
    pub fn new(base_url: &str, token: ApiToken) -> Result<Self, ClientError> {
        let inner = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let api_base = format!("{}/v2", base_url.trim_end_matches('/'));
        let api_base = Url::parse(&api_base)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            inner,
            api_base,
            token,
        })
    }

    /// Base path every request is issued under.
    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// Check that the token is accepted by listing organizations.
    pub async fn test_connection(&self) -> Result<(), ClientError> {
        let url = self.endpoint(&["organizations"])?;
        debug!(url = %url, "Testing connection");

        let response = self.authorized(self.inner.get(url)).send().await?;
        let status = response.status().as_u16();
        if status == 200 {
            return Ok(());
        }

        Err(ClientError::Api {
            status,
            body: read_error_body(response).await,
        })
    }

    /// API URL with each segment percent-encoded, so slugs can't alter the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
            .header(CONTENT_TYPE, "application/json")
    }
}

#[async_trait]
impl BuildApi for BuildkiteClient {
    async fn create_build(
        &self,
        organization: &str,
        pipeline: &str,
        request: &CreateBuildRequest,
    ) -> Result<Build, ClientError> {
        let url = self.endpoint(&["organizations", organization, "pipelines", pipeline, "builds"])?;
        debug!(url = %url, branch = %request.branch, commit = %request.commit, "POST request");

        let body = serde_json::to_string(request)?;
        let response = self
            .authorized(self.inner.post(url))
            .body(body)
            .send()
            .await?;

        parse_build_response(response).await
    }

    async fn get_build(
        &self,
        organization: &str,
        pipeline: &str,
        number: u64,
    ) -> Result<Build, ClientError> {
        let number = number.to_string();
        let url = self.endpoint(&[
            "organizations",
            organization,
            "pipelines",
            pipeline,
            "builds",
            &number,
        ])?;
        debug!(url = %url, "GET request");

        let response = self.authorized(self.inner.get(url)).send().await?;

        parse_build_response(response).await
    }
}

/// Classify a response and decode the build on success.
async fn parse_build_response(response: reqwest::Response) -> Result<Build, ClientError> {
    let status = response.status().as_u16();

    if !(200..400).contains(&status) {
        return Err(ClientError::Api {
            status,
            body: read_error_body(response).await,
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Body of an error response; empty when absent or unreadable.
async fn read_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Failed to read error response body");
            String::new()
        }
    }
}
