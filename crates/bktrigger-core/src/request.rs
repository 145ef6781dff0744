//! Build trigger request.

/// Branch used when none is supplied.
pub const DEFAULT_BRANCH: &str = "main";

/// Commit used when none is supplied.
pub const DEFAULT_COMMIT: &str = "HEAD";

/// Everything needed to create a build.
///
/// Immutable once built; construct with [`BuildRequest::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    organization: String,
    pipeline: String,
    branch: String,
    commit: String,
    message: Option<String>,
    async_mode: bool,
}

impl BuildRequest {
    /// Start building a request for the given organization and pipeline.
    pub fn builder(
        organization: impl Into<String>,
        pipeline: impl Into<String>,
    ) -> BuildRequestBuilder {
        BuildRequestBuilder {
            request: Self {
                organization: organization.into(),
                pipeline: pipeline.into(),
                branch: DEFAULT_BRANCH.to_string(),
                commit: DEFAULT_COMMIT.to_string(),
                message: None,
                async_mode: false,
            },
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Explicit message, if one was given.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Return immediately after creation instead of waiting for the build.
    pub fn is_async(&self) -> bool {
        self.async_mode
    }

    /// Copy of this request with the message filled in, unless one is already set.
    pub fn with_default_message(mut self, message: impl FnOnce() -> String) -> Self {
        if self.message.is_none() {
            self.message = Some(message());
        }
        self
    }
}

/// Builder for [`BuildRequest`].
///
/// Setters for branch, commit and message keep the previous value when
/// given empty or whitespace-only input.
#[derive(Debug, Clone)]
pub struct BuildRequestBuilder {
    request: BuildRequest,
}

impl BuildRequestBuilder {
    /// Set the branch.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        if let Some(branch) = non_blank(branch.into()) {
            self.request.branch = branch;
        }
        self
    }

    /// Set the commit reference.
    pub fn commit(mut self, commit: impl Into<String>) -> Self {
        if let Some(commit) = non_blank(commit.into()) {
            self.request.commit = commit;
        }
        self
    }

    /// Set the build message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(message) = non_blank(message.into()) {
            self.request.message = Some(message);
        }
        self
    }

    /// Don't wait for the build to finish.
    pub fn async_mode(mut self, async_mode: bool) -> Self {
        self.request.async_mode = async_mode;
        self
    }

    pub fn build(self) -> BuildRequest {
        self.request
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
