//! Credential lookup.

use std::collections::HashMap;

use bktrigger_client::ApiToken;

/// Resolves a credentials id to an API token.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, id: &str) -> Option<ApiToken>;
}

/// Reads the token from the environment variable named by the id.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialStore;

impl CredentialStore for EnvCredentialStore {
    fn lookup(&self, id: &str) -> Option<ApiToken> {
        if id.trim().is_empty() {
            return None;
        }
        std::env::var(id)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(ApiToken::new)
    }
}

/// In-memory credentials.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentialStore {
    tokens: HashMap<String, ApiToken>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a token.
    pub fn with_token(mut self, id: impl Into<String>, token: impl Into<String>) -> Self {
        self.tokens.insert(id.into(), ApiToken::new(token));
        self
    }
}

impl CredentialStore for StaticCredentialStore {
    fn lookup(&self, id: &str) -> Option<ApiToken> {
        self.tokens.get(id).cloned()
    }
}
