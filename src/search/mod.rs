use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::profile::SearchResult;

pub mod google;

/// Largest page a provider returns for a single query.
pub const MAX_PAGE_SIZE: usize = 10;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build client: {0}")]
    Build(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// An abstraction over web search backends that return [`SearchResult`]s.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs `query` and returns at most `max_results` results.
    ///
    /// Transport and status failures are logged by the implementation and
    /// reported as an empty list.
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult>;
}

/// Builds the HTTP client shared by provider adapters.
///
/// `timeout` bounds every request end to end.
pub fn build_reqwest_client(timeout: Duration) -> ProviderResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::Build(e.to_string()))
}
