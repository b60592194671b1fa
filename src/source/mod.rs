//! Where pull requests and reviews come from.
//!
//! The collection engine only sees [`PullRequestSource`]; the concrete
//! backends wrap a hosting platform's API.

mod gitea;
mod github;
#[cfg(test)]
pub mod mock;

pub use gitea::GiteaSource;
pub use github::{api_root, GithubSource, DEFAULT_BASE_URL};

use crate::error::FetchError;
use crate::model::{PullRequestSummary, ReviewEvent};
use async_trait::async_trait;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Query for the single page of pull requests a collection pass looks at.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ListOptions {
    pub state: String,
    pub sort: String,
    pub direction: String,
    pub per_page: u32,
}

impl ListOptions {
    /// All pull requests, most recently updated first.
    pub fn recently_updated(per_page: u32) -> Self {
        Self {
            state: "all".to_string(),
            sort: "updated".to_string(),
            direction: "desc".to_string(),
            per_page,
        }
    }
}

#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Fetches page one of the repository's pull requests. Never paginates.
    async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        options: &ListOptions,
    ) -> FetchResult<Vec<PullRequestSummary>>;

    async fn list_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> FetchResult<Vec<ReviewEvent>>;
}
