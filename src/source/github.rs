use super::{FetchResult, ListOptions, PullRequestSource};
use crate::error::{ConfigError, FetchError, Result};
use crate::model::{PullRequestSummary, ReviewEvent, ReviewState};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "pr-workload";

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubPullRequest {
    number: u64,
    assignee: Option<GithubUser>,
}

#[derive(Debug, Deserialize)]
struct GithubReview {
    user: Option<GithubUser>,
    state: String,
}

/// GitHub (or GitHub Enterprise) REST API.
#[derive(Debug, Clone)]
pub struct GithubSource {
    client: Client,
    api_root: Url,
}

impl GithubSource {
    pub fn new(base_url: &str, token: &str, insecure_skip_verify: bool) -> Result<Self> {
        let api_root = api_root(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConfigError::InvalidToken)?;
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .danger_accept_invalid_certs(insecure_skip_verify)
            .build()
            .map_err(FetchError::from)?;
        Ok(Self { client, api_root })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn endpoint(&self, path: &str) -> FetchResult<Url> {
        self.api_root
            .join(path)
            .map_err(|e| FetchError::Api(format!("bad endpoint `{path}`: {e}")))
    }
}

/// The public API is used as given; any other base url is an Enterprise host
/// whose API lives under `api/v3/`.
pub fn api_root(base_url: &str) -> std::result::Result<Url, ConfigError> {
    let mut root = base_url.trim().to_string();
    if !root.ends_with('/') {
        root.push('/');
    }
    if root != format!("{DEFAULT_BASE_URL}/") && !root.ends_with("/api/v3/") {
        root.push_str("api/v3/");
    }
    Url::parse(&root).map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))
}

#[async_trait]
impl PullRequestSource for GithubSource {
    async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        options: &ListOptions,
    ) -> FetchResult<Vec<PullRequestSummary>> {
        let mut url = self.endpoint(&format!("repos/{owner}/{repo}/pulls"))?;
        url.query_pairs_mut()
            .append_pair("state", &options.state)
            .append_pair("sort", &options.sort)
            .append_pair("direction", &options.direction)
            .append_pair("per_page", &options.per_page.to_string());

        let pulls: Vec<GithubPullRequest> = self.get_json(url).await?;
        Ok(pulls
            .into_iter()
            .map(|pr| PullRequestSummary::new(pr.number, pr.assignee.map(|u| u.login)))
            .collect())
    }

    async fn list_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> FetchResult<Vec<ReviewEvent>> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/pulls/{number}/reviews"))?;
        let reviews: Vec<GithubReview> = self.get_json(url).await?;
        Ok(reviews
            .into_iter()
            .filter_map(|review| {
                let user = review.user?;
                Some(ReviewEvent::new(user.login, ReviewState::parse(&review.state)))
            })
            .collect())
    }
}
