use super::{FetchResult, ListOptions, PullRequestSource};
use crate::error::FetchError;
use crate::model::{PullRequestSummary, ReviewEvent, ReviewState};
use async_trait::async_trait;
use gitea_sdk::model::issues::State;
use gitea_sdk::model::reviews::ReviewStateType;
use gitea_sdk::{Auth, Client};

pub type GiteaPullRequest = gitea_sdk::model::pulls::PullRequest;
pub type GiteaPullReview = gitea_sdk::model::reviews::PullReview;

/// Gitea API. Gitea orders pull requests itself, so `sort` and `direction`
/// from [`ListOptions`] are not sent.
pub struct GiteaSource {
    client: Client,
}

impl GiteaSource {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(base_url, Auth::Token(token)),
        }
    }
}

fn api_error(e: impl ToString) -> FetchError {
    FetchError::Api(e.to_string())
}

fn summary(pull_request: &GiteaPullRequest) -> Option<PullRequestSummary> {
    let number = u64::try_from(pull_request.number).ok()?;
    let assignee = first_assignee(
        pull_request
            .assignees
            .iter()
            .flatten()
            .map(|user| user.login.as_str()),
    );
    Some(PullRequestSummary::new(number, assignee))
}

/// Gitea only lists assignees; the first one plays GitHub's `assignee`.
fn first_assignee<'a>(mut logins: impl Iterator<Item = &'a str>) -> Option<String> {
    logins.next().map(str::to_string)
}

/// Reviews by deleted users come back without one and are dropped.
fn review_event(login: Option<&str>, state: &ReviewStateType) -> Option<ReviewEvent> {
    login.map(|login| ReviewEvent::new(login, review_state(state)))
}

fn review_state(state: &ReviewStateType) -> ReviewState {
    match state {
        ReviewStateType::Approved => ReviewState::Approved,
        ReviewStateType::RequestChanges => ReviewState::ChangesRequested,
        ReviewStateType::Comment => ReviewState::Commented,
        ReviewStateType::Pending => ReviewState::Pending,
        ReviewStateType::RequestReview => ReviewState::Pending,
        ReviewStateType::Unknown => ReviewState::Unknown,
    }
}

#[async_trait]
impl PullRequestSource for GiteaSource {
    async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        options: &ListOptions,
    ) -> FetchResult<Vec<PullRequestSummary>> {
        let gitea_pull_requests = self
            .client
            .pulls(owner, repo)
            .list()
            .limit(i64::from(options.per_page))
            .page(1)
            .state(State::All)
            .send(&self.client)
            .await
            .map_err(api_error)?;
        Ok(gitea_pull_requests.iter().filter_map(summary).collect())
    }

    async fn list_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> FetchResult<Vec<ReviewEvent>> {
        let index = i64::try_from(number).map_err(api_error)?;
        let gitea_reviews: Vec<GiteaPullReview> = self
            .client
            .pulls(owner, repo)
            .reviews()
            .get(index)
            .send(&self.client)
            .await
            .map_err(api_error)?;
        Ok(gitea_reviews
            .iter()
            .filter_map(|review| {
                let login = review.user.as_ref().map(|user| user.login.as_str());
                review_event(login, &review.state)
            })
            .collect())
    }
}
