//! Scripted [`PullRequestSource`] for tests.

use super::{FetchResult, ListOptions, PullRequestSource};
use crate::error::FetchError;
use crate::model::{PullRequestSummary, ReviewEvent, ReviewState};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockSource {
    pull_requests: Vec<PullRequestSummary>,
    reviews: HashMap<u64, Vec<ReviewEvent>>,
    failing_reviews: HashSet<u64>,
    fail_listing: bool,
    delay: Option<Duration>,
    active: AtomicUsize,
    peak: AtomicUsize,
    review_calls: AtomicUsize,
    listed_with: Mutex<Option<ListOptions>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pull_request(mut self, number: u64, assignee: Option<&str>) -> Self {
        self.pull_requests
            .push(PullRequestSummary::new(number, assignee));
        self
    }

    pub fn review(mut self, number: u64, reviewer: &str, state: ReviewState) -> Self {
        self.reviews
            .entry(number)
            .or_default()
            .push(ReviewEvent::new(reviewer, state));
        self
    }

    pub fn failing_review(mut self, number: u64) -> Self {
        self.failing_reviews.insert(number);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Highest number of review fetches observed in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn review_calls(&self) -> usize {
        self.review_calls.load(Ordering::SeqCst)
    }

    pub fn listed_with(&self) -> Option<ListOptions> {
        self.listed_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestSource for MockSource {
    async fn list_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        options: &ListOptions,
    ) -> FetchResult<Vec<PullRequestSummary>> {
        *self.listed_with.lock().unwrap() = Some(options.clone());
        if self.fail_listing {
            return Err(FetchError::Api("listing refused".to_string()));
        }
        Ok(self
            .pull_requests
            .iter()
            .take(options.per_page as usize)
            .cloned()
            .collect())
    }

    async fn list_reviews(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> FetchResult<Vec<ReviewEvent>> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        if self.failing_reviews.contains(&number) {
            return Err(FetchError::Status {
                status: 502,
                url: format!("mock://pulls/{number}/reviews"),
                body: "bad gateway".to_string(),
            });
        }
        Ok(self.reviews.get(&number).cloned().unwrap_or_default())
    }
}
