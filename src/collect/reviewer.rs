use super::StatsAggregator;
use crate::source::PullRequestSource;
use indicatif::ProgressBar;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReviewOutcome {
    /// Reviews were fetched; `reviews` of them counted as reviewing.
    Counted { number: u64, reviews: usize },
    /// The fetch failed and the pull request contributes no reviews.
    Skipped { number: u64 },
}

/// Runs one review fetch per pull request, at most `max_concurrency` at a time.
///
/// A failed fetch is tried once, logged and skipped; it never fails the run.
pub struct ReviewFetcher {
    source: Arc<dyn PullRequestSource>,
    slots: Arc<Semaphore>,
    progress: ProgressBar,
}

impl ReviewFetcher {
    pub fn new(source: Arc<dyn PullRequestSource>, max_concurrency: usize) -> Self {
        Self {
            source,
            slots: Arc::new(Semaphore::new(max_concurrency.max(1))),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Schedules the fetch for `number`. The task waits for a free slot first.
    pub fn spawn(
        &self,
        owner: Arc<str>,
        repo: Arc<str>,
        number: u64,
        aggregator: Arc<StatsAggregator>,
    ) -> JoinHandle<ReviewOutcome> {
        let source = self.source.clone();
        let slots = self.slots.clone();
        let progress = self.progress.clone();
        tokio::spawn(async move {
            let outcome = fetch_reviews(source, slots, &owner, &repo, number, &aggregator).await;
            progress.inc(1);
            outcome
        })
    }

    /// Fetches reviews for every pull request and waits for all of them.
    pub async fn fetch_all(
        &self,
        owner: &str,
        repo: &str,
        numbers: &[u64],
        aggregator: Arc<StatsAggregator>,
    ) -> Vec<ReviewOutcome> {
        let owner: Arc<str> = Arc::from(owner);
        let repo: Arc<str> = Arc::from(repo);
        let handles = numbers
            .iter()
            .map(|&number| self.spawn(owner.clone(), repo.clone(), number, aggregator.clone()))
            .collect::<Vec<_>>();

        futures::future::join_all(handles)
            .await
            .into_iter()
            .zip(numbers)
            .map(|(joined, &number)| {
                joined.unwrap_or_else(|error| {
                    tracing::warn!(number, %error, "review task did not finish");
                    ReviewOutcome::Skipped { number }
                })
            })
            .collect()
    }
}

async fn fetch_reviews(
    source: Arc<dyn PullRequestSource>,
    slots: Arc<Semaphore>,
    owner: &str,
    repo: &str,
    number: u64,
    aggregator: &StatsAggregator,
) -> ReviewOutcome {
    // Released on drop, whichever way this function returns.
    let _slot = match slots.acquire_owned().await {
        Ok(slot) => slot,
        Err(error) => {
            tracing::warn!(number, %error, "no slot for review fetch");
            return ReviewOutcome::Skipped { number };
        }
    };

    tracing::debug!("Fetch review on {owner}/{repo}#{number}");
    match source.list_reviews(owner, repo, number).await {
        Ok(reviews) => {
            let mut counted = 0;
            for review in reviews
                .iter()
                .filter(|review| review.state.counts_as_review())
                .filter(|review| !review.reviewer_login.is_empty())
            {
                aggregator.record_reviewed(&review.reviewer_login);
                counted += 1;
            }
            ReviewOutcome::Counted {
                number,
                reviews: counted,
            }
        }
        Err(error) => {
            tracing::warn!(number, %error, "skipping reviews of {owner}/{repo}#{number}");
            ReviewOutcome::Skipped { number }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewState, WorkloadStat};
    use crate::source::mock::MockSource;
    use std::time::Duration;

    #[tokio::test]
    async fn counts_everything_but_comments() {
        let source = Arc::new(
            MockSource::new()
                .review(1, "alice", ReviewState::Approved)
                .review(1, "bob", ReviewState::Commented)
                .review(1, "bob", ReviewState::ChangesRequested)
                .review(1, "alice", ReviewState::Approved)
                .review(1, "carol", ReviewState::Commented),
        );
        let fetcher = ReviewFetcher::new(source, 2);
        let aggregator = Arc::new(StatsAggregator::new());

        let outcomes = fetcher.fetch_all("acme", "widgets", &[1], aggregator.clone()).await;

        assert_eq!(outcomes, vec![ReviewOutcome::Counted { number: 1, reviews: 3 }]);
        assert_eq!(
            aggregator.snapshot(),
            vec![
                WorkloadStat::with_counts("alice", 0, 2),
                WorkloadStat::with_counts("bob", 0, 1),
            ]
        );
    }

    #[tokio::test]
    async fn reviews_with_an_empty_login_make_no_record() {
        let source = Arc::new(
            MockSource::new()
                .review(1, "", ReviewState::Approved)
                .review(1, "", ReviewState::ChangesRequested)
                .review(1, "erin", ReviewState::Approved),
        );
        let fetcher = ReviewFetcher::new(source, 2);
        let aggregator = Arc::new(StatsAggregator::new());

        let outcomes = fetcher.fetch_all("acme", "widgets", &[1], aggregator.clone()).await;

        assert_eq!(outcomes, vec![ReviewOutcome::Counted { number: 1, reviews: 1 }]);
        assert_eq!(aggregator.snapshot(), vec![WorkloadStat::with_counts("erin", 0, 1)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn never_exceeds_max_concurrency() {
        let numbers = (1..=40).collect::<Vec<u64>>();
        let source = Arc::new(MockSource::new().delay(Duration::from_millis(5)));
        let fetcher = ReviewFetcher::new(source.clone(), 3);

        let outcomes = fetcher
            .fetch_all("acme", "widgets", &numbers, Arc::new(StatsAggregator::new()))
            .await;

        assert_eq!(outcomes.len(), 40);
        assert_eq!(source.review_calls(), 40);
        assert!(source.peak_concurrency() <= 3, "peak {}", source.peak_concurrency());
        assert!(source.peak_concurrency() >= 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failures_are_skipped_once_and_release_their_slot() {
        let source = Arc::new(
            MockSource::new()
                .failing_review(1)
                .failing_review(2)
                .review(3, "dave", ReviewState::Approved),
        );
        // A single slot would deadlock if a failing fetch kept it.
        let fetcher = ReviewFetcher::new(source.clone(), 1);
        let aggregator = Arc::new(StatsAggregator::new());

        let outcomes = fetcher
            .fetch_all("acme", "widgets", &[1, 2, 3], aggregator.clone())
            .await;

        assert_eq!(
            outcomes,
            vec![
                ReviewOutcome::Skipped { number: 1 },
                ReviewOutcome::Skipped { number: 2 },
                ReviewOutcome::Counted { number: 3, reviews: 1 },
            ]
        );
        assert_eq!(source.review_calls(), 3);
        assert_eq!(aggregator.snapshot(), vec![WorkloadStat::with_counts("dave", 0, 1)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn many_tasks_reviewing_as_the_same_user_add_up() {
        let mut source = MockSource::new();
        for number in 1..=20 {
            for _ in 0..1000 {
                source = source.review(number, "same", ReviewState::Approved);
            }
        }
        let numbers = (1..=20).collect::<Vec<u64>>();
        let fetcher = ReviewFetcher::new(Arc::new(source), 4);
        let aggregator = Arc::new(StatsAggregator::new());

        fetcher.fetch_all("acme", "widgets", &numbers, aggregator.clone()).await;

        assert_eq!(
            aggregator.snapshot(),
            vec![WorkloadStat::with_counts("same", 0, 20_000)]
        );
    }
}
