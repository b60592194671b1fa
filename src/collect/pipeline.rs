use super::{ReviewFetcher, ReviewOutcome, StatsAggregator};
use crate::model::WorkloadStat;
use crate::source::{FetchResult, ListOptions, PullRequestSource};
use indicatif::ProgressBar;
use std::sync::Arc;

/// Result of one collection pass.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Collection {
    pub stats: Vec<WorkloadStat>,
    /// Pull requests whose reviews could not be fetched. When non-empty the
    /// reviewed counts are incomplete.
    pub skipped: Vec<u64>,
}

/// Fetches one page of pull requests, fans out review fetches and merges the
/// results into per-user stats.
pub struct Collector {
    source: Arc<dyn PullRequestSource>,
    reviewer: ReviewFetcher,
    progress: ProgressBar,
}

impl Collector {
    pub fn new(source: Arc<dyn PullRequestSource>, max_concurrency: usize) -> Self {
        Self {
            reviewer: ReviewFetcher::new(source.clone(), max_concurrency),
            source,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.reviewer = self.reviewer.with_progress(progress.clone());
        self.progress = progress;
        self
    }

    /// Only the initial listing can fail the pass; review fetch failures end
    /// up in [`Collection::skipped`].
    pub async fn collect(
        &self,
        owner: &str,
        repo: &str,
        options: &ListOptions,
    ) -> FetchResult<Collection> {
        tracing::info!(per_page = options.per_page, "Fetch pull request on {owner}/{repo}");
        let pull_requests = self
            .source
            .list_pull_requests(owner, repo, options)
            .await?;

        let aggregator = Arc::new(StatsAggregator::new());
        for assignee in pull_requests.iter().filter_map(|pr| pr.assignee()) {
            aggregator.record_sent(assignee);
        }

        self.progress.set_length(pull_requests.len() as u64);
        self.progress.set_message("Fetching reviews");
        let numbers = pull_requests.iter().map(|pr| pr.number).collect::<Vec<_>>();
        let outcomes = self
            .reviewer
            .fetch_all(owner, repo, &numbers, aggregator.clone())
            .await;
        self.progress.finish_and_clear();

        let skipped = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                ReviewOutcome::Skipped { number } => Some(*number),
                ReviewOutcome::Counted { .. } => None,
            })
            .collect::<Vec<_>>();
        let stats = aggregator.snapshot();
        tracing::info!(
            pull_requests = pull_requests.len(),
            users = stats.len(),
            skipped = skipped.len(),
            "Collected workload on {owner}/{repo}"
        );
        Ok(Collection { stats, skipped })
    }
}
