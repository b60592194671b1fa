use crate::model::WorkloadStat;
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-user counters shared by every task of one collection run.
///
/// Each increment is a single read-modify-write under the map lock, so
/// concurrent increments for the same user never get lost. The lock is only
/// held for the duration of one increment.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    stats: Mutex<IndexMap<String, WorkloadStat>>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&self, user: &str) {
        self.with_stat(user, |stat| stat.sent_pull_requests += 1);
    }

    pub fn record_reviewed(&self, user: &str) {
        self.with_stat(user, |stat| stat.reviewed_pull_requests += 1);
    }

    /// Copy of every record, in first-observation order.
    pub fn snapshot(&self) -> Vec<WorkloadStat> {
        self.lock().values().cloned().collect()
    }

    fn with_stat(&self, user: &str, update: impl FnOnce(&mut WorkloadStat)) {
        let mut stats = self.lock();
        let stat = stats
            .entry(user.to_string())
            .or_insert_with(|| WorkloadStat::new(user));
        update(stat);
    }

    // Counters are valid whatever a panicking holder left behind.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, WorkloadStat>> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn creates_records_lazily() {
        let aggregator = StatsAggregator::new();
        assert!(aggregator.snapshot().is_empty());

        aggregator.record_sent("alice");
        aggregator.record_sent("alice");
        aggregator.record_reviewed("bob");

        assert_eq!(
            aggregator.snapshot(),
            vec![
                WorkloadStat::with_counts("alice", 2, 0),
                WorkloadStat::with_counts("bob", 0, 1),
            ]
        );
    }

    #[test]
    fn sent_and_reviewed_share_one_record() {
        let aggregator = StatsAggregator::new();
        aggregator.record_reviewed("alice");
        aggregator.record_sent("alice");
        aggregator.record_reviewed("alice");

        assert_eq!(
            aggregator.snapshot(),
            vec![WorkloadStat::with_counts("alice", 1, 2)]
        );
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 1000;

        let aggregator = Arc::new(StatsAggregator::new());
        thread::scope(|scope| {
            for i in 0..THREADS {
                let aggregator = aggregator.clone();
                scope.spawn(move || {
                    for _ in 0..PER_THREAD {
                        aggregator.record_reviewed("same");
                        if i % 2 == 0 {
                            aggregator.record_sent("same");
                        }
                    }
                });
            }
        });

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].reviewed_pull_requests, THREADS * PER_THREAD);
        assert_eq!(snapshot[0].sent_pull_requests, THREADS / 2 * PER_THREAD);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_tasks_are_not_lost() {
        let aggregator = Arc::new(StatsAggregator::new());
        let handles = (0..16)
            .map(|_| {
                let aggregator = aggregator.clone();
                tokio::spawn(async move {
                    for n in 0..1000 {
                        aggregator.record_reviewed("same");
                        if n % 100 == 0 {
                            tokio::task::yield_now().await;
                        }
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in futures::future::join_all(handles).await {
            handle.unwrap();
        }

        assert_eq!(
            aggregator.snapshot(),
            vec![WorkloadStat::with_counts("same", 0, 16_000)]
        );
    }
}
