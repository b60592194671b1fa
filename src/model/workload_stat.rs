/// Per-user tally of pull requests sent (assigned) versus reviewed.
#[derive(Debug, Clone, Default, Eq, Hash, PartialEq)]
pub struct WorkloadStat {
    pub user: String,
    pub sent_pull_requests: usize,
    pub reviewed_pull_requests: usize,
}

impl WorkloadStat {
    pub fn new(user: impl ToString) -> Self {
        Self {
            user: user.to_string(),
            sent_pull_requests: 0,
            reviewed_pull_requests: 0,
        }
    }

    #[cfg(test)]
    pub fn with_counts(user: impl ToString, sent: usize, reviewed: usize) -> Self {
        Self {
            user: user.to_string(),
            sent_pull_requests: sent,
            reviewed_pull_requests: reviewed,
        }
    }

    /// Reviewed per sent pull request. `None` when nothing was sent, since the
    /// quotient is undefined there.
    pub fn ratio(&self) -> Option<f64> {
        if self.sent_pull_requests == 0 {
            return None;
        }
        Some(self.reviewed_pull_requests as f64 / self.sent_pull_requests as f64)
    }
}
