mod pull_request;
mod workload_stat;

pub use pull_request::{PullRequestSummary, ReviewEvent, ReviewState};
pub use workload_stat::WorkloadStat;
