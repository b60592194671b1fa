mod aggregator;
mod pipeline;
mod reviewer;

pub use aggregator::StatsAggregator;
pub use pipeline::{Collection, Collector};
pub use reviewer::{ReviewFetcher, ReviewOutcome};
