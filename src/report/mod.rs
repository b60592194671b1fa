//! Rendering of the final stats.
//!
//! Every output format implements [`Formatter`]; [`formatter_for`] maps the
//! `--format` selector onto one of them.

mod json;
mod markdown;
mod metric_line;
mod tsv;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use metric_line::MetricLineFormatter;
pub use tsv::TsvFormatter;

use crate::error::ConfigError;
use crate::model::WorkloadStat;
use std::io::{self, Write};

pub const OUTPUT_TSV: &str = "tsv";
pub const OUTPUT_SENSU: &str = "sensu";
pub const OUTPUT_MARKDOWN: &str = "markdown";
pub const OUTPUT_JSON: &str = "json";

pub const DEFAULT_METRIC_PREFIX: &str = "pull_requests";

pub trait Formatter: Send + Sync {
    /// Writes `stats` in the given order. Must not reorder or alter them.
    fn render(&self, out: &mut dyn Write, stats: &[WorkloadStat]) -> io::Result<()>;
}

pub fn formatter_for(format: &str, metric_prefix: &str) -> Result<Box<dyn Formatter>, ConfigError> {
    match format {
        OUTPUT_TSV => Ok(Box::new(TsvFormatter)),
        OUTPUT_SENSU => Ok(Box::new(MetricLineFormatter::new(metric_prefix))),
        OUTPUT_MARKDOWN => Ok(Box::new(MarkdownFormatter::default())),
        OUTPUT_JSON => Ok(Box::new(JsonFormatter)),
        unknown => Err(ConfigError::UnknownFormat(unknown.to_string())),
    }
}
