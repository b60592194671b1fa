use super::Formatter;
use crate::model::WorkloadStat;
use chrono::Utc;
use std::io::{self, Write};

/// Sensu/Graphite style `name<TAB>value<TAB>timestamp` lines, two per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLineFormatter {
    prefix: String,
}

impl MetricLineFormatter {
    pub fn new(prefix: impl ToString) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Renders every line with the same `timestamp` (seconds since epoch).
    pub fn render_at(
        &self,
        out: &mut dyn Write,
        stats: &[WorkloadStat],
        timestamp: i64,
    ) -> io::Result<()> {
        for stat in stats {
            writeln!(
                out,
                "{}.sent.{}\t{}\t{}",
                self.prefix, stat.user, stat.sent_pull_requests, timestamp
            )?;
            writeln!(
                out,
                "{}.reviewed.{}\t{}\t{}",
                self.prefix, stat.user, stat.reviewed_pull_requests, timestamp
            )?;
        }
        Ok(())
    }
}

impl Formatter for MetricLineFormatter {
    fn render(&self, out: &mut dyn Write, stats: &[WorkloadStat]) -> io::Result<()> {
        self.render_at(out, stats, Utc::now().timestamp())
    }
}
