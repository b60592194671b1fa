use super::Formatter;
use crate::model::WorkloadStat;
use std::io::{self, Write};

/// Tab separated table with a `user done reviewed` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvFormatter;

impl Formatter for TsvFormatter {
    fn render(&self, out: &mut dyn Write, stats: &[WorkloadStat]) -> io::Result<()> {
        writeln!(out, "user\tdone\treviewed")?;
        for stat in stats {
            writeln!(
                out,
                "{}\t{}\t{}",
                stat.user, stat.sent_pull_requests, stat.reviewed_pull_requests
            )?;
        }
        Ok(())
    }
}
