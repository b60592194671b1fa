use super::Formatter;
use crate::model::WorkloadStat;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
struct JsonStat<'a> {
    user: &'a str,
    sent_pull_requests: usize,
    reviewed_pull_requests: usize,
    ratio: Option<f64>,
}

/// A JSON array, `ratio` is `null` when nothing was sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn render(&self, out: &mut dyn Write, stats: &[WorkloadStat]) -> io::Result<()> {
        let rows = stats
            .iter()
            .map(|stat| JsonStat {
                user: &stat.user,
                sent_pull_requests: stat.sent_pull_requests,
                reviewed_pull_requests: stat.reviewed_pull_requests,
                ratio: stat.ratio(),
            })
            .collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)
    }
}
