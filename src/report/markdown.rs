use super::Formatter;
use crate::model::WorkloadStat;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::io::{self, Write};

const DEFAULT_TITLE: &str = "Pull request workload";

/// A titled markdown document holding one table row per user.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    title: String,
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl MarkdownFormatter {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl Formatter for MarkdownFormatter {
    fn render(&self, out: &mut dyn Write, stats: &[WorkloadStat]) -> io::Result<()> {
        let mut doc = Markdown::new();
        doc.header1(self.title.clone());
        if stats.is_empty() {
            doc.paragraph("No pull requests.".to_string());
        } else {
            doc.add_workload(stats)?;
        }
        write!(out, "{}", doc.render())
    }
}

trait MarkdownExt {
    fn add_workload(&mut self, stats: &[WorkloadStat]) -> io::Result<()>;
}

impl MarkdownExt for Markdown {
    fn add_workload(&mut self, stats: &[WorkloadStat]) -> io::Result<()> {
        let header = vec![
            Heading::new("User".to_string(), None),
            Heading::new("Done".to_string(), Some(HeadingAlignment::Right)),
            Heading::new("Reviewed".to_string(), Some(HeadingAlignment::Right)),
            Heading::new("Ratio".to_string(), Some(HeadingAlignment::Right)),
        ];

        let table = stats
            .iter()
            .map(|stat| {
                vec![
                    format!("**{}**", stat.user),
                    stat.sent_pull_requests.to_string(),
                    stat.reviewed_pull_requests.to_string(),
                    format_ratio(stat.ratio()),
                ]
            })
            .collect::<Vec<_>>();

        let mut md_table = MarkdownTable::new(table);
        md_table.with_headings(header);
        let rendered = md_table
            .as_markdown()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{e:?}")))?;
        self.paragraph(rendered);
        Ok(())
    }
}

fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{ratio:.2}"),
        None => "-".to_string(),
    }
}
