mod collect;
mod config;
mod error;
mod model;
mod report;
mod source;
mod utils;

use crate::collect::{Collection, Collector};
use crate::config::{Args, Config};
use crate::error::Result;
use crate::utils::review_progress;
use clap::Parser;
use itertools::Itertools;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(error) = run(args).await {
        tracing::error!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args, |name| std::env::var(name).ok())?;
    let formatter = config.formatter()?;
    let source = config.source()?;

    let collector =
        Collector::new(source, config.max_concurrency).with_progress(review_progress());
    let collection: Collection = collector
        .collect(&config.owner, &config.repo, &config.list_options)
        .await?;
    if !collection.skipped.is_empty() {
        tracing::warn!(
            skipped = ?collection.skipped,
            "reviews missing for {} pull requests, reviewed counts are incomplete",
            collection.skipped.len()
        );
    }
    let stats = collection
        .stats
        .into_iter()
        .sorted_by(|a, b| a.user.cmp(&b.user))
        .collect::<Vec<_>>();

    let mut out = std::io::stdout().lock();
    formatter.render(&mut out, &stats)?;
    out.flush()?;
    Ok(())
}
