//! One-shot relevance sort against live backends.
//!
//! Usage: `panel-rank-probe <panel> <query> [config.toml]`
//!
//! Ranked documents are printed to stdout as JSON; tracing goes to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use panel_rank::{Panel, RankConfig, RelevancePipeline, TracingObserver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("panel_rank=info,panel_search=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: panel-rank-probe <panel> <query> [config.toml]";
    let panel: Panel = args
        .next()
        .context(usage)?
        .parse()
        .context("invalid panel")?;
    let query = args.next().context(usage)?;

    let config = match args.next().map(PathBuf::from) {
        Some(path) => RankConfig::from_file(&path)?,
        None => RankConfig::default(),
    };

    let pipeline = RelevancePipeline::from_config(&config)?.with_observer(Arc::new(TracingObserver));

    let documents = pipeline
        .rank(panel, &query, "title^100 description^10", &[], None)
        .await
        .map_err(|e| {
            tracing::error!(code = e.code(), error = %e, "sort by relevance failed");
            anyhow::anyhow!("sort by relevance failed: {e}")
        })?;

    println!("{}", serde_json::to_string_pretty(&documents)?);
    Ok(())
}
