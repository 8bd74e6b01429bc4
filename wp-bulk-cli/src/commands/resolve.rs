use anyhow::{Context, Result};
use std::time::Instant;
use wp_bulk_core::humanize::humane_duration;
use wp_bulk_core::resolver::load_slugs;
use wp_bulk_core::{jsonl, RunConfig, SlugResolver};

use crate::progress;

pub async fn execute(config: RunConfig) -> Result<()> {
    config.log_summary();

    let slugs = load_slugs(&config.input_path)
        .with_context(|| format!("Failed to load slugs from {}", config.input_path.display()))?;
    tracing::info!("Total slugs to resolve: {}", slugs.len());

    let resolver = SlugResolver::new(&config)?;
    let pb = progress::batch_bar(slugs.len(), "Resolving slugs...");

    let start = Instant::now();
    let resolved = resolver
        .run(&slugs, |batch| progress::advance(&pb, batch, "resolved"))
        .await;
    pb.finish_with_message("Resolution complete");

    tracing::info!(
        "Resolved {} of {} slugs in {}.",
        resolved.len(),
        slugs.len(),
        humane_duration(start.elapsed())
    );

    jsonl::write_records(&config.output_path, &resolved).with_context(|| {
        format!("Failed to write {}", config.output_path.display())
    })?;

    println!("✓ Saved {} records to {}", resolved.len(), config.output_path.display());

    Ok(())
}
