use anyhow::{Context, Result};
use std::time::Instant;
use wp_bulk_core::humanize::humane_duration;
use wp_bulk_core::{ids, status, BatchDeleter, RunConfig};

use crate::progress;

pub async fn execute(config: RunConfig) -> Result<()> {
    config.log_summary();

    tracing::info!("Reading file {}...", config.input_path.display());
    let post_ids = ids::load_ids(&config.input_path)
        .with_context(|| format!("Failed to load ids from {}", config.input_path.display()))?;
    tracing::info!("Total post ids to process: {}", post_ids.len());

    let deleter = BatchDeleter::new(&config)?;
    let pb = progress::batch_bar(post_ids.len(), "Deleting posts...");

    let start = Instant::now();
    let results = deleter
        .run(&post_ids, |batch| progress::advance(&pb, batch, "deleted"))
        .await;
    let elapsed = start.elapsed();
    pb.finish_with_message("Deletion complete");

    let succeeded = results.iter().filter(|r| r.is_success()).count();
    tracing::info!(
        "Submitted {} posts in {}.",
        post_ids.len(),
        humane_duration(elapsed)
    );
    tracing::info!("{} deleted, {} failed", succeeded, results.len() - succeeded);

    // Deletions are final at this point; only the report can be lost
    tracing::info!("Writing status file to {}...", config.output_path.display());
    status::write_status_file(&config.output_path, &results).with_context(|| {
        format!(
            "Failed to write status file {}",
            config.output_path.display()
        )
    })?;

    println!(
        "✓ Processed {} posts ({} deleted, {} failed)",
        results.len(),
        succeeded,
        results.len() - succeeded
    );
    println!("Status file: {}", config.output_path.display());

    Ok(())
}
