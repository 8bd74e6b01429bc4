use indicatif::{ProgressBar, ProgressStyle};
use wp_bulk_core::BatchProgress;

pub fn batch_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░ "),
    );
    pb.set_message(message);
    pb
}

/// Advance the bar to the end of the batch that just finished
pub fn advance(pb: &ProgressBar, progress: &BatchProgress, verb: &str) {
    pb.set_position(progress.submitted as u64);
    pb.set_message(format!(
        "Batch {}/{}, {} {}",
        progress.batch, progress.batches, progress.succeeded, verb
    ));
}
