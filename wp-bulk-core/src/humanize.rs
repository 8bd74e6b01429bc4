use std::time::Duration;

/// Render an elapsed time the way the run summary reports it
pub fn humane_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();

    if secs < 60 {
        format!("{:.2} seconds", elapsed.as_secs_f64())
    } else if secs < 3600 {
        format!("{} minutes and {} seconds", secs / 60, secs % 60)
    } else {
        format!(
            "{} hours, {} minutes, and {} seconds",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}
