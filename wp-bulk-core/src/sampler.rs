//! Per-batch spot checks
//!
//! One record from each finished batch is logged so an operator can eyeball
//! progress. Successful WordPress responses are condensed to the fields that
//! identify what was removed.

use crate::outcome::StatusRecord;
use rand::Rng;
use serde_json::{json, Value};

/// Pick one record uniformly at random
pub fn pick<'a, R: Rng>(batch: &'a [StatusRecord], rng: &mut R) -> Option<&'a StatusRecord> {
    if batch.is_empty() {
        return None;
    }
    batch.get(rng.gen_range(0..batch.len()))
}

/// Copy of the record with a successful response body condensed
pub fn summarize(record: &StatusRecord) -> StatusRecord {
    let mut summary = record.clone();

    if !record.is_success() {
        return summary;
    }

    let parsed = record
        .response
        .as_deref()
        .and_then(|body| serde_json::from_str::<Value>(body).ok());

    if let Some(body) = parsed {
        let previous = &body["previous"];
        let condensed = json!({
            "deleted": body["deleted"].as_bool().unwrap_or(false),
            "id": previous["id"],
            "title": previous["title"]["raw"],
            "slug": previous["slug"],
        });
        summary.response = Some(condensed.to_string());
    }

    summary
}

/// Log a random record from the batch; does nothing for an empty batch
pub fn log_random_record(batch: &[StatusRecord]) {
    let mut rng = rand::thread_rng();
    if let Some(record) = pick(batch, &mut rng) {
        tracing::info!("Random record from current batch: {:?}", summarize(record));
    }
}
