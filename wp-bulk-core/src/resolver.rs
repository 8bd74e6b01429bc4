//! Slug to identifier resolution
//!
//! Looks each slug up with `GET <endpoint>?slug=<slug>` and keeps the id of
//! the first match. The output lines carry an `id` field, so a resolved file
//! can be fed straight to the deleter.

use crate::client::WpClient;
use crate::config::RunConfig;
use crate::deleter::BatchProgress;
use crate::error::Result;
use crate::ids::{self, RecordId};
use crate::jsonl;
use crate::pool::WorkerPool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSlug {
    pub slug: String,
    pub id: RecordId,
}

/// Load the `slug` field of every line; lines without one are logged and skipped
pub fn load_slugs(path: &Path) -> Result<Vec<String>> {
    let mut slugs = Vec::new();

    for (line, object) in jsonl::read_objects(path)? {
        match object.get("slug") {
            Some(Value::String(slug)) if !slug.is_empty() => slugs.push(slug.clone()),
            _ => tracing::error!("Missing 'slug' on line {} of {}", line, path.display()),
        }
    }

    Ok(slugs)
}

/// Interpret a slug lookup response
pub fn parse_lookup(status: u16, body: &str) -> Option<RecordId> {
    if status != 200 {
        return None;
    }

    let matches: Vec<Value> = serde_json::from_str(body).ok()?;
    matches.first().and_then(|post| ids::record_id(&post["id"]))
}

pub struct SlugResolver {
    client: WpClient,
    pool: WorkerPool,
    batch_size: usize,
}

impl SlugResolver {
    pub fn new(config: &RunConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            client: WpClient::new(config)?,
            pool: WorkerPool::new(config.pool_size),
            batch_size: config.batch_size,
        })
    }

    /// Resolve every slug; unresolved slugs are dropped, order is kept
    pub async fn run<F>(&self, slugs: &[String], mut on_batch: F) -> Vec<ResolvedSlug>
    where
        F: FnMut(&BatchProgress),
    {
        let total = slugs.len();
        let batches = total.div_ceil(self.batch_size);
        let mut resolved = Vec::new();
        let mut submitted = 0;

        for (index, batch) in slugs.chunks(self.batch_size).enumerate() {
            let client = self.client.clone();
            let results = self
                .pool
                .map(batch.to_vec(), move |slug| {
                    let client = client.clone();
                    async move { resolve_one(&client, slug).await }
                })
                .await;

            for (slug, result) in batch.iter().zip(results) {
                match result {
                    Ok(Some(found)) => resolved.push(found),
                    Ok(None) => {}
                    Err(e) => tracing::error!("Worker failed while resolving slug {}: {}", slug, e),
                }
            }

            submitted += batch.len();
            tracing::info!(
                "Resolved {} of {} slugs submitted so far",
                resolved.len(),
                submitted
            );

            on_batch(&BatchProgress {
                batch: index + 1,
                batches,
                batch_len: batch.len(),
                submitted,
                total,
                succeeded: resolved.len(),
            });
        }

        resolved
    }
}

async fn resolve_one(client: &WpClient, slug: String) -> Option<ResolvedSlug> {
    match client.get_by_slug(&slug).await {
        Ok((status, body)) => match parse_lookup(status, &body) {
            Some(id) => {
                tracing::debug!("Fetched ID {} for slug {}", id, slug);
                Some(ResolvedSlug { slug, id })
            }
            None if status != 200 => {
                tracing::error!("Failed to fetch ID for slug {}. Status code: {}", slug, status);
                None
            }
            None => {
                tracing::error!("No ID returned for slug {}", slug);
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to fetch ID for slug {}: {:?}", slug, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_first_match() {
        let body = r#"[{"id": 41, "slug": "hello"}, {"id": 99, "slug": "hello"}]"#;
        assert_eq!(parse_lookup(200, body), Some(RecordId::Int(41)));
    }

    #[test]
    fn empty_or_failed_lookups_resolve_to_nothing() {
        assert_eq!(parse_lookup(200, "[]"), None);
        assert_eq!(parse_lookup(200, r#"[{"slug": "no-id"}]"#), None);
        assert_eq!(parse_lookup(200, r#"{"code": "rest_error"}"#), None);
        assert_eq!(parse_lookup(404, r#"[{"id": 1}]"#), None);
    }

    #[test]
    fn slugs_without_value_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slugs.jsonl");
        std::fs::write(
            &path,
            "{\"slug\": \"first\"}\n{\"title\": \"x\"}\n{\"slug\": \"\"}\n{\"slug\": \"second\"}\n",
        )
        .unwrap();

        assert_eq!(load_slugs(&path).unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn resolved_lines_load_as_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolved.jsonl.gz");
        let resolved = vec![
            ResolvedSlug {
                slug: "a".to_string(),
                id: RecordId::Int(5),
            },
            ResolvedSlug {
                slug: "b".to_string(),
                id: RecordId::Int(6),
            },
        ];

        jsonl::write_records(&path, &resolved).unwrap();

        assert_eq!(
            ids::load_ids(&path).unwrap(),
            vec![RecordId::Int(5), RecordId::Int(6)]
        );
    }
}
