//! Identifier loading
//!
//! Reads the `id` field of every line of a JSONL file (gzip when the path
//! ends in `.gz`). Lines with a missing or falsy `id` are skipped, and a
//! malformed line fails the whole load.

use crate::error::{Error, Result};
use crate::jsonl;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Opaque key naming a remote record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl RecordId {
    /// Whether the id survives being appended as a single URL path segment
    pub fn is_path_segment(&self) -> bool {
        match self {
            RecordId::Int(_) => true,
            RecordId::Text(id) => id != "." && id != "..",
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

enum IdField {
    Missing,
    Present(RecordId),
    Unsupported,
}

fn classify(value: Option<&Value>) -> IdField {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => IdField::Missing,
        Some(Value::String(s)) if s.is_empty() => IdField::Missing,
        Some(Value::String(s)) if s == "." || s == ".." => IdField::Unsupported,
        Some(Value::String(s)) => IdField::Present(RecordId::Text(s.clone())),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => IdField::Missing,
            Some(id) => IdField::Present(RecordId::Int(id)),
            None if n.as_f64() == Some(0.0) => IdField::Missing,
            None => IdField::Unsupported,
        },
        Some(Value::Array(a)) if a.is_empty() => IdField::Missing,
        Some(Value::Object(o)) if o.is_empty() => IdField::Missing,
        Some(_) => IdField::Unsupported,
    }
}

/// Usable identifier held by a JSON value, if any
pub(crate) fn record_id(value: &Value) -> Option<RecordId> {
    match classify(Some(value)) {
        IdField::Present(id) => Some(id),
        IdField::Missing | IdField::Unsupported => None,
    }
}

/// Load identifiers in file order
pub fn load_ids(path: &Path) -> Result<Vec<RecordId>> {
    let objects = jsonl::read_objects(path)?;
    let mut ids = Vec::with_capacity(objects.len());
    let mut skipped = 0usize;

    for (line, object) in objects {
        match classify(object.get("id")) {
            IdField::Present(id) => ids.push(id),
            IdField::Missing => skipped += 1,
            IdField::Unsupported => {
                return Err(Error::UnsupportedId {
                    path: path.to_path_buf(),
                    line,
                    value: object.get("id").map(Value::to_string).unwrap_or_default(),
                });
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} lines without an id", skipped);
    }

    Ok(ids)
}
