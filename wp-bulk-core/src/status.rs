//! Status file: one JSON line per processed identifier

use crate::error::{Error, Result};
use crate::jsonl;
use crate::outcome::StatusRecord;
use std::path::Path;

/// Write (or overwrite) the status file, gzip when the path ends in `.gz`
pub fn write_status_file(path: &Path, records: &[StatusRecord]) -> Result<()> {
    jsonl::write_records(path, records)
}

/// Read a status file back
pub fn read_status_file(path: &Path) -> Result<Vec<StatusRecord>> {
    jsonl::read_objects(path)?
        .into_iter()
        .map(|(line, object)| {
            serde_json::from_value(object.into()).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                line,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::RecordId;
    use crate::outcome::DeleteOutcome;

    fn sample_records() -> Vec<StatusRecord> {
        vec![
            StatusRecord::new(
                RecordId::Int(1),
                "https://example.com/posts/1?force=true".to_string(),
                DeleteOutcome::from_response(200, r#"{"deleted":true}"#.to_string()),
            ),
            StatusRecord::new(
                RecordId::from("draft-2"),
                "https://example.com/posts/draft-2?force=true".to_string(),
                DeleteOutcome::TimedOut,
            ),
            StatusRecord::new(
                RecordId::Int(3),
                "https://example.com/posts/3?force=true".to_string(),
                DeleteOutcome::from_response(500, "oops\nmultiline".to_string()),
            ),
        ]
    }

    #[test]
    fn gzip_round_trip_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.jsonl.gz");

        write_status_file(&path, &sample_records()).unwrap();

        assert_eq!(read_status_file(&path).unwrap(), sample_records());
    }

    #[test]
    fn rewrites_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["status.jsonl", "status.jsonl.gz"] {
            let path = dir.path().join(name);
            write_status_file(&path, &sample_records()).unwrap();
            let first = std::fs::read(&path).unwrap();
            write_status_file(&path, &sample_records()).unwrap();
            let second = std::fs::read(&path).unwrap();
            assert_eq!(first, second, "{name} differs between runs");
        }
    }

    #[test]
    fn one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.jsonl");

        write_status_file(&path, &sample_records()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("status.jsonl");
        assert!(matches!(
            write_status_file(&path, &sample_records()),
            Err(Error::Io { .. })
        ));
    }
}
