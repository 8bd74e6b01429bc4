//! Line-delimited JSON files with transparent gzip
//!
//! A path ending in `.gz` is read through a gzip decoder and written through
//! a gzip encoder. Everything else is plain text.

use crate::error::{Error, Result};
use flate2::{read::MultiGzDecoder, write::GzEncoder, Compression};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Read every line of the file, decompressing if needed
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;

    let reader: Box<dyn BufRead> = if is_gzip(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(path, e))
}

/// Parse every non-blank line as a JSON object, keeping 1-based line numbers
///
/// Lines are parsed in parallel. When several lines are bad, the error for
/// the earliest one is returned.
pub fn read_objects(path: &Path) -> Result<Vec<(usize, Map<String, Value>)>> {
    let lines = read_lines(path)?;

    let parsed: Vec<Option<Result<(usize, Map<String, Value>)>>> = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| {
            let line_no = index + 1;
            if line.trim().is_empty() {
                return None;
            }
            Some(match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(object)) => Ok((line_no, object)),
                Ok(_) => Err(Error::NotAnObject {
                    path: path.to_path_buf(),
                    line: line_no,
                }),
                Err(source) => Err(Error::Json {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                }),
            })
        })
        .collect();

    parsed.into_iter().flatten().collect()
}

/// Truncate the file and write one JSON document per line
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let writer = BufWriter::new(file);

    if is_gzip(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        write_lines(&mut encoder, records, path)?;
        let mut inner = encoder.finish().map_err(|e| Error::io(path, e))?;
        inner.flush().map_err(|e| Error::io(path, e))?;
    } else {
        let mut writer = writer;
        write_lines(&mut writer, records, path)?;
        writer.flush().map_err(|e| Error::io(path, e))?;
    }

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn write_lines<W: Write, T: Serialize>(writer: &mut W, records: &[T], path: &Path) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n").map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_gzip_by_extension() {
        assert!(is_gzip(Path::new("status.jsonl.gz")));
        assert!(is_gzip(Path::new("STATUS.GZ")));
        assert!(!is_gzip(Path::new("status.jsonl")));
        assert!(!is_gzip(Path::new("gz")));
    }

    #[test]
    fn gzip_files_read_back_as_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl.gz");
        let records = vec![json!({"id": 1}), json!({"id": "two"})];

        write_records(&path, &records).unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        assert_eq!(
            read_lines(&path).unwrap(),
            vec![r#"{"id":1}"#.to_string(), r#"{"id":"two"}"#.to_string()]
        );
    }

    #[test]
    fn rewriting_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        write_records(&path, &[json!({"id": 1}), json!({"id": 2})]).unwrap();
        write_records(&path, &[json!({"id": 3})]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"id\":3}\n");
    }

    #[test]
    fn reports_the_first_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.jsonl");
        std::fs::write(&path, "{\"id\": 1}\n\n[1, 2]\n{oops\n").unwrap();

        match read_objects(&path).unwrap_err() {
            Error::NotAnObject { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.jsonl");
        std::fs::write(&path, "{\"id\": 1}\n   \n{\"id\": 2}\n").unwrap();

        let objects = read_objects(&path).unwrap();
        let lines: Vec<usize> = objects.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_lines(Path::new("/definitely/not/here.jsonl")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
