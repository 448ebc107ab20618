//! JSONL-backed sample store.
//!
//! The sample table is a JSON Lines file, one sample per line:
//! ```jsonl
//! {"text": "this movie rocked", "label": "positive"}
//! {"text": "what a waste of time", "label": "negative"}
//! ```
//!
//! Line number (0-based) is the sample offset. The file is append-only by
//! convention; this store only reads it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::corpus::{Sample, SampleStore};
use crate::error::{Result, SyntError};

/// A sample store reading a JSONL file sequentially.
#[derive(Clone, Debug)]
pub struct JsonlSampleStore {
    path: PathBuf,
}

impl JsonlSampleStore {
    /// Open a store over the given JSONL file.
    ///
    /// Fails eagerly if the file does not exist, so a missing sample table
    /// surfaces before any training work starts.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(SyntError::storage(format!(
                "sample table not found: {}",
                path.display()
            )));
        }
        Ok(JsonlSampleStore { path })
    }

    /// The path of the underlying JSONL file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.path).map_err(|e| {
            SyntError::storage(format!("cannot open sample table {}: {e}", self.path.display()))
        })?;
        Ok(BufReader::new(file))
    }

    fn parse_line(&self, line: &str, line_num: usize) -> Result<Sample> {
        serde_json::from_str(line).map_err(|e| {
            SyntError::serialization(format!(
                "invalid sample on line {} of {}: {e}",
                line_num + 1,
                self.path.display()
            ))
        })
    }
}

impl SampleStore for JsonlSampleStore {
    fn read(&self, offset: usize, count: usize) -> Result<Vec<Sample>> {
        let reader = self.reader()?;
        let mut samples = Vec::with_capacity(count);
        // Offsets address samples, so blank lines do not advance the index.
        let mut sample_index = 0usize;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let index = sample_index;
            sample_index += 1;
            if index < offset {
                continue;
            }
            if samples.len() == count {
                break;
            }
            samples.push(self.parse_line(&line, line_num)?);
        }

        if samples.len() < count {
            return Err(SyntError::storage(format!(
                "requested {count} samples at offset {offset} but {} ran out after {}",
                self.path.display(),
                samples.len()
            )));
        }

        Ok(samples)
    }

    fn len(&self) -> Result<usize> {
        let reader = self.reader()?;
        let mut n = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                n += 1;
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Label;
    use std::io::Write;

    fn write_table(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_offset_and_count() {
        let file = write_table(&[
            r#"{"text": "loved it", "label": "positive"}"#,
            r#"{"text": "hated it", "label": "negative"}"#,
            r#"{"text": "best ever", "label": "positive"}"#,
        ]);
        let store = JsonlSampleStore::open(file.path()).unwrap();

        let samples = store.read(1, 2).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].text, "hated it");
        assert_eq!(samples[0].label, Label::Negative);
        assert_eq!(samples[1].text, "best ever");
    }

    #[test]
    fn test_short_read_is_an_error() {
        let file = write_table(&[r#"{"text": "loved it", "label": "positive"}"#]);
        let store = JsonlSampleStore::open(file.path()).unwrap();

        assert!(store.read(0, 2).is_err());
        assert!(store.read(1, 1).is_err());
    }

    #[test]
    fn test_missing_file_fails_eagerly() {
        assert!(JsonlSampleStore::open("/nonexistent/samples.jsonl").is_err());
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let file = write_table(&[
            r#"{"text": "fine", "label": "positive"}"#,
            r#"{"text": "broken"#,
        ]);
        let store = JsonlSampleStore::open(file.path()).unwrap();

        let err = store.read(0, 2).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_len_skips_blank_lines() {
        let file = write_table(&[
            r#"{"text": "fine", "label": "positive"}"#,
            "",
            r#"{"text": "bad", "label": "negative"}"#,
        ]);
        let store = JsonlSampleStore::open(file.path()).unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }
}
