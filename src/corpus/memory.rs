//! In-memory sample store for tests and synthetic corpora.

use crate::corpus::{Sample, SampleStore};
use crate::error::{Result, SyntError};

/// A sample store backed by an in-memory vector.
#[derive(Clone, Debug, Default)]
pub struct MemorySampleStore {
    samples: Vec<Sample>,
}

impl MemorySampleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemorySampleStore {
            samples: Vec::new(),
        }
    }

    /// Create a store holding the given samples.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        MemorySampleStore { samples }
    }

    /// Append a sample to the table.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }
}

impl SampleStore for MemorySampleStore {
    fn read(&self, offset: usize, count: usize) -> Result<Vec<Sample>> {
        let end = offset.checked_add(count).ok_or_else(|| {
            SyntError::storage(format!("sample range overflow: offset {offset} + {count}"))
        })?;

        if end > self.samples.len() {
            return Err(SyntError::storage(format!(
                "requested {count} samples at offset {offset} but the table holds only {}",
                self.samples.len()
            )));
        }

        Ok(self.samples[offset..end].to_vec())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Label;

    fn store_with(n: usize) -> MemorySampleStore {
        let samples = (0..n)
            .map(|i| {
                let label = if i % 2 == 0 {
                    Label::Positive
                } else {
                    Label::Negative
                };
                Sample::new(format!("sample number {i}"), label)
            })
            .collect();
        MemorySampleStore::from_samples(samples)
    }

    #[test]
    fn test_read_exact_range() {
        let store = store_with(10);
        let samples = store.read(2, 3).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].text, "sample number 2");
        assert_eq!(samples[2].text, "sample number 4");
    }

    #[test]
    fn test_short_read_is_an_error() {
        let store = store_with(5);
        assert!(store.read(0, 6).is_err());
        assert!(store.read(4, 2).is_err());
        assert!(store.read(4, 1).is_ok());
    }

    #[test]
    fn test_len() {
        assert_eq!(store_with(7).len().unwrap(), 7);
        assert!(MemorySampleStore::new().is_empty().unwrap());
    }
}
