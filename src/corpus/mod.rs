//! Labeled sample corpus access.
//!
//! The core never collects samples itself; it reads a persisted, append-only
//! sample table through the [`SampleStore`] trait. A sample's identity is its
//! offset in the table, and the order is stable, which is what makes the
//! held-out range selection in the accuracy evaluator deterministic.

pub mod jsonl;
pub mod memory;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyntError};

pub use jsonl::JsonlSampleStore;
pub use memory::MemorySampleStore;

/// Sentiment label attached to a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Positive sentiment
    Positive,
    /// Negative sentiment
    Negative,
}

impl Label {
    /// All labels, in stable order.
    pub const ALL: [Label; 2] = [Label::Positive, Label::Negative];

    /// The canonical lowercase name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }

    /// The opposite label.
    pub fn opposite(&self) -> Label {
        match self {
            Label::Positive => Label::Negative,
            Label::Negative => Label::Positive,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = SyntError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            other => Err(SyntError::config(format!("unknown label: {other}"))),
        }
    }
}

/// A labeled short-text sample.
///
/// Immutable once collected; the core only ever reads samples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// The raw text of the sample.
    pub text: String,
    /// The gold sentiment label.
    pub label: Label,
}

impl Sample {
    /// Create a new sample.
    pub fn new<S: Into<String>>(text: S, label: Label) -> Self {
        Sample {
            text: text.into(),
            label,
        }
    }
}

/// Read-only sequential access to a persisted sample table.
///
/// Implementations must return samples in stable order: the sample at a given
/// offset never changes, and new samples are only ever appended.
pub trait SampleStore: Send + Sync {
    /// Read exactly `count` samples starting at `offset`.
    ///
    /// A short read is an error: training and evaluation must never silently
    /// proceed on fewer samples than requested.
    fn read(&self, offset: usize, count: usize) -> Result<Vec<Sample>>;

    /// Total number of samples in the table.
    fn len(&self) -> Result<usize>;

    /// Whether the table is empty.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
