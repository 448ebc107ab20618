//! Classifier implementations.

pub mod naive_bayes;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyntError};

pub use naive_bayes::{LabelDistribution, NaiveBayes};

/// The classifier algorithm to train.
///
/// A closed enum: unknown names are rejected when configuration is parsed,
/// before any training work begins.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Bernoulli (presence) Naive Bayes.
    #[value(name = "naivebayes")]
    NaiveBayes,
}

impl ClassifierKind {
    /// The canonical lowercase name of this classifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::NaiveBayes => "naivebayes",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierKind {
    type Err = SyntError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "naivebayes" => Ok(ClassifierKind::NaiveBayes),
            other => Err(SyntError::config(format!("unknown classifier: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_kind_parsing() {
        assert_eq!(
            "naivebayes".parse::<ClassifierKind>().unwrap(),
            ClassifierKind::NaiveBayes
        );
        assert!("svm".parse::<ClassifierKind>().is_err());
    }
}
