//! Classifier accuracy evaluation over held-out samples.
//!
//! The evaluator carves a held-out range out of the sample table and scores
//! it two independent ways:
//!
//! - the **library path** uses the classifier's own decision procedure
//!   ([`NaiveBayes::classify`](crate::classifier::NaiveBayes::classify));
//! - the **manual path** recomputes the posterior from the same trained
//!   parameters and applies a `neutral_range` band around the decision
//!   boundary, reporting "neutral" inside the band instead of forcing a
//!   positive/negative call.
//!
//! The manual path is stricter near the boundary, so a gap between the two
//! accuracies is an expected diagnostic signal, not an error. By default the
//! held-out range starts exactly at the training sample count, so it can
//! never overlap the training data.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::analysis::SentimentAnalyzer;
use crate::corpus::{Label, SampleStore};
use crate::error::{Result, SyntError};
use crate::model::{ModelArtifact, ModelStore};

/// Fraction of the training sample count used as the default test size.
const DEFAULT_TEST_FRACTION: usize = 4;

/// Outcome of the manual scoring path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sentiment {
    /// Clearly positive (margin above the neutral band).
    Positive,
    /// Clearly negative (margin below the neutral band).
    Negative,
    /// Inside the neutral band; never matches a gold label.
    Neutral,
}

impl Sentiment {
    /// Whether this outcome matches a gold label.
    pub fn matches(&self, label: Label) -> bool {
        matches!(
            (self, label),
            (Sentiment::Positive, Label::Positive) | (Sentiment::Negative, Label::Negative)
        )
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Configuration for one evaluation run.
#[derive(Clone, Copy, Debug)]
pub struct EvalConfig {
    /// Number of held-out samples to score. 0 means 25% of the sample count
    /// the model was trained on.
    pub test_samples: usize,
    /// Probability-margin band around the decision boundary within which the
    /// manual path reports neutral. Must lie in [0, 1].
    pub neutral_range: f64,
    /// Offset of the first held-out sample. 0 means the training sample
    /// count, which guarantees no overlap with the training range; an
    /// explicit offset overrides this and keeping it disjoint is the
    /// caller's responsibility.
    pub offset: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            test_samples: 0,
            neutral_range: 0.0,
            offset: 0,
        }
    }
}

/// Accuracy results for one evaluation run. Ephemeral; never persisted.
#[derive(Clone, Copy, Debug)]
pub struct AccuracyReport {
    /// Accuracy of the classifier's native decision procedure, in [0, 1].
    pub library_accuracy: f64,
    /// Accuracy of the manual posterior computation, in [0, 1].
    pub manual_accuracy: f64,
    /// Number of held-out samples scored.
    pub test_sample_count: usize,
    /// Offset of the first held-out sample actually used.
    pub offset: usize,
    /// The neutral band applied on the manual path.
    pub neutral_range: f64,
}

/// Evaluates a trained model against held-out samples.
pub struct AccuracyEvaluator {
    sample_store: Arc<dyn SampleStore>,
    analyzer: SentimentAnalyzer,
}

impl AccuracyEvaluator {
    /// Create an evaluator reading held-out samples from the given store.
    pub fn new(sample_store: Arc<dyn SampleStore>) -> Self {
        AccuracyEvaluator {
            sample_store,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// Evaluate a model artifact.
    pub fn evaluate(&self, artifact: &ModelArtifact, config: &EvalConfig) -> Result<AccuracyReport> {
        if !(0.0..=1.0).contains(&config.neutral_range) {
            return Err(SyntError::config(format!(
                "neutral_range must lie in [0, 1], got {}",
                config.neutral_range
            )));
        }

        let trained = artifact.metadata.trained_samples;
        let test_samples = if config.test_samples == 0 {
            trained / DEFAULT_TEST_FRACTION
        } else {
            config.test_samples
        };
        if test_samples == 0 {
            return Err(SyntError::config(
                "test sample count is zero; the model was trained on too few samples \
                 to derive a default, pass test_samples explicitly",
            ));
        }

        // Held-out samples start right after the training range unless the
        // caller overrides the offset.
        let offset = if config.offset == 0 {
            trained
        } else {
            config.offset
        };

        debug!("scoring held-out range [{offset}, {})", offset + test_samples);
        let samples = self.sample_store.read(offset, test_samples)?;

        let mut library_correct = 0usize;
        let mut manual_correct = 0usize;

        for sample in &samples {
            let features = artifact.features.features_of(&self.analyzer, &sample.text)?;

            let library_label = artifact.classifier.classify(&features)?;
            if library_label == sample.label {
                library_correct += 1;
            }

            let margin = artifact.classifier.posterior(&features)?.margin();
            let manual = if margin > config.neutral_range {
                Sentiment::Positive
            } else if margin < -config.neutral_range {
                Sentiment::Negative
            } else {
                Sentiment::Neutral
            };
            if manual.matches(sample.label) {
                manual_correct += 1;
            }
        }

        let report = AccuracyReport {
            library_accuracy: library_correct as f64 / samples.len() as f64,
            manual_accuracy: manual_correct as f64 / samples.len() as f64,
            test_sample_count: samples.len(),
            offset,
            neutral_range: config.neutral_range,
        };
        info!(
            "accuracy over {} held-out samples: library {:.4}, manual {:.4}",
            report.test_sample_count, report.library_accuracy, report.manual_accuracy
        );
        Ok(report)
    }

    /// Load the model under `(db, store_index)` and evaluate it.
    pub fn evaluate_stored(
        &self,
        model_store: Arc<dyn ModelStore>,
        db: &str,
        store_index: u32,
        config: &EvalConfig,
    ) -> Result<(AccuracyReport, ModelArtifact)> {
        let artifact = model_store.load(db, store_index)?;
        let report = self.evaluate(&artifact, config)?;
        Ok((report, artifact))
    }
}
