//! Sentiment guessing against a persisted model.
//!
//! A [`Guesser`] loads one artifact and is immutable afterward: the recorded
//! feature set is applied to every query, text is tokenized exactly as it was
//! at training time, and the loaded state is safe for concurrent read-only
//! use by multiple callers.

use std::sync::Arc;

use log::debug;

use crate::analysis::SentimentAnalyzer;
use crate::corpus::Label;
use crate::error::{Result, SyntError};
use crate::features::ExtractorKind;
use crate::model::{ModelArtifact, ModelStore};

/// Classifies new text using a trained, persisted model.
pub struct Guesser {
    artifact: ModelArtifact,
    analyzer: SentimentAnalyzer,
}

impl Guesser {
    /// Load the model stored under `(db, store_index)`.
    ///
    /// Fails with `NotFound` if no model exists for the reference.
    pub fn load(store: Arc<dyn ModelStore>, db: &str, store_index: u32) -> Result<Self> {
        let artifact = store.load(db, store_index)?;
        debug!(
            "loaded model for '{}' (extractor {}, {} features, {} docs)",
            db,
            artifact.metadata.extractor,
            artifact.features.len(),
            artifact.classifier.trained_docs()
        );
        Ok(Guesser {
            artifact,
            analyzer: SentimentAnalyzer::new(),
        })
    }

    /// Load a model and require that it was trained with `extractor`.
    ///
    /// Using a model with a different extractor than it was trained with is a
    /// contract violation, rejected here rather than silently tolerated.
    pub fn load_expecting(
        store: Arc<dyn ModelStore>,
        db: &str,
        store_index: u32,
        extractor: ExtractorKind,
    ) -> Result<Self> {
        let guesser = Self::load(store, db, store_index)?;
        let trained_with = guesser.artifact.metadata.extractor;
        if trained_with != extractor {
            return Err(SyntError::model_mismatch(format!(
                "model for '{db}' was trained with the {trained_with} extractor, \
                 not {extractor}"
            )));
        }
        Ok(guesser)
    }

    /// Build a guesser directly from an artifact (used by the evaluator).
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Guesser {
            artifact,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// The loaded artifact.
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Guess the sentiment of `text`.
    pub fn guess(&self, text: &str) -> Result<Label> {
        let features = self.artifact.features.features_of(&self.analyzer, text)?;
        self.artifact.classifier.classify(&features)
    }

    /// Guess the sentiment along with the signed probability margin
    /// `P(positive) - P(negative)` in [-1, 1].
    pub fn guess_with_score(&self, text: &str) -> Result<(Label, f64)> {
        let features = self.artifact.features.features_of(&self.analyzer, text)?;
        let dist = self.artifact.classifier.posterior(&features)?;
        Ok((dist.max_label(), dist.margin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{MemorySampleStore, Sample};
    use crate::model::MemoryModelStore;
    use crate::trainer::{TrainConfig, Trainer};

    fn trained_store() -> Arc<MemoryModelStore> {
        let samples = vec![
            Sample::new("great wonderful film", Label::Positive),
            Sample::new("wonderful great fun", Label::Positive),
            Sample::new("terrible boring film", Label::Negative),
            Sample::new("boring terrible mess", Label::Negative),
        ];
        let sample_store = Arc::new(MemorySampleStore::from_samples(samples));
        let model_store = Arc::new(MemoryModelStore::new());
        let trainer = Trainer::new(sample_store, model_store.clone());
        let mut config = TrainConfig::new("samples", 4);
        config.processes = 1;
        trainer.train(&config).unwrap();
        model_store
    }

    #[test]
    fn test_guess_polarity() {
        let store = trained_store();
        let guesser = Guesser::load(store, "samples", 0).unwrap();

        assert_eq!(guesser.guess("what a wonderful film").unwrap(), Label::Positive);
        assert_eq!(guesser.guess("a boring mess").unwrap(), Label::Negative);
    }

    #[test]
    fn test_guess_with_score_sign_matches_label() {
        let store = trained_store();
        let guesser = Guesser::load(store, "samples", 0).unwrap();

        let (label, score) = guesser.guess_with_score("great wonderful fun").unwrap();
        assert_eq!(label, Label::Positive);
        assert!(score > 0.0);
        assert!(score <= 1.0);

        let (label, score) = guesser.guess_with_score("terrible boring").unwrap();
        assert_eq!(label, Label::Negative);
        assert!(score < 0.0);
        assert!(score >= -1.0);
    }

    #[test]
    fn test_load_missing_model_fails() {
        let store = Arc::new(MemoryModelStore::new());
        assert!(matches!(
            Guesser::load(store, "samples", 0),
            Err(SyntError::NotFound(_))
        ));
    }

    #[test]
    fn test_extractor_mismatch_rejected_at_load() {
        let store = trained_store();

        // The fixture trains with the default stopwords extractor.
        assert!(
            Guesser::load_expecting(store.clone(), "samples", 0, ExtractorKind::Stopwords).is_ok()
        );
        assert!(matches!(
            Guesser::load_expecting(store, "samples", 0, ExtractorKind::Bestwords),
            Err(SyntError::ModelMismatch(_))
        ));
    }
}
