//! Trained model artifacts and the keyed model store.
//!
//! A [`ModelArtifact`] bundles the classifier parameters with the exact
//! [`FeatureSet`](crate::features::FeatureSet) they were trained over, plus
//! metadata describing how training was configured. Artifacts live in a
//! [`ModelStore`] keyed by `(database name, store index)`; the classifier and
//! extractor kinds are carried in the metadata so consumers can detect a
//! mismatched load.

pub mod file;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifierKind, NaiveBayes};
use crate::error::Result;
use crate::features::{ExtractorKind, FeatureSet};

pub use file::FileModelStore;
pub use memory::MemoryModelStore;

/// How a persisted model was trained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Name of the training database.
    pub db: String,
    /// Store index namespace the model was saved under.
    pub store_index: u32,
    /// Classifier algorithm.
    pub classifier: ClassifierKind,
    /// Feature extraction strategy.
    pub extractor: ExtractorKind,
    /// `best_features` parameter (0 for unscored extractors).
    pub best_features: usize,
    /// Number of samples the model was trained on. The accuracy evaluator
    /// derives its default held-out range from this.
    pub trained_samples: usize,
    /// When training finished.
    pub trained_at: DateTime<Utc>,
}

/// A trained classifier plus the feature set used to build it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Training configuration and provenance.
    pub metadata: ModelMetadata,
    /// The recorded vocabulary; consumers never recompute it.
    pub features: FeatureSet,
    /// The merged classifier parameters.
    pub classifier: NaiveBayes,
}

/// A keyed persistent store for trained model artifacts.
///
/// Writes are last-writer-wins and atomic per key: a reader concurrent with a
/// purge-then-train never observes a half-deleted or half-written artifact.
pub trait ModelStore: Send + Sync {
    /// Persist an artifact under `(db, store_index)`, replacing any previous
    /// artifact atomically.
    fn save(&self, db: &str, store_index: u32, artifact: &ModelArtifact) -> Result<()>;

    /// Load the artifact stored under `(db, store_index)`.
    fn load(&self, db: &str, store_index: u32) -> Result<ModelArtifact>;

    /// Whether an artifact exists under `(db, store_index)`.
    fn exists(&self, db: &str, store_index: u32) -> bool;

    /// Remove the artifact under `(db, store_index)` entirely. Removing a
    /// nonexistent entry is not an error.
    fn purge(&self, db: &str, store_index: u32) -> Result<()>;
}

/// Canonical store entry name for a `(db, store_index)` pair.
pub(crate) fn entry_name(db: &str, store_index: u32) -> String {
    format!("{db}.{store_index}.model")
}

/// Serialize an artifact for storage.
pub(crate) fn encode(artifact: &ModelArtifact) -> Result<Vec<u8>> {
    bincode::serialize(artifact)
        .map_err(|e| crate::error::SyntError::serialization(format!("encode model: {e}")))
}

/// Deserialize an artifact from storage.
pub(crate) fn decode(bytes: &[u8]) -> Result<ModelArtifact> {
    bincode::deserialize(bytes)
        .map_err(|e| crate::error::SyntError::serialization(format!("decode model: {e}")))
}
