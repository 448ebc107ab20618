//! Training orchestration.
//!
//! The trainer reads the requested sample range, builds the feature set once
//! over the whole range, trains contiguous shards in parallel on a bounded
//! thread pool, merges the partial classifiers additively, and persists the
//! merged artifact. Any shard failure aborts the run before anything is
//! written, so a failed run never leaves a partial model behind.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::SentimentAnalyzer;
use crate::classifier::{ClassifierKind, NaiveBayes};
use crate::corpus::{Sample, SampleStore};
use crate::error::{Result, SyntError};
use crate::features::{self, ExtractorKind};
use crate::model::{ModelArtifact, ModelMetadata, ModelStore};

/// Default number of parallel training workers.
pub const DEFAULT_PROCESSES: usize = 4;

/// Configuration for one training run.
#[derive(Clone, Debug)]
pub struct TrainConfig {
    /// Name of the training database.
    pub db: String,
    /// Number of samples to train on, read from offset 0.
    pub samples: usize,
    /// Classifier algorithm.
    pub classifier: ClassifierKind,
    /// Feature extraction strategy.
    pub extractor: ExtractorKind,
    /// Number of best features (`bestwords` only).
    pub best_features: usize,
    /// Number of parallel workers.
    pub processes: usize,
    /// Purge any existing model for `(db, store_index)` before training.
    pub purge: bool,
    /// Store index namespace to persist under.
    pub store_index: u32,
}

impl TrainConfig {
    /// Create a config with defaults matching the CLI surface.
    pub fn new<S: Into<String>>(db: S, samples: usize) -> Self {
        TrainConfig {
            db: db.into(),
            samples,
            classifier: ClassifierKind::NaiveBayes,
            extractor: ExtractorKind::Stopwords,
            best_features: 0,
            processes: DEFAULT_PROCESSES,
            purge: false,
            store_index: 0,
        }
    }

    /// Validate the configuration before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.db.is_empty() {
            return Err(SyntError::config("database name must not be empty"));
        }
        if self.samples == 0 {
            return Err(SyntError::config("sample count must be greater than zero"));
        }
        if self.processes == 0 {
            return Err(SyntError::config("process count must be greater than zero"));
        }
        features::validate_params(self.extractor, self.best_features)
    }
}

/// Summary of a completed training run.
#[derive(Clone, Debug)]
pub struct TrainReport {
    /// Name of the training database.
    pub db: String,
    /// Number of samples trained on.
    pub trained_samples: usize,
    /// Size of the feature set.
    pub feature_count: usize,
    /// Number of shards actually trained.
    pub shards: usize,
    /// Wall-clock training time.
    pub elapsed: Duration,
}

/// Orchestrates training runs over a sample store and a model store.
pub struct Trainer {
    sample_store: Arc<dyn SampleStore>,
    model_store: Arc<dyn ModelStore>,
    analyzer: SentimentAnalyzer,
}

impl Trainer {
    /// Create a trainer over the given stores.
    pub fn new(sample_store: Arc<dyn SampleStore>, model_store: Arc<dyn ModelStore>) -> Self {
        Trainer {
            sample_store,
            model_store,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    /// Run one training pass and persist the merged model.
    pub fn train(&self, config: &TrainConfig) -> Result<TrainReport> {
        config.validate()?;
        let start = Instant::now();

        if config.purge {
            info!(
                "purging model for db '{}' at store index {}",
                config.db, config.store_index
            );
            self.model_store.purge(&config.db, config.store_index)?;
        }

        let samples = self.sample_store.read(0, config.samples)?;
        info!(
            "training on {} samples from '{}' with {} extractor",
            samples.len(),
            config.db,
            config.extractor
        );

        // Feature selection must see the whole corpus, not one worker's shard.
        let features = features::extract(
            &samples,
            &self.analyzer,
            config.extractor,
            config.best_features,
        )?;
        debug!("feature set holds {} tokens", features.len());

        let shards = partition(&samples, config.processes);
        let shard_count = shards.len();
        debug!(
            "training {} shards of up to {} samples",
            shard_count,
            shards.first().map_or(0, |s| s.len())
        );

        let classifier = self.train_shards(&shards, &features, config)?;

        let artifact = ModelArtifact {
            metadata: ModelMetadata {
                db: config.db.clone(),
                store_index: config.store_index,
                classifier: config.classifier,
                extractor: config.extractor,
                best_features: config.best_features,
                trained_samples: config.samples,
                trained_at: Utc::now(),
            },
            features,
            classifier,
        };
        let feature_count = artifact.features.len();

        self.model_store
            .save(&config.db, config.store_index, &artifact)?;

        let elapsed = start.elapsed();
        info!(
            "trained '{}' in {:.2}s ({} features, {} shards)",
            config.db,
            elapsed.as_secs_f64(),
            feature_count,
            shard_count
        );

        Ok(TrainReport {
            db: config.db.clone(),
            trained_samples: config.samples,
            feature_count,
            shards: shard_count,
            elapsed,
        })
    }

    /// Train all shards on a bounded pool and merge the partial models.
    fn train_shards(
        &self,
        shards: &[&[Sample]],
        features: &crate::features::FeatureSet,
        config: &TrainConfig,
    ) -> Result<NaiveBayes> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.processes)
            .build()
            .map_err(|e| SyntError::worker(format!("cannot build worker pool: {e}")))?;

        // collect() short-circuits on the first failed shard; nothing is
        // persisted in that case.
        let partials: Vec<NaiveBayes> = pool.install(|| {
            shards
                .par_iter()
                .map(|shard| NaiveBayes::train_shard(shard, features, &self.analyzer))
                .collect::<Result<Vec<_>>>()
        })?;

        // The merge is commutative and associative, so fold order is free.
        let merged = partials
            .into_iter()
            .fold(NaiveBayes::new(), |acc, partial| acc.merge(partial));
        Ok(merged)
    }
}

/// Split samples into `processes` contiguous, near-equal shards.
///
/// Shard size is `ceil(len / processes)`; the last shard takes the remainder.
/// Fewer shards are produced when there are fewer samples than workers.
fn partition(samples: &[Sample], processes: usize) -> Vec<&[Sample]> {
    debug_assert!(processes > 0);
    if samples.is_empty() {
        return Vec::new();
    }
    let shard_size = samples.len().div_ceil(processes);
    samples.chunks(shard_size).collect()
}
