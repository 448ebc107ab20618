//! Bernoulli Naive Bayes over feature presence.
//!
//! The model keeps, per label, the number of training documents and how many
//! of them contained each feature token. Conditional probabilities are
//! Laplace smoothed:
//!
//! ```text
//! P(t | L) = (docs_with(t, L) + 1) / (docs(L) + 2)
//! ```
//!
//! with prior `P(L) = docs(L) / docs`. Classification considers only the
//! feature tokens that actually occur in the input text; absent vocabulary
//! does not contribute. All tables are additive counts, so merging two
//! shard-trained models is plain addition: commutative, associative, and
//! independent of worker scheduling order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::analysis::SentimentAnalyzer;
use crate::corpus::{Label, Sample};
use crate::error::{Result, SyntError};
use crate::features::FeatureSet;

/// Per-label training counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct LabelStats {
    /// Number of training documents with this label.
    docs: u64,
    /// Per-token count of documents (with this label) containing the token.
    token_docs: BTreeMap<String, u64>,
}

impl LabelStats {
    fn absorb(&mut self, other: LabelStats) {
        self.docs += other.docs;
        for (token, count) in other.token_docs {
            *self.token_docs.entry(token).or_insert(0) += count;
        }
    }

    /// Laplace-smoothed P(token present | label).
    fn token_prob(&self, token: &str) -> f64 {
        let count = self.token_docs.get(token).copied().unwrap_or(0);
        (count as f64 + 1.0) / (self.docs as f64 + 2.0)
    }
}

/// Normalized posterior probabilities over the two labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelDistribution {
    /// P(positive | text)
    pub positive: f64,
    /// P(negative | text)
    pub negative: f64,
}

impl LabelDistribution {
    /// The probability of the given label.
    pub fn prob(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
        }
    }

    /// The label with the highest posterior. Ties go to positive.
    pub fn max_label(&self) -> Label {
        if self.positive >= self.negative {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    /// Signed probability margin `P(positive) - P(negative)` in [-1, 1].
    pub fn margin(&self) -> f64 {
        self.positive - self.negative
    }
}

/// A Bernoulli Naive Bayes sentiment classifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaiveBayes {
    positive: LabelStats,
    negative: LabelStats,
}

impl NaiveBayes {
    /// Create an empty, untrained model.
    pub fn new() -> Self {
        NaiveBayes::default()
    }

    /// Train a partial model on one contiguous shard of samples.
    ///
    /// The shared `features` vocabulary must have been built over the whole
    /// training range; this function only counts within its shard.
    pub fn train_shard(
        samples: &[Sample],
        features: &FeatureSet,
        analyzer: &SentimentAnalyzer,
    ) -> Result<NaiveBayes> {
        let mut model = NaiveBayes::new();
        for sample in samples {
            let present = features.features_of(analyzer, &sample.text)?;
            let stats = model.stats_mut(sample.label);
            stats.docs += 1;
            for token in present {
                *stats.token_docs.entry(token).or_insert(0) += 1;
            }
        }
        Ok(model)
    }

    /// Merge another partial model into this one.
    ///
    /// Addition on every count table, so `a.merge(b) == b.merge(a)` and
    /// grouping does not matter.
    pub fn merge(mut self, other: NaiveBayes) -> NaiveBayes {
        self.positive.absorb(other.positive);
        self.negative.absorb(other.negative);
        self
    }

    /// Total number of training documents seen.
    pub fn trained_docs(&self) -> u64 {
        self.positive.docs + self.negative.docs
    }

    /// Classify a pre-extracted feature vector (arg-max of the posterior).
    pub fn classify(&self, features: &BTreeSet<String>) -> Result<Label> {
        Ok(self.posterior(features)?.max_label())
    }

    /// Compute the normalized posterior distribution for a feature vector.
    pub fn posterior(&self, features: &BTreeSet<String>) -> Result<LabelDistribution> {
        let total = self.trained_docs();
        if total == 0 {
            return Err(SyntError::invalid_operation(
                "cannot classify with an untrained model",
            ));
        }

        let log_positive = self.log_joint(Label::Positive, features, total);
        let log_negative = self.log_joint(Label::Negative, features, total);

        // Normalize in log space to avoid underflow on long inputs.
        let positive = 1.0 / (1.0 + (log_negative - log_positive).exp());
        Ok(LabelDistribution {
            positive,
            negative: 1.0 - positive,
        })
    }

    /// The most discriminative tokens the model has seen.
    ///
    /// Tokens are ranked by the ratio between their per-label smoothed
    /// conditional probabilities; ties break by token order.
    pub fn most_informative_features(&self, n: usize) -> Vec<(String, f64)> {
        let tokens: BTreeSet<&String> = self
            .positive
            .token_docs
            .keys()
            .chain(self.negative.token_docs.keys())
            .collect();

        let mut ranked: Vec<(String, f64)> = tokens
            .into_iter()
            .map(|token| {
                let p = self.positive.token_prob(token);
                let q = self.negative.token_prob(token);
                let ratio = if p >= q { p / q } else { q / p };
                (token.clone(), ratio)
            })
            .collect();

        ranked.sort_by(|(ta, sa), (tb, sb)| sb.total_cmp(sa).then_with(|| ta.cmp(tb)));
        ranked.truncate(n);
        ranked
    }

    fn stats(&self, label: Label) -> &LabelStats {
        match label {
            Label::Positive => &self.positive,
            Label::Negative => &self.negative,
        }
    }

    fn stats_mut(&mut self, label: Label) -> &mut LabelStats {
        match label {
            Label::Positive => &mut self.positive,
            Label::Negative => &mut self.negative,
        }
    }

    fn log_joint(&self, label: Label, features: &BTreeSet<String>, total: u64) -> f64 {
        let stats = self.stats(label);
        // Smoothed prior keeps an absent label finite rather than -inf.
        let prior = (stats.docs as f64 + 1.0) / (total as f64 + 2.0);
        let mut log_prob = prior.ln();
        for token in features {
            log_prob += stats.token_prob(token).ln();
        }
        log_prob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{extract, ExtractorKind};

    fn trained() -> (NaiveBayes, FeatureSet, SentimentAnalyzer) {
        let analyzer = SentimentAnalyzer::new();
        let samples = vec![
            Sample::new("great wonderful film", Label::Positive),
            Sample::new("wonderful acting great fun", Label::Positive),
            Sample::new("terrible boring film", Label::Negative),
            Sample::new("boring and terrible acting", Label::Negative),
        ];
        let features = extract(&samples, &analyzer, ExtractorKind::Words, 0).unwrap();
        let model = NaiveBayes::train_shard(&samples, &features, &analyzer).unwrap();
        (model, features, analyzer)
    }

    #[test]
    fn test_classify_learns_polarity() {
        let (model, features, analyzer) = trained();

        let positive = features
            .features_of(&analyzer, "a great and wonderful time")
            .unwrap();
        assert_eq!(model.classify(&positive).unwrap(), Label::Positive);

        let negative = features
            .features_of(&analyzer, "terrible boring mess")
            .unwrap();
        assert_eq!(model.classify(&negative).unwrap(), Label::Negative);
    }

    #[test]
    fn test_posterior_is_normalized() {
        let (model, features, analyzer) = trained();
        let vector = features.features_of(&analyzer, "great film").unwrap();
        let dist = model.posterior(&vector).unwrap();

        assert!((dist.positive + dist.negative - 1.0).abs() < 1e-12);
        assert!(dist.positive > 0.5);
        assert!(dist.margin() > 0.0);
    }

    #[test]
    fn test_untrained_model_rejects_classification() {
        let model = NaiveBayes::new();
        let err = model.classify(&BTreeSet::new()).unwrap_err();
        assert!(matches!(err, SyntError::InvalidOperation(_)));
    }

    #[test]
    fn test_merge_is_commutative() {
        let analyzer = SentimentAnalyzer::new();
        let a_samples = vec![Sample::new("great film", Label::Positive)];
        let b_samples = vec![Sample::new("terrible film", Label::Negative)];
        let all: Vec<Sample> = a_samples.iter().chain(&b_samples).cloned().collect();
        let features = extract(&all, &analyzer, ExtractorKind::Words, 0).unwrap();

        let a = NaiveBayes::train_shard(&a_samples, &features, &analyzer).unwrap();
        let b = NaiveBayes::train_shard(&b_samples, &features, &analyzer).unwrap();

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_merge_equals_single_shard() {
        let analyzer = SentimentAnalyzer::new();
        let samples = vec![
            Sample::new("great wonderful film", Label::Positive),
            Sample::new("boring terrible film", Label::Negative),
            Sample::new("great fun", Label::Positive),
            Sample::new("what a bore", Label::Negative),
        ];
        let features = extract(&samples, &analyzer, ExtractorKind::Words, 0).unwrap();

        let whole = NaiveBayes::train_shard(&samples, &features, &analyzer).unwrap();
        let merged = NaiveBayes::train_shard(&samples[..2], &features, &analyzer)
            .unwrap()
            .merge(NaiveBayes::train_shard(&samples[2..], &features, &analyzer).unwrap());

        assert_eq!(whole, merged);
    }

    #[test]
    fn test_most_informative_features() {
        let (model, _, _) = trained();
        let top = model.most_informative_features(2);

        assert_eq!(top.len(), 2);
        // Every ranked token must score at least 1 (a ratio of equals).
        assert!(top.iter().all(|(_, score)| *score >= 1.0));
        let names: Vec<&str> = top.iter().map(|(t, _)| t.as_str()).collect();
        assert!(!names.contains(&"film")); // appears on both sides equally
    }
}
