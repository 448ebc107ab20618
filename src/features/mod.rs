//! Feature extraction strategies.
//!
//! A [`FeatureSet`] is the vocabulary a classifier is trained over. It is a
//! pure function of the sample range and the extractor parameters: tokens are
//! kept in a `BTreeMap`, scores are computed deterministically, and ties are
//! broken by token order, so re-running extraction on identical inputs yields
//! a byte-identical feature set. The trainer relies on this purity when it
//! shares one feature set across parallel shard workers.

pub mod best_words;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::SentimentAnalyzer;
use crate::analysis::token_filter::DEFAULT_ENGLISH_STOP_WORDS_SET;
use crate::corpus::Sample;
use crate::error::{Result, SyntError};

/// Feature extraction strategy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Every distinct token in the sample texts.
    Words,
    /// Every distinct token minus a fixed English stopword list.
    Stopwords,
    /// The top `best_features` tokens by chi-square score.
    Bestwords,
}

impl ExtractorKind {
    /// The canonical lowercase name of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKind::Words => "words",
            ExtractorKind::Stopwords => "stopwords",
            ExtractorKind::Bestwords => "bestwords",
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractorKind {
    type Err = SyntError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "words" => Ok(ExtractorKind::Words),
            "stopwords" => Ok(ExtractorKind::Stopwords),
            "bestwords" => Ok(ExtractorKind::Bestwords),
            other => Err(SyntError::config(format!("unknown extractor: {other}"))),
        }
    }
}

/// The vocabulary produced by one extractor strategy.
///
/// Tokens map to their discriminative score for `bestwords`, and to 1.0 for
/// the unscored strategies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// The strategy that produced this set.
    pub extractor: ExtractorKind,
    /// The `best_features` parameter used (0 for unscored strategies).
    pub best_features: usize,
    tokens: std::collections::BTreeMap<String, f64>,
}

impl FeatureSet {
    /// Whether the given token is a feature.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    /// Number of feature tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set holds no features.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over `(token, score)` pairs in lexical token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.tokens.iter().map(|(t, s)| (t.as_str(), *s))
    }

    /// Analyze `text` and keep only the tokens that are features.
    ///
    /// This is the feature vector used at guess and evaluation time: always
    /// the recorded vocabulary, never a recomputed one.
    pub fn features_of(&self, analyzer: &SentimentAnalyzer, text: &str) -> Result<BTreeSet<String>> {
        let mut features = analyzer.distinct_tokens(text)?;
        features.retain(|t| self.contains(t));
        Ok(features)
    }
}

/// Validate an extractor/parameter combination without doing any work.
pub fn validate_params(extractor: ExtractorKind, best_features: usize) -> Result<()> {
    match extractor {
        ExtractorKind::Words | ExtractorKind::Stopwords => {
            if best_features > 0 {
                return Err(SyntError::config(format!(
                    "best_features has no meaning for the {extractor} extractor"
                )));
            }
        }
        ExtractorKind::Bestwords => {
            if best_features == 0 {
                return Err(SyntError::config(
                    "the bestwords extractor requires best_features > 0",
                ));
            }
        }
    }
    Ok(())
}

/// Extract a feature set from the given samples.
///
/// Pure: no side effects, deterministic for fixed inputs and parameters.
pub fn extract(
    samples: &[Sample],
    analyzer: &SentimentAnalyzer,
    extractor: ExtractorKind,
    best_features: usize,
) -> Result<FeatureSet> {
    validate_params(extractor, best_features)?;

    let tokens = match extractor {
        ExtractorKind::Words => all_words(samples, analyzer, false)?,
        ExtractorKind::Stopwords => all_words(samples, analyzer, true)?,
        ExtractorKind::Bestwords => best_words::select(samples, analyzer, best_features)?,
    };

    Ok(FeatureSet {
        extractor,
        best_features,
        tokens,
    })
}

fn all_words(
    samples: &[Sample],
    analyzer: &SentimentAnalyzer,
    filter_stop_words: bool,
) -> Result<std::collections::BTreeMap<String, f64>> {
    let mut tokens = std::collections::BTreeMap::new();
    for sample in samples {
        for token in analyzer.tokens(&sample.text)? {
            if filter_stop_words && DEFAULT_ENGLISH_STOP_WORDS_SET.contains(&token) {
                continue;
            }
            tokens.entry(token).or_insert(1.0);
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Label;

    fn corpus() -> Vec<Sample> {
        vec![
            Sample::new("the movie was great", Label::Positive),
            Sample::new("great acting and a great plot", Label::Positive),
            Sample::new("the movie was awful", Label::Negative),
            Sample::new("awful plot and bad acting", Label::Negative),
        ]
    }

    #[test]
    fn test_words_keeps_everything() {
        let analyzer = SentimentAnalyzer::new();
        let set = extract(&corpus(), &analyzer, ExtractorKind::Words, 0).unwrap();

        assert!(set.contains("the"));
        assert!(set.contains("great"));
        assert!(set.contains("awful"));
    }

    #[test]
    fn test_stopwords_filters() {
        let analyzer = SentimentAnalyzer::new();
        let set = extract(&corpus(), &analyzer, ExtractorKind::Stopwords, 0).unwrap();

        assert!(!set.contains("the"));
        assert!(!set.contains("and"));
        assert!(set.contains("great"));
        assert!(set.contains("awful"));
    }

    #[test]
    fn test_stopwords_rejects_best_features() {
        let analyzer = SentimentAnalyzer::new();
        let err = extract(&corpus(), &analyzer, ExtractorKind::Stopwords, 10).unwrap_err();
        assert!(matches!(err, SyntError::Config(_)));
    }

    #[test]
    fn test_bestwords_requires_count() {
        let analyzer = SentimentAnalyzer::new();
        let err = extract(&corpus(), &analyzer, ExtractorKind::Bestwords, 0).unwrap_err();
        assert!(matches!(err, SyntError::Config(_)));
    }

    #[test]
    fn test_bestwords_cardinality() {
        let analyzer = SentimentAnalyzer::new();
        let set = extract(&corpus(), &analyzer, ExtractorKind::Bestwords, 2).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let analyzer = SentimentAnalyzer::new();
        let a = extract(&corpus(), &analyzer, ExtractorKind::Bestwords, 3).unwrap();
        let b = extract(&corpus(), &analyzer, ExtractorKind::Bestwords, 3).unwrap();

        assert_eq!(a, b);
        let bytes_a = bincode::serialize(&a).unwrap();
        let bytes_b = bincode::serialize(&b).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn test_features_of_uses_recorded_vocabulary() {
        let analyzer = SentimentAnalyzer::new();
        let set = extract(&corpus(), &analyzer, ExtractorKind::Stopwords, 0).unwrap();

        let features = set
            .features_of(&analyzer, "a great but unseen blockbuster")
            .unwrap();
        assert!(features.contains("great"));
        // Tokens outside the training vocabulary are dropped.
        assert!(!features.contains("unseen"));
        assert!(!features.contains("blockbuster"));
    }

    #[test]
    fn test_extractor_kind_parsing() {
        assert_eq!(
            "bestwords".parse::<ExtractorKind>().unwrap(),
            ExtractorKind::Bestwords
        );
        assert!("tfidf".parse::<ExtractorKind>().is_err());
    }
}
