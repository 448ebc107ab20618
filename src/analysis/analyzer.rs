//! Analyzer pipeline combining a tokenizer with token filters.
//!
//! [`SentimentAnalyzer`] is the single tokenization used at training time,
//! guess time and evaluation time. Feature sets record tokens produced by
//! this pipeline, so the analyzer must stay deterministic.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::{Filter, LowercaseFilter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// The analysis pipeline used for all sentiment text.
///
/// Splits on Unicode word boundaries and lowercases every token. Stop word
/// removal is a feature-extraction decision, not an analysis one, so it is
/// applied by the `stopwords` extractor rather than here.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SentimentAnalyzer {
    /// Create the default analyzer: Unicode word tokenizer + lowercase filter.
    pub fn new() -> Self {
        SentimentAnalyzer {
            tokenizer: Arc::new(UnicodeWordTokenizer::new()),
            filters: vec![Arc::new(LowercaseFilter::new())],
        }
    }

    /// Run the full pipeline on the given text.
    pub fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut stream = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            stream = filter.filter(stream)?;
        }
        Ok(stream)
    }

    /// Analyze text into a vector of token strings, in document order.
    pub fn tokens(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|t: Token| t.text).collect())
    }

    /// Analyze text into the set of distinct tokens, in lexical order.
    pub fn distinct_tokens(&self, text: &str) -> Result<BTreeSet<String>> {
        Ok(self.analyze(text)?.map(|t: Token| t.text).collect())
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
