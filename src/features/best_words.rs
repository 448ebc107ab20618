//! Chi-square selection of the most discriminative tokens.
//!
//! Each token is scored with Pearson's chi-square statistic over the 2x2
//! contingency table of (token present / absent) x (positive / negative
//! document). For a token `t`:
//!
//! ```text
//!                 positive      negative
//! t present        n_pp           n_pn
//! t absent         n_ap           n_an
//! ```
//!
//! score(t) = N * (n_pp * n_an - n_pn * n_ap)^2
//!          / ((n_pp + n_pn) * (n_pp + n_ap) * (n_pn + n_an) * (n_ap + n_an))
//!
//! where N is the total document count. Presence is binary per document, so
//! a token repeated within one sample counts once. Higher scores mean the
//! token's presence correlates more strongly with one of the labels.

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::debug;

use crate::analysis::SentimentAnalyzer;
use crate::corpus::{Label, Sample};
use crate::error::Result;

/// Per-token document-frequency counts, one slot per label.
#[derive(Clone, Copy, Debug, Default)]
struct DocFreq {
    positive: u64,
    negative: u64,
}

impl DocFreq {
    fn bump(&mut self, label: Label) {
        match label {
            Label::Positive => self.positive += 1,
            Label::Negative => self.negative += 1,
        }
    }

    fn total(&self) -> u64 {
        self.positive + self.negative
    }
}

/// Select the top `count` tokens by chi-square score.
///
/// Returns the selected tokens with their scores. Ties are broken by
/// ascending token order so selection is deterministic. Fewer than `count`
/// tokens are returned only when the corpus has fewer distinct tokens.
pub fn select(
    samples: &[Sample],
    analyzer: &SentimentAnalyzer,
    count: usize,
) -> Result<BTreeMap<String, f64>> {
    let mut doc_freqs: AHashMap<String, DocFreq> = AHashMap::new();
    let mut positive_docs = 0u64;
    let mut negative_docs = 0u64;

    for sample in samples {
        match sample.label {
            Label::Positive => positive_docs += 1,
            Label::Negative => negative_docs += 1,
        }
        for token in analyzer.distinct_tokens(&sample.text)? {
            doc_freqs.entry(token).or_default().bump(sample.label);
        }
    }

    let total_docs = positive_docs + negative_docs;
    let mut scored: Vec<(String, f64)> = doc_freqs
        .into_iter()
        .map(|(token, freq)| {
            let score = chi_square(
                freq.positive,
                freq.negative,
                positive_docs - freq.positive,
                negative_docs - freq.negative,
                total_docs,
            );
            debug_assert!(freq.total() <= total_docs);
            (token, score)
        })
        .collect();

    // Highest score first; equal scores fall back to token order.
    scored.sort_by(|(ta, sa), (tb, sb)| sb.total_cmp(sa).then_with(|| ta.cmp(tb)));
    scored.truncate(count);

    debug!(
        "selected {} of {} candidate tokens over {} documents",
        scored.len(),
        total_docs,
        samples.len()
    );

    Ok(scored.into_iter().collect())
}

fn chi_square(n_pp: u64, n_pn: u64, n_ap: u64, n_an: u64, total: u64) -> f64 {
    let row_present = n_pp + n_pn;
    let row_absent = n_ap + n_an;
    let col_positive = n_pp + n_ap;
    let col_negative = n_pn + n_an;

    let denominator = row_present as f64
        * row_absent as f64
        * col_positive as f64
        * col_negative as f64;
    if denominator == 0.0 {
        return 0.0;
    }

    let diff = n_pp as f64 * n_an as f64 - n_pn as f64 * n_ap as f64;
    total as f64 * diff * diff / denominator
}
