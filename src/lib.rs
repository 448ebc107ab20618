//! # synt
//!
//! A sentiment classifier trainer, guesser and accuracy evaluator for
//! labeled short-text samples.
//!
//! ## Features
//!
//! - Pluggable feature extraction: all words, stopword-filtered words, or
//!   the top-N words by chi-square score
//! - Bernoulli Naive Bayes training, partitioned across parallel workers
//!   and merged deterministically
//! - Keyed, atomically-written model store with purge support
//! - Dual accuracy evaluation (library path and manual posterior path) over
//!   deterministically selected held-out samples

pub mod accuracy;
pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod features;
pub mod guesser;
pub mod model;
pub mod trainer;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
