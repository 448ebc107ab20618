//! Text analysis pipeline for training-time tokenization.
//!
//! The same pipeline is used when training, guessing and evaluating, so a
//! model always sees text tokenized exactly the way its feature set was built.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::SentimentAnalyzer;
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter, StopFilter};
pub use tokenizer::{Tokenizer, UnicodeWordTokenizer};
