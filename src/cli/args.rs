//! Command line argument parsing for the synt CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::classifier::ClassifierKind;
use crate::features::ExtractorKind;

/// synt - train, guess and evaluate short-text sentiment
#[derive(Parser, Debug, Clone)]
#[command(name = "synt")]
#[command(about = "Train a sentiment classifier and guess sentiment from the command line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SyntArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory holding the model store and sample table
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SyntArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier
    Train(TrainArgs),

    /// Guess sentiment, one-shot or interactively
    Guess(GuessArgs),

    /// Test the accuracy of a trained classifier
    Accuracy(AccuracyArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Name of the training database
    #[arg(value_name = "DB")]
    pub db: String,

    /// Number of samples to train on
    #[arg(value_name = "SAMPLES")]
    pub samples: usize,

    /// The classifier to train
    #[arg(long, value_enum, default_value_t = ClassifierKind::NaiveBayes)]
    pub classifier: ClassifierKind,

    /// The feature extractor to use
    #[arg(long, value_enum, default_value_t = ExtractorKind::Stopwords)]
    pub extractor: ExtractorKind,

    /// Number of best features, for the bestwords extractor
    #[arg(long, default_value = "0")]
    pub best_features: usize,

    /// Purge any existing model before training
    #[arg(long)]
    pub purge: bool,

    /// Number of parallel training workers
    #[arg(long, default_value = "4")]
    pub processes: usize,

    /// Store index namespace to persist the model under
    #[arg(long, default_value = "0")]
    pub store_index: u32,

    /// Path to the JSONL sample table (defaults to <data-dir>/samples.jsonl)
    #[arg(long, value_name = "FILE")]
    pub samples_file: Option<PathBuf>,
}

/// Arguments for guessing
#[derive(Parser, Debug, Clone)]
pub struct GuessArgs {
    /// Guess the sentiment of this text and exit; without it an interactive
    /// prompt reads lines until empty input
    #[arg(long)]
    pub text: Option<String>,

    /// Name of the training database the model was saved under
    #[arg(long, default_value = "samples")]
    pub db: String,

    /// Store index namespace to load the model from
    #[arg(long, default_value = "0")]
    pub store_index: u32,
}

/// Arguments for accuracy testing
#[derive(Parser, Debug, Clone)]
pub struct AccuracyArgs {
    /// Number of held-out samples to test on; 0 derives 25% of the training
    /// sample count
    #[arg(long, default_value = "0")]
    pub test_samples: usize,

    /// Neutral probability-margin band for the manual scoring path
    #[arg(long, default_value = "0.2")]
    pub neutral_range: f64,

    /// Offset of the first held-out sample; 0 starts right after the
    /// training range
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Name of the training database the model was saved under
    #[arg(long, default_value = "samples")]
    pub db: String,

    /// Store index namespace to load the model from
    #[arg(long, default_value = "0")]
    pub store_index: u32,

    /// Path to the JSONL sample table (defaults to <data-dir>/samples.jsonl)
    #[arg(long, value_name = "FILE")]
    pub samples_file: Option<PathBuf>,

    /// How many of the most informative features to print
    #[arg(long, default_value = "50")]
    pub show_features: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_args_parse() {
        let args = SyntArgs::parse_from([
            "synt",
            "train",
            "samples",
            "1000",
            "--extractor",
            "bestwords",
            "--best-features",
            "500",
            "--purge",
            "--processes",
            "8",
        ]);

        match args.command {
            Command::Train(train) => {
                assert_eq!(train.db, "samples");
                assert_eq!(train.samples, 1000);
                assert_eq!(train.extractor, ExtractorKind::Bestwords);
                assert_eq!(train.best_features, 500);
                assert!(train.purge);
                assert_eq!(train.processes, 8);
            }
            other => panic!("expected train command, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_extractor_rejected() {
        let result =
            SyntArgs::try_parse_from(["synt", "train", "samples", "10", "--extractor", "tfidf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_guess_defaults() {
        let args = SyntArgs::parse_from(["synt", "guess", "--text", "great stuff"]);
        match args.command {
            Command::Guess(guess) => {
                assert_eq!(guess.text.as_deref(), Some("great stuff"));
                assert_eq!(guess.db, "samples");
                assert_eq!(guess.store_index, 0);
            }
            other => panic!("expected guess command, got {other:?}"),
        }
    }

    #[test]
    fn test_accuracy_defaults() {
        let args = SyntArgs::parse_from(["synt", "accuracy"]);
        match args.command {
            Command::Accuracy(accuracy) => {
                assert_eq!(accuracy.test_samples, 0);
                assert_eq!(accuracy.neutral_range, 0.2);
                assert_eq!(accuracy.offset, 0);
            }
            other => panic!("expected accuracy command, got {other:?}"),
        }
    }
}
