//! Command implementations for the synt CLI.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::accuracy::{AccuracyEvaluator, EvalConfig};
use crate::cli::args::*;
use crate::corpus::JsonlSampleStore;
use crate::error::Result;
use crate::guesser::Guesser;
use crate::model::FileModelStore;
use crate::trainer::{TrainConfig, Trainer};

/// Execute a CLI command.
pub fn execute_command(args: SyntArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Guess(guess_args) => guess(guess_args.clone(), &args),
        Command::Accuracy(accuracy_args) => accuracy(accuracy_args.clone(), &args),
    }
}

/// Resolve the data directory: `--data-dir`, or `~/.synt`.
fn data_dir(args: &SyntArgs) -> PathBuf {
    if let Some(dir) = &args.data_dir {
        return dir.clone();
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(".synt"))
        .unwrap_or_else(|| PathBuf::from(".synt"))
}

fn sample_table_path(explicit: Option<&PathBuf>, args: &SyntArgs) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| data_dir(args).join("samples.jsonl"))
}

/// Train a classifier.
fn train(args: TrainArgs, cli_args: &SyntArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!(
            "Beginning train on {} database with {} samples.",
            args.db, args.samples
        );
    }

    let sample_store = Arc::new(JsonlSampleStore::open(sample_table_path(
        args.samples_file.as_ref(),
        cli_args,
    ))?);
    let model_store = Arc::new(FileModelStore::open(data_dir(cli_args))?);

    let config = TrainConfig {
        db: args.db,
        samples: args.samples,
        classifier: args.classifier,
        extractor: args.extractor,
        best_features: args.best_features,
        processes: args.processes,
        purge: args.purge,
        store_index: args.store_index,
    };

    let trainer = Trainer::new(sample_store, model_store);
    let report = trainer.train(&config)?;

    println!(
        "Finished training in {:.2}s ({} features, {} shards).",
        report.elapsed.as_secs_f64(),
        report.feature_count,
        report.shards
    );
    Ok(())
}

/// Guess sentiment, one-shot or interactively.
fn guess(args: GuessArgs, cli_args: &SyntArgs) -> Result<()> {
    let model_store = Arc::new(FileModelStore::open(data_dir(cli_args))?);
    let guesser = Guesser::load(model_store, &args.db, args.store_index)?;

    if let Some(text) = &args.text {
        let (label, score) = guesser.guess_with_score(text)?;
        println!("Guessed: {label} ({score:+.4})");
        return Ok(());
    }

    println!("Enter something to guess the sentiment of it!");
    println!("Press enter on an empty line to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("synt> ");
        io::stdout().flush()?;

        // Empty input is the exit sentinel.
        let Some(line) = lines.next() else { break };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            break;
        }

        // A failed query is reported without terminating the loop.
        match guesser.guess_with_score(text) {
            Ok((label, score)) => println!("Guessed: {label} ({score:+.4})"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    Ok(())
}

/// Test the accuracy of a trained classifier.
fn accuracy(args: AccuracyArgs, cli_args: &SyntArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!(
            "Beginning accuracy test with neutral range {}.",
            args.neutral_range
        );
    }

    let sample_store = Arc::new(JsonlSampleStore::open(sample_table_path(
        args.samples_file.as_ref(),
        cli_args,
    ))?);
    let model_store = Arc::new(FileModelStore::open(data_dir(cli_args))?);

    let config = EvalConfig {
        test_samples: args.test_samples,
        neutral_range: args.neutral_range,
        offset: args.offset,
    };

    let evaluator = AccuracyEvaluator::new(sample_store);
    let (report, artifact) =
        evaluator.evaluate_stored(model_store, &args.db, args.store_index, &config)?;

    println!("Library accuracy: {:.4}", report.library_accuracy);
    println!("Manual accuracy:  {:.4}", report.manual_accuracy);
    println!(
        "Tested {} held-out samples starting at offset {}.",
        report.test_sample_count, report.offset
    );

    if args.show_features > 0 {
        println!("Most informative features:");
        for (token, score) in artifact.classifier.most_informative_features(args.show_features) {
            println!("  {token:<24} {score:.2}");
        }
    }
    Ok(())
}
