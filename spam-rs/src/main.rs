//! Command-line driver for the SMS spam filter
//!
//! # Usage
//!
//! ```bash
//! # Split, train, tune alpha on cv and report test accuracy
//! spam-rs run --data SMSSpamCollection
//!
//! # Same, as JSON, with a custom configuration
//! spam-rs --config spam.toml run --data SMSSpamCollection --json
//!
//! # Classify ad-hoc texts (alpha tuned on cv unless given)
//! spam-rs predict --data SMSSpamCollection --alpha 1 "WINNER! claim now" "see you at 5"
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::dataset::{load_messages, split, Split, SplitProportions};
use spam_rs::spam::{
    parse_candidates, Alpha, Evaluation, Label, NaiveBayesClassifier, SearchOutcome,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Train, tune and evaluate a Naive Bayes SMS spam filter", long_about = None)]
struct Cli {
    /// Configuration file (TOML); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tune alpha on the cv split and evaluate it on the test split
    Run {
        /// Tab-separated collection: one `<label>\t<text>` per line
        #[arg(short, long)]
        data: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify the given texts
    Predict {
        /// Tab-separated collection used for training
        #[arg(short, long)]
        data: PathBuf,
        /// Smoothing parameter; tuned on the cv split when omitted
        #[arg(short, long)]
        alpha: Option<f64>,
        /// Texts to classify
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

#[derive(Serialize)]
struct Report {
    search: SearchOutcome,
    test: Evaluation,
    spam_precision: Option<f64>,
    spam_recall: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(&config.logging);
    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run { data, json } => run(&config, &data, json),
        Commands::Predict { data, alpha, texts } => predict(&config, &data, alpha, &texts),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

fn prepare(config: &Config, data: &Path) -> anyhow::Result<(Split, NaiveBayesClassifier)> {
    let messages = load_messages(data)
        .with_context(|| format!("Failed to load messages from {}", data.display()))?;

    let proportions = SplitProportions::try_from(&config.split)?;
    let split = split(messages, config.split.seed, proportions)?;

    let classifier = NaiveBayesClassifier::train(&split.train, config.search.policy)?;
    info!(
        "Trained on {} messages, vocabulary of {} words",
        split.train.len(),
        classifier.model().vocabulary().len()
    );

    Ok((split, classifier))
}

fn tune(
    config: &Config,
    split: &Split,
    classifier: &NaiveBayesClassifier,
) -> anyhow::Result<SearchOutcome> {
    let candidates = parse_candidates(&config.search.candidates)?;
    Ok(classifier.search(&candidates, &split.cv)?)
}

fn run(config: &Config, data: &Path, json: bool) -> anyhow::Result<()> {
    let (split, classifier) = prepare(config, data)?;
    let search = tune(config, &split, &classifier)?;

    let test = classifier
        .evaluate(&split.test, search.best_alpha)
        .context("Failed to evaluate the test split")?;
    info!(
        "Test accuracy {:.4} with alpha {}",
        test.accuracy, search.best_alpha
    );

    let report = Report {
        spam_precision: test.precision(Label::Spam),
        spam_recall: test.recall(Label::Spam),
        search,
        test,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("{:>10}  {:>10}", "alpha", "cv acc");
    for result in &report.search.results {
        println!("{:>10}  {:>10.4}", result.alpha.to_string(), result.accuracy);
    }
    println!();
    println!(
        "Best alpha: {} (cv accuracy {:.4})",
        report.search.best_alpha, report.search.best_accuracy
    );
    println!("Test accuracy: {:.4}", report.test.accuracy);

    let format_ratio = |value: Option<f64>| match value {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    };
    println!("Spam precision: {}", format_ratio(report.spam_precision));
    println!("Spam recall: {}", format_ratio(report.spam_recall));

    println!();
    println!("{:>10}  {:>10}  {:>6}", "predicted", "actual", "count");
    for cell in report.test.confusion.cells() {
        println!(
            "{:>10}  {:>10}  {:>6}",
            cell.predicted.as_str(),
            cell.actual.as_str(),
            cell.count
        );
    }
}

fn predict(
    config: &Config,
    data: &Path,
    alpha: Option<f64>,
    texts: &[String],
) -> anyhow::Result<()> {
    let (split, classifier) = prepare(config, data)?;

    let alpha = match alpha {
        Some(value) => Alpha::new(value)?,
        None => tune(config, &split, &classifier)?.best_alpha,
    };

    for text in texts {
        // ln P(class) + sum of ln P(word | class)
        let scores = classifier.log_score(text, alpha);
        println!(
            "{}\t{:.4}\t{:.4}\t{}",
            scores.label(),
            scores.spam,
            scores.ham,
            text
        );
    }

    Ok(())
}
