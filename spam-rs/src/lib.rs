//! spam-rs: SMS spam filter
//!
//! Classifies short text messages as spam or ham with a multinomial Naive
//! Bayes model and additive smoothing, tuned on a held-out split.
//!
//! # Features
//!
//! - **Tokenizer**: lowercase, digit and punctuation stripping, whitespace split
//! - **Model**: per-class word counts, priors and smoothed likelihoods
//! - **Classifier**: distinct-word or per-occurrence scoring, ties go to spam
//! - **Evaluation**: accuracy plus confusion counts keyed by label pair
//! - **Alpha search**: sweep smoothing candidates on the cv split
//!
//! # Example
//!
//! ```
//! use spam_rs::spam::{Alpha, Label, Message, NaiveBayesClassifier, ScoringPolicy};
//!
//! let train = vec![
//!     Message::spam("WINNER! Claim your free prize now"),
//!     Message::ham("Are we still meeting for lunch?"),
//! ];
//! let classifier = NaiveBayesClassifier::train(&train, ScoringPolicy::DistinctWords)?;
//!
//! assert_eq!(classifier.predict("free prize", Alpha::LAPLACE), Label::Spam);
//! # Ok::<(), spam_rs::SpamError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`dataset`]: Message loading and seeded splitting
//! - [`error`]: Error types and handling
//! - [`spam`]: The Naive Bayes classifier and its tuning

pub mod config;
pub mod dataset;
pub mod error;
pub mod spam;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
