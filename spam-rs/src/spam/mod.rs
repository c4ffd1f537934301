//! Spam classification module
//!
//! Multinomial Naive Bayes with additive smoothing: tokenization, per-class
//! vocabulary, smoothed likelihoods, the decision rule, evaluation and the
//! smoothing parameter search.

pub mod classifier;
pub mod evaluator;
pub mod model;
pub mod search;
pub mod tokenizer;
pub mod types;
pub mod vocabulary;

pub use classifier::NaiveBayesClassifier;
pub use evaluator::{evaluate, Confusion, ConfusionCell, Evaluation};
pub use model::{ModelParameters, ProbabilityModel};
pub use search::{parse_candidates, search, SearchOutcome, SweepResult};
pub use tokenizer::tokenize;
pub use types::*;
pub use vocabulary::{Vocabulary, VocabularyEntry};
