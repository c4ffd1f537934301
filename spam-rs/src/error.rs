use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Vocabulary is empty after training")]
    EmptyVocabulary,

    #[error("Invalid smoothing parameter: {0} (alpha must be finite and non-negative)")]
    InvalidAlpha(f64),

    #[error("Invalid spam prior: {0} (must be within [0, 1])")]
    InvalidPrior(f64),

    #[error("No alpha candidates to search")]
    NoCandidates,

    #[error("Cannot evaluate an empty set of predictions")]
    EmptyEvaluationSet,

    #[error("Length mismatch: {predictions} predictions for {ground_truth} labels")]
    LengthMismatch {
        predictions: usize,
        ground_truth: usize,
    },

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpamError>;
