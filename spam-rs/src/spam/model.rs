//! Class priors and smoothed word likelihoods

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Alpha, Label, Message};
use super::vocabulary::Vocabulary;
use crate::error::{Result, SpamError};

/// Quantities derived once from the training split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Total word occurrences in ham messages
    pub n_ham: u64,
    /// Total word occurrences in spam messages
    pub n_spam: u64,
    /// Distinct words across both classes
    pub n_vocabulary: usize,
    /// Fraction of training messages labeled spam
    pub p_spam: f64,
    /// `1 - p_spam`
    pub p_ham: f64,
}

impl ModelParameters {
    /// Derive priors and totals from the training split it was built from
    pub fn fit(train: &[Message], vocabulary: &Vocabulary) -> Result<Self> {
        if train.is_empty() {
            return Err(SpamError::EmptyTrainingSet);
        }

        let spam = train.iter().filter(|m| m.label == Label::Spam).count();
        Self::with_prior(vocabulary, spam as f64 / train.len() as f64)
    }

    /// Use an explicit spam prior instead of counting training labels
    pub fn with_prior(vocabulary: &Vocabulary, p_spam: f64) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(SpamError::EmptyVocabulary);
        }
        if !(0.0..=1.0).contains(&p_spam) {
            return Err(SpamError::InvalidPrior(p_spam));
        }

        Ok(Self {
            n_ham: vocabulary.total(Label::Ham),
            n_spam: vocabulary.total(Label::Spam),
            n_vocabulary: vocabulary.len(),
            p_spam,
            p_ham: 1.0 - p_spam,
        })
    }

    pub fn prior(&self, label: Label) -> f64 {
        match label {
            Label::Ham => self.p_ham,
            Label::Spam => self.p_spam,
        }
    }

    pub fn total(&self, label: Label) -> u64 {
        match label {
            Label::Ham => self.n_ham,
            Label::Spam => self.n_spam,
        }
    }
}

/// Trained vocabulary together with its derived parameters.
///
/// Immutable after construction, so one instance can back any number of
/// concurrent classifications. Deserializing recomputes the parameters from
/// the stored vocabulary and spam prior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredModel")]
pub struct ProbabilityModel {
    vocabulary: Vocabulary,
    parameters: ModelParameters,
}

/// Serialized form of a model; only the vocabulary and spam prior are trusted
#[derive(Deserialize)]
struct StoredModel {
    vocabulary: Vocabulary,
    parameters: StoredParameters,
}

#[derive(Deserialize)]
struct StoredParameters {
    p_spam: f64,
}

impl TryFrom<StoredModel> for ProbabilityModel {
    type Error = SpamError;

    fn try_from(stored: StoredModel) -> Result<Self> {
        Self::from_parts(stored.vocabulary, stored.parameters.p_spam)
    }
}

impl ProbabilityModel {
    /// Build vocabulary and parameters from a training split
    pub fn fit(train: &[Message]) -> Result<Self> {
        let vocabulary = Vocabulary::build(train)?;
        let parameters = ModelParameters::fit(train, &vocabulary)?;

        debug!(
            "Fitted model: {} words, N_ham={}, N_spam={}, P(spam)={:.4}",
            parameters.n_vocabulary, parameters.n_ham, parameters.n_spam, parameters.p_spam
        );

        Ok(Self {
            vocabulary,
            parameters,
        })
    }

    /// Build a model from an existing vocabulary and spam prior
    pub fn from_parts(vocabulary: Vocabulary, p_spam: f64) -> Result<Self> {
        let parameters = ModelParameters::with_prior(&vocabulary, p_spam)?;
        Ok(Self {
            vocabulary,
            parameters,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn prior(&self, label: Label) -> f64 {
        self.parameters.prior(label)
    }

    /// Smoothed likelihood `P(word | label)`.
    ///
    /// `(freq + alpha) / (N_label + alpha * N_vocabulary)`, where `N_label` is
    /// the total of the same class. Returns `None` for words outside the
    /// vocabulary. With `alpha = 0` and an empty class the ratio is `0/0` and
    /// is taken as `0`.
    pub fn word_probability(&self, word: &str, label: Label, alpha: Alpha) -> Option<f64> {
        let entry = self.vocabulary.get(word)?;
        let alpha = alpha.value();

        let numerator = entry.frequency(label) as f64 + alpha;
        let denominator =
            self.parameters.total(label) as f64 + alpha * self.parameters.n_vocabulary as f64;

        if denominator == 0.0 {
            return Some(0.0);
        }
        Some(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spam::vocabulary::VocabularyEntry;

    const EPS: f64 = 1e-12;

    fn scenario_model() -> ProbabilityModel {
        let vocab = Vocabulary::from_entries(vec![
            VocabularyEntry::new("win", 0, 5),
            VocabularyEntry::new("free", 2, 8),
            VocabularyEntry::new("hello", 10, 0),
        ]);
        ProbabilityModel::from_parts(vocab, 0.3).unwrap()
    }

    #[test]
    fn test_parameters_from_vocabulary() {
        let model = scenario_model();
        let params = model.parameters();

        assert_eq!(params.n_ham, 12);
        assert_eq!(params.n_spam, 13);
        assert_eq!(params.n_vocabulary, 3);
        assert!((params.p_spam - 0.3).abs() < EPS);
        assert!((params.p_ham - 0.7).abs() < EPS);
    }

    #[test]
    fn test_laplace_likelihoods() {
        let model = scenario_model();

        let p = |w: &str, l: Label| model.word_probability(w, l, Alpha::LAPLACE).unwrap();

        assert!((p("win", Label::Spam) - 6.0 / 16.0).abs() < EPS);
        assert!((p("free", Label::Spam) - 9.0 / 16.0).abs() < EPS);
        assert!((p("win", Label::Ham) - 1.0 / 15.0).abs() < EPS);
        assert!((p("free", Label::Ham) - 3.0 / 15.0).abs() < EPS);
    }

    #[test]
    fn test_ham_denominator_uses_ham_total() {
        let model = scenario_model();

        // (10 + 1) / (N_ham + 3) with N_ham = 12, never N_spam = 13
        let hello = model
            .word_probability("hello", Label::Ham, Alpha::LAPLACE)
            .unwrap();
        assert!((hello - 11.0 / 15.0).abs() < EPS);
        assert!((hello - 11.0 / 16.0).abs() > 1e-3);
    }

    #[test]
    fn test_zero_alpha_is_raw_frequency_ratio() {
        let model = scenario_model();
        let zero = Alpha::new(0.0).unwrap();

        let free_spam = model.word_probability("free", Label::Spam, zero).unwrap();
        assert!((free_spam - 8.0 / 13.0).abs() < EPS);

        let win_ham = model.word_probability("win", Label::Ham, zero).unwrap();
        assert_eq!(win_ham, 0.0);
    }

    #[test]
    fn test_zero_count_likelihood_grows_with_alpha() {
        let model = scenario_model();

        let sweep: Vec<f64> = [0.0, 0.001, 0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|&a| {
                model
                    .word_probability("win", Label::Ham, Alpha::new(a).unwrap())
                    .unwrap()
            })
            .collect();

        assert!(sweep.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_unknown_word_has_no_likelihood() {
        let model = scenario_model();
        assert!(model
            .word_probability("unknownword", Label::Spam, Alpha::LAPLACE)
            .is_none());
    }

    #[test]
    fn test_zero_alpha_with_empty_class() {
        let vocab = Vocabulary::from_entries(vec![VocabularyEntry::new("prize", 0, 4)]);
        let model = ProbabilityModel::from_parts(vocab, 1.0).unwrap();

        let p = model
            .word_probability("prize", Label::Ham, Alpha::new(0.0).unwrap())
            .unwrap();
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_fit_priors_from_training_labels() {
        let train = vec![
            Message::spam("win cash"),
            Message::ham("see you soon"),
            Message::ham("ok"),
            Message::ham("call me"),
        ];

        let model = ProbabilityModel::fit(&train).unwrap();

        assert!((model.prior(Label::Spam) - 0.25).abs() < EPS);
        assert!((model.prior(Label::Ham) - 0.75).abs() < EPS);
    }

    #[test]
    fn test_fit_rejects_empty_vocabulary() {
        let train = vec![Message::ham("12345"), Message::spam("?!")];
        let result = ProbabilityModel::fit(&train);
        assert!(matches!(result, Err(SpamError::EmptyVocabulary)));
    }

    #[test]
    fn test_fit_rejects_empty_training_set() {
        let result = ProbabilityModel::fit(&[]);
        assert!(matches!(result, Err(SpamError::EmptyTrainingSet)));
    }

    #[test]
    fn test_rejects_prior_out_of_range() {
        let vocab = Vocabulary::from_entries(vec![VocabularyEntry::new("ok", 1, 0)]);
        let result = ProbabilityModel::from_parts(vocab, 1.5);
        assert!(matches!(result, Err(SpamError::InvalidPrior(_))));
    }

    #[test]
    fn test_deserialize_rejects_empty_vocabulary() {
        let json = r#"{
            "vocabulary": [],
            "parameters": {"n_ham": 0, "n_spam": 0, "n_vocabulary": 0, "p_spam": 0.5, "p_ham": 0.5}
        }"#;

        let err = serde_json::from_str::<ProbabilityModel>(json).unwrap_err();
        assert!(err.to_string().contains("Vocabulary is empty"));
    }

    #[test]
    fn test_deserialize_rejects_prior_out_of_range() {
        let json = r#"{
            "vocabulary": [{"word": "hi", "freq_ham": 1, "freq_spam": 1}],
            "parameters": {"n_ham": 1, "n_spam": 1, "n_vocabulary": 1, "p_spam": 7.5, "p_ham": -6.5}
        }"#;

        let err = serde_json::from_str::<ProbabilityModel>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid spam prior"));
    }

    #[test]
    fn test_deserialize_recomputes_totals() {
        let json = r#"{
            "vocabulary": [{"word": "hi", "freq_ham": 5, "freq_spam": 0}],
            "parameters": {"n_ham": 1, "n_spam": 0, "n_vocabulary": 9, "p_spam": 0.5, "p_ham": 0.5}
        }"#;

        let model: ProbabilityModel = serde_json::from_str(json).unwrap();

        assert_eq!(model.parameters().n_ham, 5);
        assert_eq!(model.parameters().n_vocabulary, 1);
        let p = model
            .word_probability("hi", Label::Ham, Alpha::LAPLACE)
            .unwrap();
        assert!((p - 1.0).abs() < EPS);
    }

    #[test]
    fn test_serialized_model_reloads() {
        let model = scenario_model();

        let json = serde_json::to_string(&model).unwrap();
        let reloaded: ProbabilityModel = serde_json::from_str(&json).unwrap();

        assert_eq!(reloaded.parameters().n_ham, 12);
        assert_eq!(reloaded.parameters().n_spam, 13);
        assert_eq!(reloaded.vocabulary().len(), 3);
        assert!((reloaded.prior(Label::Spam) - 0.3).abs() < EPS);
    }
}
