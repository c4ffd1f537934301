//! Naive Bayes decision rule

use rayon::prelude::*;
use std::collections::HashSet;

use super::evaluator::{evaluate, Evaluation};
use super::model::ProbabilityModel;
use super::search::{search, SearchOutcome};
use super::tokenizer::tokenize;
use super::types::{Alpha, ClassScores, Label, Message, ScoringPolicy};
use crate::error::Result;

/// Spam classifier over a trained, read-only model
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    model: ProbabilityModel,
    policy: ScoringPolicy,
}

impl NaiveBayesClassifier {
    /// Create a classifier over an already fitted model
    pub fn new(model: ProbabilityModel, policy: ScoringPolicy) -> Self {
        Self { model, policy }
    }

    /// Fit a model on the training split and wrap it
    pub fn train(train: &[Message], policy: ScoringPolicy) -> Result<Self> {
        Ok(Self::new(ProbabilityModel::fit(train)?, policy))
    }

    pub fn model(&self) -> &ProbabilityModel {
        &self.model
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Unnormalized posteriors `P(class) * Π P(word | class)`.
    ///
    /// Words outside the vocabulary contribute nothing; a message with no
    /// known word scores as its priors. Long messages can underflow both
    /// products to zero, so decisions go through [`Self::log_score`].
    pub fn score(&self, text: &str, alpha: Alpha) -> ClassScores {
        let (spam, ham) = self.fold_likelihoods(text, alpha, (1.0, 1.0), |acc, p| acc * p);

        ClassScores {
            spam: self.model.prior(Label::Spam) * spam,
            ham: self.model.prior(Label::Ham) * ham,
        }
    }

    /// Log posteriors `ln P(class) + Σ ln P(word | class)`.
    ///
    /// A zero likelihood or prior gives `-inf`, so two zero products still tie
    /// and resolve to spam.
    pub fn log_score(&self, text: &str, alpha: Alpha) -> ClassScores {
        let (spam, ham) = self.fold_likelihoods(text, alpha, (0.0, 0.0), |acc, p| acc + p.ln());

        ClassScores {
            spam: self.model.prior(Label::Spam).ln() + spam,
            ham: self.model.prior(Label::Ham).ln() + ham,
        }
    }

    pub fn predict(&self, text: &str, alpha: Alpha) -> Label {
        self.log_score(text, alpha).label()
    }

    pub fn predict_all(&self, messages: &[Message], alpha: Alpha) -> Vec<Label> {
        messages
            .par_iter()
            .map(|message| self.predict(&message.text, alpha))
            .collect()
    }

    /// Classify a labeled batch and score it against its labels
    pub fn evaluate(&self, messages: &[Message], alpha: Alpha) -> Result<Evaluation> {
        let predictions = self.predict_all(messages, alpha);
        let truth: Vec<Label> = messages.iter().map(|m| m.label).collect();
        evaluate(&predictions, &truth)
    }

    /// Pick the candidate alpha with the best accuracy on `cv`
    pub fn search(&self, candidates: &[Alpha], cv: &[Message]) -> Result<SearchOutcome> {
        search(self, candidates, cv)
    }

    /// Fold each scored word's (spam, ham) likelihoods into `init`
    fn fold_likelihoods<F>(
        &self,
        text: &str,
        alpha: Alpha,
        init: (f64, f64),
        step: F,
    ) -> (f64, f64)
    where
        F: Fn(f64, f64) -> f64,
    {
        let tokens = tokenize(text);

        self.scored_words(&tokens)
            .into_iter()
            .filter_map(|word| {
                let spam = self.model.word_probability(word, Label::Spam, alpha)?;
                let ham = self.model.word_probability(word, Label::Ham, alpha)?;
                Some((spam, ham))
            })
            .fold(init, |(spam, ham), (p_spam, p_ham)| (step(spam, p_spam), step(ham, p_ham)))
    }

    /// Words contributing a factor, in first-seen order
    fn scored_words<'a>(&self, tokens: &'a [String]) -> Vec<&'a str> {
        match self.policy {
            ScoringPolicy::DistinctWords => {
                let mut seen = HashSet::with_capacity(tokens.len());
                tokens
                    .iter()
                    .map(String::as_str)
                    .filter(|word| seen.insert(*word))
                    .collect()
            }
            ScoringPolicy::PerOccurrence => tokens.iter().map(String::as_str).collect(),
        }
    }
}
