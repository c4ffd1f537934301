//! Accuracy and confusion counts

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::types::Label;
use crate::error::{Result, SpamError};

/// Prediction counts keyed by `(predicted, actual)` label pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Confusion {
    counts: BTreeMap<(Label, Label), usize>,
}

/// One cell of the confusion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ConfusionCell {
    pub predicted: Label,
    pub actual: Label,
    pub count: usize,
}

impl Confusion {
    pub fn get(&self, predicted: Label, actual: Label) -> usize {
        self.counts.get(&(predicted, actual)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Predictions that matched the ground truth
    pub fn correct(&self) -> usize {
        self.counts
            .iter()
            .filter(|((predicted, actual), _)| predicted == actual)
            .map(|(_, count)| count)
            .sum()
    }

    /// Non-empty cells, ordered by `(predicted, actual)`
    pub fn cells(&self) -> Vec<ConfusionCell> {
        self.counts
            .iter()
            .map(|(&(predicted, actual), &count)| ConfusionCell {
                predicted,
                actual,
                count,
            })
            .collect()
    }
}

impl Serialize for Confusion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells())
    }
}

/// Result of comparing predictions to ground truth
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Evaluation {
    /// Fraction of correct predictions, within [0, 1]
    pub accuracy: f64,
    pub confusion: Confusion,
}

impl Evaluation {
    /// Of the messages predicted as `label`, the fraction that really were
    pub fn precision(&self, label: Label) -> Option<f64> {
        let predicted: usize = [Label::Ham, Label::Spam]
            .iter()
            .map(|&actual| self.confusion.get(label, actual))
            .sum();
        ratio(self.confusion.get(label, label), predicted)
    }

    /// Of the messages that really were `label`, the fraction predicted as such
    pub fn recall(&self, label: Label) -> Option<f64> {
        let actual: usize = [Label::Ham, Label::Spam]
            .iter()
            .map(|&predicted| self.confusion.get(predicted, label))
            .sum();
        ratio(self.confusion.get(label, label), actual)
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Compare predictions to ground truth, position by position
pub fn evaluate(predictions: &[Label], ground_truth: &[Label]) -> Result<Evaluation> {
    if predictions.len() != ground_truth.len() {
        return Err(SpamError::LengthMismatch {
            predictions: predictions.len(),
            ground_truth: ground_truth.len(),
        });
    }
    if predictions.is_empty() {
        return Err(SpamError::EmptyEvaluationSet);
    }

    let counts = predictions.iter().zip(ground_truth).fold(
        BTreeMap::<(Label, Label), usize>::new(),
        |mut counts, (&predicted, &actual)| {
            *counts.entry((predicted, actual)).or_insert(0) += 1;
            counts
        },
    );
    let confusion = Confusion { counts };

    Ok(Evaluation {
        accuracy: confusion.correct() as f64 / confusion.total() as f64,
        confusion,
    })
}
