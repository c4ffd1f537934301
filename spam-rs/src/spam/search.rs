//! Smoothing parameter sweep over a held-out split

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::classifier::NaiveBayesClassifier;
use super::types::{Alpha, Message};
use crate::error::{Result, SpamError};

/// Accuracy measured for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepResult {
    pub alpha: Alpha,
    pub accuracy: f64,
}

/// Outcome of a sweep, with every candidate's result in input order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub best_alpha: Alpha,
    pub best_accuracy: f64,
    pub results: Vec<SweepResult>,
}

/// Validate raw alpha values; one bad value rejects the whole list
pub fn parse_candidates(values: &[f64]) -> Result<Vec<Alpha>> {
    if values.is_empty() {
        return Err(SpamError::NoCandidates);
    }
    values.iter().map(|&value| Alpha::new(value)).collect()
}

/// Evaluate every candidate on `cv` with the same trained model.
///
/// The highest accuracy wins; on ties the earliest candidate is kept, so pass
/// candidates in ascending order to prefer the smallest alpha.
pub fn search(
    classifier: &NaiveBayesClassifier,
    candidates: &[Alpha],
    cv: &[Message],
) -> Result<SearchOutcome> {
    if candidates.is_empty() {
        return Err(SpamError::NoCandidates);
    }

    // Collecting a parallel iterator keeps candidate order
    let results = candidates
        .par_iter()
        .map(|&alpha| {
            let evaluation = classifier.evaluate(cv, alpha)?;
            debug!("alpha={} cv accuracy={:.4}", alpha, evaluation.accuracy);
            Ok(SweepResult {
                alpha,
                accuracy: evaluation.accuracy,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let best = results.iter().skip(1).fold(results[0], |best, candidate| {
        if candidate.accuracy > best.accuracy {
            *candidate
        } else {
            best
        }
    });

    info!(
        "Best alpha {} with cv accuracy {:.4} over {} candidates",
        best.alpha,
        best.accuracy,
        results.len()
    );

    Ok(SearchOutcome {
        best_alpha: best.alpha,
        best_accuracy: best.accuracy,
        results,
    })
}
