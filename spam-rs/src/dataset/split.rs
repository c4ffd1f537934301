//! Seeded train/cv/test splitting

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::SplitConfig;
use crate::error::{Result, SpamError};
use crate::spam::Message;

const PROPORTION_TOLERANCE: f64 = 1e-9;

/// Fractions of the collection assigned to each subset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitProportions {
    train: f64,
    cv: f64,
    test: f64,
}

impl SplitProportions {
    pub fn new(train: f64, cv: f64, test: f64) -> Result<Self> {
        for (name, value) in [("train", train), ("cv", cv), ("test", test)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SpamError::InvalidSplit(format!(
                    "{} proportion {} is outside [0, 1]",
                    name, value
                )));
            }
        }

        let sum = train + cv + test;
        if (sum - 1.0).abs() > PROPORTION_TOLERANCE {
            return Err(SpamError::InvalidSplit(format!(
                "proportions sum to {}, expected 1",
                sum
            )));
        }

        Ok(Self { train, cv, test })
    }

    pub fn train(&self) -> f64 {
        self.train
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    pub fn test(&self) -> f64 {
        self.test
    }
}

impl TryFrom<&SplitConfig> for SplitProportions {
    type Error = SpamError;

    fn try_from(config: &SplitConfig) -> Result<Self> {
        Self::new(config.train, config.cv, config.test)
    }
}

/// Disjoint subsets covering the whole collection
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<Message>,
    pub cv: Vec<Message>,
    pub test: Vec<Message>,
}

/// Shuffle with a generator seeded from `seed`, then cut into train/cv/test.
///
/// The same messages, seed and proportions always give the same split.
pub fn split(
    mut messages: Vec<Message>,
    seed: u64,
    proportions: SplitProportions,
) -> Result<Split> {
    let total = messages.len();
    let n_train = ((total as f64 * proportions.train).round() as usize).min(total);
    let n_cv = ((total as f64 * proportions.cv).round() as usize).min(total - n_train);

    if n_train == 0 {
        return Err(SpamError::InvalidSplit(format!(
            "training subset would be empty ({} messages, train proportion {})",
            total, proportions.train
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    messages.shuffle(&mut rng);

    let mut rest = messages.split_off(n_train);
    let test = rest.split_off(n_cv);
    let split = Split {
        train: messages,
        cv: rest,
        test,
    };

    if split.cv.is_empty() {
        warn!("Cross-validation subset is empty");
    }
    if split.test.is_empty() {
        warn!("Test subset is empty");
    }

    info!(
        "Split {} messages (seed {}, proportions {}/{}/{}): train={} cv={} test={}",
        total,
        seed,
        proportions.train,
        proportions.cv,
        proportions.test,
        split.train.len(),
        split.cv.len(),
        split.test.len()
    );

    Ok(split)
}
