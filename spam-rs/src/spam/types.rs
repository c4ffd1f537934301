//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SpamError};

/// Message class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate message
    Ham,
    /// Unsolicited message
    Spam,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ham" => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other => Err(format!("unknown label '{}' (expected 'ham' or 'spam')", other)),
        }
    }
}

/// A labeled text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Raw message text
    pub text: String,
    /// Ground-truth class
    pub label: Label,
}

impl Message {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn ham(text: impl Into<String>) -> Self {
        Self::new(text, Label::Ham)
    }

    pub fn spam(text: impl Into<String>) -> Self {
        Self::new(text, Label::Spam)
    }
}

/// Additive smoothing parameter, guaranteed finite and non-negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Alpha(f64);

impl Alpha {
    /// Laplace smoothing
    pub const LAPLACE: Alpha = Alpha(1.0);

    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(SpamError::InvalidAlpha(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Alpha {
    type Error = SpamError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Alpha> for f64 {
    fn from(alpha: Alpha) -> f64 {
        alpha.0
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How repeated tokens in one message contribute to its score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringPolicy {
    /// Each distinct word contributes one factor regardless of repeats
    #[default]
    #[serde(rename = "distinct")]
    DistinctWords,
    /// Each occurrence contributes a factor (textbook multinomial Naive Bayes)
    #[serde(rename = "per_occurrence")]
    PerOccurrence,
}

/// Unnormalized posterior scores for one message, as raw products or log-sums
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassScores {
    pub spam: f64,
    pub ham: f64,
}

impl ClassScores {
    /// Ties resolve to spam
    pub fn label(&self) -> Label {
        if self.spam >= self.ham {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}
