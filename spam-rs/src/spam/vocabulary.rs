//! Per-class word frequency tables
//!
//! Counts are folded straight into word -> count maps, one per class, and then
//! merged into a single vocabulary keyed by word.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::tokenizer::tokenize;
use super::types::{Label, Message};
use crate::error::{Result, SpamError};

/// Occurrence counts of one word in each class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub freq_ham: u64,
    pub freq_spam: u64,
}

impl VocabularyEntry {
    pub fn new(word: impl Into<String>, freq_ham: u64, freq_spam: u64) -> Self {
        Self {
            word: word.into(),
            freq_ham,
            freq_spam,
        }
    }

    pub fn frequency(&self, label: Label) -> u64 {
        match label {
            Label::Ham => self.freq_ham,
            Label::Spam => self.freq_spam,
        }
    }
}

/// Words seen in training with their per-class counts.
///
/// Read-only once built. Serializes as the plain list of entries; the class
/// totals are recomputed on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<VocabularyEntry>", into = "Vec<VocabularyEntry>")]
pub struct Vocabulary {
    entries: HashMap<String, VocabularyEntry>,
    n_ham: u64,
    n_spam: u64,
}

impl Vocabulary {
    /// Build the vocabulary from a training split
    pub fn build(train: &[Message]) -> Result<Self> {
        if train.is_empty() {
            return Err(SpamError::EmptyTrainingSet);
        }

        let ham = count_words(train.iter().filter(|m| m.label == Label::Ham));
        let spam = count_words(train.iter().filter(|m| m.label == Label::Spam));

        debug!(
            "Counted {} distinct ham words and {} distinct spam words",
            ham.len(),
            spam.len()
        );

        Ok(Self::from_counts(ham, spam))
    }

    /// Merge per-class counts; a word missing from one class gets 0 there
    pub fn from_counts(ham: HashMap<String, u64>, spam: HashMap<String, u64>) -> Self {
        let mut entries: HashMap<String, VocabularyEntry> = HashMap::with_capacity(ham.len());

        for (word, count) in ham {
            entries
                .entry(word.clone())
                .or_insert_with(|| VocabularyEntry::new(word, 0, 0))
                .freq_ham = count;
        }

        for (word, count) in spam {
            entries
                .entry(word.clone())
                .or_insert_with(|| VocabularyEntry::new(word, 0, 0))
                .freq_spam = count;
        }

        Self::from_entries(entries.into_values())
    }

    /// Assemble a vocabulary from explicit entries; repeated words are summed
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = VocabularyEntry>,
    {
        let entries = entries.into_iter().fold(
            HashMap::<String, VocabularyEntry>::new(),
            |mut acc, entry| {
                match acc.get_mut(&entry.word) {
                    Some(existing) => {
                        existing.freq_ham += entry.freq_ham;
                        existing.freq_spam += entry.freq_spam;
                    }
                    None => {
                        acc.insert(entry.word.clone(), entry);
                    }
                }
                acc
            },
        );

        let n_ham = entries.values().map(|e| e.freq_ham).sum();
        let n_spam = entries.values().map(|e| e.freq_spam).sum();

        Self {
            entries,
            n_ham,
            n_spam,
        }
    }

    pub fn get(&self, word: &str) -> Option<&VocabularyEntry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of distinct words across both classes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total word occurrences in a class (`N_ham` or `N_spam`)
    pub fn total(&self, label: Label) -> u64 {
        match label {
            Label::Ham => self.n_ham,
            Label::Spam => self.n_spam,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.values()
    }
}

impl From<Vec<VocabularyEntry>> for Vocabulary {
    fn from(entries: Vec<VocabularyEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Vocabulary> for Vec<VocabularyEntry> {
    fn from(vocabulary: Vocabulary) -> Self {
        let mut entries: Vec<VocabularyEntry> = vocabulary.entries.into_values().collect();
        entries.sort_by(|a, b| a.word.cmp(&b.word));
        entries
    }
}

fn count_words<'a, I>(messages: I) -> HashMap<String, u64>
where
    I: Iterator<Item = &'a Message>,
{
    messages
        .flat_map(|message| tokenize(&message.text))
        .fold(HashMap::new(), |mut counts, token| {
            *counts.entry(token).or_insert(0) += 1;
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_counts_per_class() {
        let train = vec![
            Message::spam("Win a FREE prize"),
            Message::spam("free free entry"),
            Message::ham("are you free tonight"),
        ];

        let vocab = Vocabulary::build(&train).unwrap();

        let free = vocab.get("free").unwrap();
        assert_eq!(free.freq_spam, 3);
        assert_eq!(free.freq_ham, 1);

        let win = vocab.get("win").unwrap();
        assert_eq!(win.freq_spam, 1);
        assert_eq!(win.freq_ham, 0);

        let tonight = vocab.get("tonight").unwrap();
        assert_eq!(tonight.freq_spam, 0);
        assert_eq!(tonight.freq_ham, 1);

        assert_eq!(vocab.total(Label::Spam), 7);
        assert_eq!(vocab.total(Label::Ham), 4);
    }

    #[test]
    fn test_vocabulary_size_is_union_not_sum() {
        let train = vec![Message::spam("free win"), Message::ham("free hello")];

        let vocab = Vocabulary::build(&train).unwrap();

        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_spam_only_training_has_no_ham_counts() {
        let train = vec![
            Message::spam("claim your prize now"),
            Message::spam("prize draw, txt WIN to 80086"),
        ];

        let vocab = Vocabulary::build(&train).unwrap();

        assert!(vocab.iter().all(|e| e.freq_ham == 0));
        assert_eq!(vocab.total(Label::Ham), 0);
        assert!(vocab.total(Label::Spam) > 0);
    }

    #[test]
    fn test_empty_training_set_is_error() {
        let result = Vocabulary::build(&[]);
        assert!(matches!(result, Err(SpamError::EmptyTrainingSet)));
    }

    #[test]
    fn test_messages_without_words_give_empty_vocabulary() {
        let train = vec![Message::ham("123 456"), Message::spam("!!!")];

        let vocab = Vocabulary::build(&train).unwrap();

        assert!(vocab.is_empty());
    }

    #[test]
    fn test_from_entries_sums_duplicates() {
        let vocab = Vocabulary::from_entries(vec![
            VocabularyEntry::new("free", 1, 2),
            VocabularyEntry::new("free", 0, 3),
        ]);

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.get("free").unwrap().freq_spam, 5);
        assert_eq!(vocab.total(Label::Ham), 1);
    }

    #[test]
    fn test_serde_recomputes_totals() {
        let vocab = Vocabulary::from_entries(vec![
            VocabularyEntry::new("hello", 10, 0),
            VocabularyEntry::new("win", 0, 5),
        ]);

        let json = serde_json::to_string(&vocab).unwrap();
        let restored: Vocabulary = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.total(Label::Ham), 10);
        assert_eq!(restored.total(Label::Spam), 5);
    }
}
