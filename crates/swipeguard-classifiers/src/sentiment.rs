//! Lexicon-based sentiment labelling
//!
//! Counts whole words from small positive and negative lexicons. Words are
//! lowercased and stripped of surrounding ASCII punctuation before lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "awesome", "amazing", "love", "happy", "excited", "thanks", "thank", "cool",
    "nice", "fun", "enjoy", "like", "glad",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "sad",
    "upset",
    "angry",
    "annoyed",
    "disappointed",
    "sorry",
    "unfortunate",
    "boring",
];

/// Sentiment label of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positive/negative word lexicon
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl SentimentLexicon {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }

    /// Label `text` by comparing positive and negative word hits; ties are neutral
    pub fn classify(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let (positive, negative) = lowered
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
            .fold((0usize, 0usize), |(pos, neg), word| {
                (
                    pos + usize::from(self.positive.contains(word)),
                    neg + usize::from(self.negative.contains(word)),
                )
            });

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new()
    }
}
