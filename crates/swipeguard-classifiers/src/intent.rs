//! Message intent detection
//!
//! Keyword rules checked in a fixed priority order; the first rule that
//! fires decides the intent. A question mark beats every keyword, so
//! "Do you want to get coffee?" is a question rather than a date request.
//!
//! Keywords are case-insensitive substring matches, not whole words.

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::fmt;
use swipeguard_core::Result;

/// Coarse communicative purpose of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Question,
    Greeting,
    Farewell,
    Gratitude,
    SmallTalk,
    DateRequest,
    ContactRequest,
    General,
}

impl Intent {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::Gratitude => "gratitude",
            Self::SmallTalk => "small_talk",
            Self::DateRequest => "date_request",
            Self::ContactRequest => "contact_request",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyword rules after the question-mark check, highest priority first
const KEYWORD_RULES: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hi", "hello", "hey", "sup"]),
    (Intent::Farewell, &["bye", "goodbye", "see you", "talk later"]),
    (Intent::Gratitude, &["thanks", "thank you", "appreciate"]),
    (
        Intent::SmallTalk,
        &["what are you doing", "how are you", "how's your day"],
    ),
    (
        Intent::DateRequest,
        &["meet up", "get together", "coffee", "drink", "dinner"],
    ),
    (
        Intent::ContactRequest,
        &["number", "instagram", "snapchat", "contact"],
    ),
];

/// Ordered intent rules compiled into one matcher per intent
#[derive(Debug, Clone)]
pub struct IntentDetector {
    rules: Vec<(Intent, AhoCorasick)>,
}

impl IntentDetector {
    pub fn new() -> Result<Self> {
        let rules = KEYWORD_RULES
            .iter()
            .map(|(intent, keywords)| {
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(*keywords)
                    .map(|matcher| (*intent, matcher))
                    .map_err(|e| {
                        swipeguard_core::Error::classifier(format!(
                            "Failed to build {intent} matcher: {e}"
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Detect the intent of a single message
    pub fn detect(&self, message: &str) -> Intent {
        if message.contains('?') {
            return Intent::Question;
        }

        self.rules
            .iter()
            .find(|(_, matcher)| matcher.is_match(message))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }
}
