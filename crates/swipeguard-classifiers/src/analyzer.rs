//! Conversation analyzer
//!
//! Descriptive features for display and ranking: per-message engagement and
//! sentiment, conversation flow, topics and intent. Nothing here feeds the
//! timewaster verdict.

use crate::config::AnalyzerConfig;
use crate::intent::{Intent, IntentDetector};
use crate::patterns::PatternSet;
use crate::scorer::mean;
use crate::sentiment::{Sentiment, SentimentLexicon};
use crate::topics::extract_topics;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use swipeguard_core::Result;
use tracing::debug;

/// Flow score returned for conversations with fewer than three messages
pub const NEUTRAL_FLOW_SCORE: f64 = 0.5;

const MIN_FLOW_MESSAGES: usize = 3;
const FLOW_VARIANCE_SCALE: f64 = 1000.0;
const CONTINUITY_WEIGHT: f64 = 0.7;
const VARIANCE_WEIGHT: f64 = 0.3;

/// Emoji code point blocks
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F700, 0x1F77F),
    (0x1F780, 0x1F7FF),
    (0x1F800, 0x1F8FF),
    (0x1F900, 0x1F9FF),
    (0x1FA00, 0x1FA6F),
    (0x1FA70, 0x1FAFF),
    (0x2702, 0x27B0),
    (0x24C2, 0x1F251),
];

fn is_emoji(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Features of a single message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageFeatures {
    pub word_count: usize,
    pub char_count: usize,
    /// Engagement score (0.0-1.0)
    pub engagement_score: f64,
    pub sentiment: Sentiment,
    /// Fraction of words that are filler
    pub filler_ratio: f64,
    pub has_question: bool,
    pub has_url: bool,
    pub has_emoji: bool,
}

/// Message counts per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Conversation-level features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub message_count: usize,
    /// Mean word count per message
    pub avg_length: f64,
    pub overall_engagement: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub question_ratio: f64,
    pub flow_score: f64,
    pub topics: Vec<String>,
}

/// Compact conversation digest for downstream reply generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub messages: Vec<String>,
    pub message_count: usize,
    pub avg_message_length: f64,
    pub engagement_level: f64,
    pub topics: Vec<String>,
}

/// Extracts descriptive features from conversations
#[derive(Debug, Clone)]
pub struct ConversationAnalyzer {
    filler_words: HashSet<String>,
    engagement: PatternSet,
    url: Regex,
    sentiment: SentimentLexicon,
    intents: IntentDetector,
}

impl ConversationAnalyzer {
    /// Compile the engagement indicators of `config`
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let engagement = PatternSet::new(&config.engagement_indicators, false)?;
        let url = Regex::new(r"https?://\S+").map_err(|e| {
            swipeguard_core::Error::classifier(format!("Failed to compile URL regex: {e}"))
        })?;

        debug!(
            engagement_indicators = engagement.len(),
            filler_words = config.filler_words.len(),
            "conversation analyzer built"
        );

        Ok(Self {
            // Message words are lowercased before lookup, so configured words are too
            filler_words: config
                .filler_words
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect(),
            engagement,
            url,
            sentiment: SentimentLexicon::new(),
            intents: IntentDetector::new()?,
        })
    }

    /// Analyzer with the default word lists
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalyzerConfig::default())
    }

    /// Extract features of a single message
    pub fn analyze_message(&self, message: &str) -> MessageFeatures {
        let lowered = message.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let word_count = words.len();

        let engagement_hits = self.engagement.count_matching(message);
        let filler_count = words
            .iter()
            .filter(|w| self.filler_words.contains(**w))
            .count();

        MessageFeatures {
            word_count,
            char_count: message.chars().count(),
            engagement_score: (engagement_hits as f64 / 2.0).min(1.0),
            sentiment: self.sentiment.classify(message),
            filler_ratio: if word_count > 0 {
                filler_count as f64 / word_count as f64
            } else {
                0.0
            },
            has_question: message.contains('?'),
            has_url: self.url.is_match(message),
            has_emoji: message.chars().any(is_emoji),
        }
    }

    /// Extract conversation-level features; empty input yields zeroed defaults
    pub fn analyze_conversation<S: AsRef<str>>(&self, messages: &[S]) -> AnalysisResult {
        if messages.is_empty() {
            return AnalysisResult::default();
        }

        let features: Vec<MessageFeatures> = messages
            .iter()
            .map(|m| self.analyze_message(m.as_ref()))
            .collect();

        let mut sentiment_distribution = SentimentDistribution::default();
        for f in &features {
            sentiment_distribution.record(f.sentiment);
        }

        let questions = features.iter().filter(|f| f.has_question).count();

        AnalysisResult {
            message_count: messages.len(),
            avg_length: mean(features.iter().map(|f| f.word_count as f64)),
            overall_engagement: mean(features.iter().map(|f| f.engagement_score)),
            sentiment_distribution,
            question_ratio: questions as f64 / messages.len() as f64,
            flow_score: flow_score(messages),
            topics: extract_topics(messages),
        }
    }

    /// Detect the intent of a single message
    pub fn detect_intent(&self, message: &str) -> Intent {
        self.intents.detect(message)
    }

    /// Digest of a conversation for reply-generation services
    pub fn summarize<S: AsRef<str>>(&self, messages: &[S]) -> ConversationSummary {
        let analysis = self.analyze_conversation(messages);
        ConversationSummary {
            messages: messages.iter().map(|m| m.as_ref().to_string()).collect(),
            message_count: messages.len(),
            avg_message_length: analysis.avg_length,
            engagement_level: analysis.overall_engagement,
            topics: analysis.topics,
        }
    }
}

/// Topical continuity blended with length stability.
///
/// Continuity is the share of consecutive message pairs sharing at least one
/// lowercase token; stability is one minus the population variance of
/// character lengths scaled by 1000 and capped at 1.
pub fn flow_score<S: AsRef<str>>(messages: &[S]) -> f64 {
    if messages.len() < MIN_FLOW_MESSAGES {
        return NEUTRAL_FLOW_SCORE;
    }

    let lengths: Vec<f64> = messages
        .iter()
        .map(|m| m.as_ref().chars().count() as f64)
        .collect();
    let avg = mean(lengths.iter().copied());
    let variance = mean(lengths.iter().map(|l| (l - avg).powi(2)));
    let normalized_variance = (variance / FLOW_VARIANCE_SCALE).min(1.0);

    let token_sets: Vec<HashSet<String>> = messages
        .iter()
        .map(|m| {
            m.as_ref()
                .to_lowercase()
                .split_whitespace()
                .map(String::from)
                .collect()
        })
        .collect();
    let continuous = token_sets
        .windows(2)
        .filter(|pair| !pair[0].is_disjoint(&pair[1]))
        .count();
    let continuity_ratio = continuous as f64 / (messages.len() - 1) as f64;

    CONTINUITY_WEIGHT * continuity_ratio + VARIANCE_WEIGHT * (1.0 - normalized_variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ConversationAnalyzer {
        ConversationAnalyzer::with_defaults().unwrap()
    }

    #[test]
    fn test_message_features() {
        let features = analyzer().analyze_message("What do you think? Tell me more 😀");
        // the emoji is its own token
        assert_eq!(features.word_count, 8);
        assert_eq!(features.char_count, 33);
        // "?", "what do you think", "tell me more" -> capped at 1
        assert_eq!(features.engagement_score, 1.0);
        assert!(features.has_question);
        assert!(features.has_emoji);
        assert!(!features.has_url);
    }

    #[test]
    fn test_single_indicator_is_half_engaged() {
        let features = analyzer().analyze_message("cool, how about you");
        assert_eq!(features.engagement_score, 0.5);
        assert!(!features.has_question);
    }

    #[test]
    fn test_filler_and_url() {
        let features = analyzer().analyze_message("lol ok check https://example.com/pics");
        assert_eq!(features.filler_ratio, 0.5);
        assert!(features.has_url);
        assert!(!features.has_emoji);
    }

    #[test]
    fn test_empty_message() {
        let features = analyzer().analyze_message("");
        assert_eq!(features.word_count, 0);
        assert_eq!(features.char_count, 0);
        assert_eq!(features.engagement_score, 0.0);
        assert_eq!(features.filler_ratio, 0.0);
        assert_eq!(features.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_empty_conversation() {
        let result = analyzer().analyze_conversation::<&str>(&[]);
        assert_eq!(result.message_count, 0);
        assert_eq!(result.avg_length, 0.0);
        assert_eq!(result.overall_engagement, 0.0);
        assert_eq!(result.sentiment_distribution.total(), 0);
        assert!(result.topics.is_empty());
    }

    #[test]
    fn test_conversation_features() {
        let messages = [
            "I love Italian food! What's your favorite?",
            "Italian food is great, pasta especially",
            "Sorry, I hate pasta. Bad experience.",
            "Oh no, what happened",
        ];
        let result = analyzer().analyze_conversation(&messages);

        assert_eq!(result.message_count, 4);
        assert_eq!(result.sentiment_distribution.positive, 2);
        assert_eq!(result.sentiment_distribution.negative, 1);
        assert_eq!(result.sentiment_distribution.neutral, 1);
        assert_eq!(result.question_ratio, 0.25);
        assert_eq!(result.topics, vec!["italian", "food", "pasta"]);
        assert!((0.0..=1.0).contains(&result.flow_score));
    }

    #[test]
    fn test_flow_score_short_conversation_is_neutral() {
        assert_eq!(flow_score(&["hi", "hello"]), NEUTRAL_FLOW_SCORE);
    }

    #[test]
    fn test_flow_score_full_continuity() {
        // identical lengths, every pair shares "pizza"
        let score = flow_score(&["pizza now", "pizza too", "pizza yes"]);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flow_score_no_continuity() {
        let score = flow_score(&["aaaa", "bbbb", "cccc"]);
        assert!((score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_detect_intent_question_first() {
        assert_eq!(
            analyzer().detect_intent("Do you want to meet for coffee?"),
            Intent::Question
        );
    }

    #[test]
    fn test_custom_filler_words() {
        // Lookup is case-insensitive: "Erm" is stored as "erm"
        let analyzer = ConversationAnalyzer::new(AnalyzerConfig {
            filler_words: vec!["Erm".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(analyzer.analyze_message("erm maybe").filler_ratio, 0.5);
    }

    #[test]
    fn test_invalid_engagement_indicator() {
        let result = ConversationAnalyzer::new(AnalyzerConfig {
            engagement_indicators: vec!["(".to_string()],
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_summarize() {
        let messages = ["Hiking this weekend?", "Hiking sounds fun!"];
        let summary = analyzer().summarize(&messages);
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.messages, vec!["Hiking this weekend?", "Hiking sounds fun!"]);
        assert_eq!(summary.topics, vec!["hiking"]);
    }

    #[test]
    fn test_analysis_result_json_shape() {
        let result = analyzer().analyze_conversation(&["good", "bad", "fine"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sentiment_distribution"]["positive"], 1);
        assert_eq!(json["sentiment_distribution"]["negative"], 1);
        assert_eq!(json["sentiment_distribution"]["neutral"], 1);
    }
}
