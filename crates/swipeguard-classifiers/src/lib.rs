//! SwipeGuard Classifiers
//!
//! Heuristic conversation-quality scoring for dating-app chats.
//!
//! Two independent engines:
//! - [`TimewasterClassifier`]: content, pattern and timing scorers combined
//!   into a weighted engagement score and a timewaster verdict
//! - [`ConversationAnalyzer`]: descriptive features (sentiment, topics, flow
//!   and intent) for display and reply generation
//!
//! Everything is deterministic and runs on CPU in microseconds per
//! conversation. Classifiers are immutable once built; use
//! [`SharedClassifier`] to swap configurations at runtime and
//! [`BatchFilter`] to score many conversations concurrently.

pub mod analyzer;
pub mod batch;
pub mod config;
pub mod content;
pub mod intent;
pub mod pattern;
pub mod patterns;
pub mod scorer;
pub mod sentiment;
pub mod shared;
pub mod timewaster;
pub mod timing;
pub mod topics;

pub use analyzer::{
    AnalysisResult, ConversationAnalyzer, ConversationSummary, MessageFeatures,
    SentimentDistribution,
};
pub use batch::BatchFilter;
pub use config::{AnalyzerConfig, FilterConfig, Settings};
pub use content::{ContentMetrics, ContentScorer};
pub use intent::{Intent, IntentDetector};
pub use pattern::PatternScorer;
pub use patterns::PatternSet;
pub use scorer::{ComponentScore, Scorer, ScoringInput};
pub use sentiment::{Sentiment, SentimentLexicon};
pub use shared::SharedClassifier;
pub use timewaster::{ScoreResult, TimewasterClassifier};
pub use timing::{TimingMetrics, TimingScorer};
pub use topics::extract_topics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{AnalysisResult, ConversationAnalyzer};
    pub use crate::config::{AnalyzerConfig, FilterConfig, Settings};
    pub use crate::intent::Intent;
    pub use crate::scorer::Scorer;
    pub use crate::sentiment::Sentiment;
    pub use crate::timewaster::{ScoreResult, TimewasterClassifier};
    pub use swipeguard_core::{Conversation, Message, Sender};
}
