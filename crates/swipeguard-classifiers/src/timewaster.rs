//! Timewaster classifier
//!
//! Combines the content, pattern and timing scorers into a single engagement
//! score with fixed weights and turns it into a verdict:
//!
//! ```text
//! overall = 0.4 * content + 0.4 * pattern + 0.2 * time
//! is_timewaster = overall < min_engagement_score
//! ```
//!
//! The weights are part of the observable behavior; changing them changes
//! verdicts.

use crate::config::FilterConfig;
use crate::content::ContentScorer;
use crate::pattern::PatternScorer;
use crate::scorer::{ComponentScore, Scorer, ScoringInput};
use crate::timing::{TimingScorer, MIN_TIMESTAMPS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use swipeguard_core::{Conversation, Result};
use tracing::{debug, info};

pub const CONTENT_WEIGHT: f64 = 0.4;
pub const PATTERN_WEIGHT: f64 = 0.4;
pub const TIME_WEIGHT: f64 = 0.2;

/// Time score used when no usable timing data was supplied
pub const MISSING_TIMING_SCORE: f64 = 1.0;

pub const REASON_NO_MESSAGES: &str = "No messages to analyze";
pub const REASON_LOW_ENGAGEMENT: &str = "Low engagement detected";
pub const REASON_SUFFICIENT_ENGAGEMENT: &str = "Sufficient engagement";

/// Verdict for one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub is_timewaster: bool,

    /// Confidence in the verdict (0.0-1.0)
    pub confidence: f64,

    /// Weighted engagement score (0.0-1.0)
    pub overall_score: f64,

    /// Lexical score; may dip below zero on extreme one-word ratios
    pub content_score: f64,

    pub pattern_score: f64,

    pub time_score: f64,

    /// Content, pattern and timing flags, in that order
    pub flags: Vec<String>,

    pub reason: String,
}

impl ScoreResult {
    /// Result for a conversation without messages
    pub fn no_messages() -> Self {
        Self {
            is_timewaster: false,
            confidence: 0.0,
            overall_score: 0.0,
            content_score: 0.0,
            pattern_score: 0.0,
            time_score: 0.0,
            flags: Vec::new(),
            reason: REASON_NO_MESSAGES.to_string(),
        }
    }
}

/// Classifies conversations as timewasters.
///
/// Immutable once built. To reconfigure, build a new instance (see
/// [`crate::SharedClassifier`] for swapping instances at runtime).
#[derive(Debug, Clone)]
pub struct TimewasterClassifier {
    config: FilterConfig,
    content: ContentScorer,
    pattern: PatternScorer,
    timing: TimingScorer,
}

impl TimewasterClassifier {
    /// Validate `config` and compile its patterns
    pub fn new(config: FilterConfig) -> Result<Self> {
        config.validate()?;

        let content = ContentScorer::new(&config)?;
        let timing = TimingScorer::new(&config);

        debug!(
            red_flag_patterns = config.red_flag_patterns.len(),
            "timewaster classifier built"
        );

        Ok(Self {
            config,
            content,
            pattern: PatternScorer::new(),
            timing,
        })
    }

    /// Classifier with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(FilterConfig::default())
    }

    /// The configuration this classifier was built from
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Score a conversation.
    ///
    /// `timestamps`, when given, must be parallel to `messages`; fewer than two
    /// timestamps count as no timing data at all.
    pub fn analyze<S: AsRef<str>>(&self, messages: &[S], timestamps: Option<&[i64]>) -> ScoreResult {
        if messages.is_empty() {
            return ScoreResult::no_messages();
        }

        let texts: Vec<&str> = messages.iter().map(AsRef::as_ref).collect();
        let input = ScoringInput::new(&texts, timestamps);

        let content = self.content.score(&input);
        let pattern = self.pattern.score(&input);
        let time = match timestamps {
            Some(ts) if ts.len() >= MIN_TIMESTAMPS => self.timing.score(&input),
            _ => ComponentScore::neutral(MISSING_TIMING_SCORE),
        };

        let overall_score = (content.score * CONTENT_WEIGHT
            + pattern.score * PATTERN_WEIGHT
            + time.score * TIME_WEIGHT)
            .clamp(0.0, 1.0);

        let is_timewaster = overall_score < self.config.min_engagement_score;
        let confidence = if is_timewaster {
            1.0 - overall_score
        } else {
            overall_score
        };

        let verdict = if is_timewaster { "timewaster" } else { "engaged" };
        metrics::counter!("swipeguard_conversations_scored_total", "verdict" => verdict)
            .increment(1);
        metrics::histogram!("swipeguard_overall_score").record(overall_score);

        let mut flags = content.flags;
        flags.extend(pattern.flags);
        flags.extend(time.flags);

        ScoreResult {
            is_timewaster,
            confidence,
            overall_score,
            content_score: content.score,
            pattern_score: pattern.score,
            time_score: time.score,
            flags,
            reason: if is_timewaster {
                REASON_LOW_ENGAGEMENT
            } else {
                REASON_SUFFICIENT_ENGAGEMENT
            }
            .to_string(),
        }
    }

    /// Score a conversation record, using its timestamps when every message has one
    pub fn analyze_conversation(&self, conversation: &Conversation) -> Result<ScoreResult> {
        let timestamps = conversation.timestamps()?;
        Ok(self.analyze(&conversation.texts(), timestamps.as_deref()))
    }

    /// Score many conversations independently, keyed by match name
    pub fn filter_conversations<I, K, M, S>(&self, conversations: I) -> BTreeMap<String, ScoreResult>
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: AsRef<[S]>,
        S: AsRef<str>,
    {
        conversations
            .into_iter()
            .map(|(name, messages)| {
                let name = name.into();
                info!("Analyzing conversation with {}", name);

                let result = self.analyze(messages.as_ref(), None);
                log_verdict(&name, &result);

                (name, result)
            })
            .collect()
    }
}

pub(crate) fn log_verdict(name: &str, result: &ScoreResult) {
    if result.is_timewaster {
        info!(
            "{} identified as potential timewaster (confidence: {:.2})",
            name, result.confidence
        );
    } else {
        info!(
            "{} appears to be engaged (score: {:.2})",
            name, result.overall_score
        );
    }
}
