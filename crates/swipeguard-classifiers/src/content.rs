//! Content scorer
//!
//! Scores a conversation from lexical features: red-flag phrases, average
//! message length, one-word replies and how often questions are asked.

use crate::config::FilterConfig;
use crate::patterns::PatternSet;
use crate::scorer::{mean, percent, ComponentScore, Scorer, ScoringInput};
use swipeguard_core::Result;
use tracing::debug;

const RED_FLAG_WEIGHT: f64 = 0.4;
const LENGTH_WEIGHT: f64 = 0.3;
const ONE_WORD_WEIGHT: f64 = 0.2;
const QUESTION_WEIGHT: f64 = 0.1;

/// Raw lexical measurements of a conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ContentMetrics {
    /// Matched red-flag text, one entry per (message, pattern) hit
    pub red_flag_matches: Vec<String>,
    /// Mean word count per message
    pub avg_length: f64,
    /// Fraction of messages with at most one word
    pub one_word_ratio: f64,
    /// Fraction of messages containing a question mark
    pub question_ratio: f64,
    pub message_count: usize,
}

/// Lexical scorer built from the thresholds and red-flag patterns of a [`FilterConfig`]
#[derive(Debug, Clone)]
pub struct ContentScorer {
    red_flags: PatternSet,
    min_message_length: f64,
    min_question_ratio: f64,
    max_one_word_ratio: f64,
}

impl ContentScorer {
    /// Compile the red-flag patterns of `config`
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            red_flags: PatternSet::new(&config.red_flag_patterns, true)?,
            min_message_length: f64::from(config.min_message_length),
            min_question_ratio: config.min_question_ratio,
            max_one_word_ratio: config.max_one_word_ratio,
        })
    }

    /// Measure the lexical features of `messages`
    pub fn measure(&self, messages: &[&str]) -> ContentMetrics {
        let red_flag_matches = messages
            .iter()
            .flat_map(|message| self.red_flags.first_matches(message))
            .map(String::from)
            .collect();

        let word_counts: Vec<usize> = messages
            .iter()
            .map(|message| message.split_whitespace().count())
            .collect();

        let count = messages.len();
        let ratio = |hits: usize| {
            if count == 0 {
                0.0
            } else {
                hits as f64 / count as f64
            }
        };

        ContentMetrics {
            red_flag_matches,
            avg_length: mean(word_counts.iter().map(|&words| words as f64)),
            one_word_ratio: ratio(word_counts.iter().filter(|&&words| words <= 1).count()),
            question_ratio: ratio(messages.iter().filter(|m| m.contains('?')).count()),
            message_count: count,
        }
    }

    /// Combine measurements into a score.
    ///
    /// The one-word factor is not clamped. A one-word ratio above the ceiling
    /// drives it below zero and can pull the whole content score negative.
    pub fn combine(&self, metrics: &ContentMetrics) -> f64 {
        if metrics.message_count == 0 {
            return 0.0;
        }

        let red_flag_factor = (1.0
            - metrics.red_flag_matches.len() as f64 / metrics.message_count as f64 * 2.0)
            .max(0.0);

        let length_factor = (metrics.avg_length / self.min_message_length).min(1.0);

        let one_word_factor = if self.max_one_word_ratio > 0.0 {
            1.0 - metrics.one_word_ratio / self.max_one_word_ratio
        } else if metrics.one_word_ratio > 0.0 {
            0.0
        } else {
            1.0
        };

        let question_factor = if self.min_question_ratio > 0.0 {
            (metrics.question_ratio / self.min_question_ratio).min(1.0)
        } else {
            1.0
        };

        red_flag_factor * RED_FLAG_WEIGHT
            + length_factor * LENGTH_WEIGHT
            + one_word_factor * ONE_WORD_WEIGHT
            + question_factor * QUESTION_WEIGHT
    }

    fn flags(&self, metrics: &ContentMetrics) -> Vec<String> {
        let mut flags: Vec<String> = metrics
            .red_flag_matches
            .iter()
            .map(|m| format!("Contains potential red flag: '{m}'"))
            .collect();

        if metrics.avg_length < self.min_message_length {
            flags.push(format!(
                "Short messages (avg {:.1} words)",
                metrics.avg_length
            ));
        }

        if metrics.one_word_ratio > self.max_one_word_ratio {
            flags.push(format!(
                "High ratio of one-word responses ({})",
                percent(metrics.one_word_ratio)
            ));
        }

        if metrics.question_ratio < self.min_question_ratio {
            flags.push(format!(
                "Low question ratio ({})",
                percent(metrics.question_ratio)
            ));
        }

        flags
    }
}

impl Scorer for ContentScorer {
    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        if input.messages.is_empty() {
            return ComponentScore::neutral(0.0);
        }

        let metrics = self.measure(input.messages);
        let score = self.combine(&metrics);

        debug!(
            scorer = self.name(),
            red_flags = metrics.red_flag_matches.len(),
            avg_length = metrics.avg_length,
            one_word_ratio = metrics.one_word_ratio,
            question_ratio = metrics.question_ratio,
            score,
            "component scored"
        );

        ComponentScore::new(score, self.flags(&metrics))
    }

    fn name(&self) -> &str {
        "content"
    }
}
