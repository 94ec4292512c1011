//! Pattern scorer
//!
//! Content-independent structure: how often messages repeat and how much
//! consecutive message lengths vary.

use crate::scorer::{mean_abs_step, percent, ComponentScore, Scorer, ScoringInput};
use std::collections::HashSet;
use tracing::debug;

/// Fewest messages for which repetition and variance mean anything
pub const MIN_MESSAGES: usize = 3;

/// Score returned when there are fewer than [`MIN_MESSAGES`] messages
pub const NEUTRAL_SCORE: f64 = 0.5;

const REPETITION_THRESHOLD: f64 = 0.7;
const LENGTH_VARIANCE_THRESHOLD: f64 = 10.0;
const LENGTH_VARIANCE_SCALE: f64 = 20.0;

const REPETITION_WEIGHT: f64 = 0.7;
const VARIANCE_WEIGHT: f64 = 0.3;

/// Scores repetition and length variance. Holds no configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScorer;

impl PatternScorer {
    pub fn new() -> Self {
        Self
    }

    /// Distinct message texts over message count
    pub fn repetition_ratio(messages: &[&str]) -> f64 {
        if messages.is_empty() {
            return 0.0;
        }
        let distinct: HashSet<&str> = messages.iter().copied().collect();
        distinct.len() as f64 / messages.len() as f64
    }

    /// Mean absolute difference between consecutive character lengths
    pub fn length_variance(messages: &[&str]) -> f64 {
        let lengths: Vec<f64> = messages
            .iter()
            .map(|m| m.chars().count() as f64)
            .collect();
        mean_abs_step(&lengths)
    }
}

impl Scorer for PatternScorer {
    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let messages = input.messages;
        if messages.len() < MIN_MESSAGES {
            return ComponentScore::neutral(NEUTRAL_SCORE);
        }

        let mut flags = Vec::new();

        let repetition_ratio = Self::repetition_ratio(messages);
        if repetition_ratio < REPETITION_THRESHOLD {
            flags.push(format!(
                "High message repetition ({} repeated)",
                percent(1.0 - repetition_ratio)
            ));
        }

        let length_variance = Self::length_variance(messages);
        if length_variance < LENGTH_VARIANCE_THRESHOLD {
            flags.push("Low variance in message length".to_string());
        }

        let score = repetition_ratio * REPETITION_WEIGHT
            + (length_variance / LENGTH_VARIANCE_SCALE).min(1.0) * VARIANCE_WEIGHT;

        debug!(
            scorer = self.name(),
            repetition_ratio,
            length_variance,
            score,
            "component scored"
        );

        ComponentScore::new(score, flags)
    }

    fn name(&self) -> &str {
        "pattern"
    }
}
