//! Timing scorer
//!
//! Scores reply latency from message timestamps. Timestamps are taken as
//! given: out-of-order input yields negative response times rather than an
//! error.

use crate::config::FilterConfig;
use crate::scorer::{mean, mean_abs_step, ComponentScore, Scorer, ScoringInput};
use tracing::debug;

/// Fewest timestamps that produce a response time
pub const MIN_TIMESTAMPS: usize = 2;

/// Score returned when there are fewer than [`MIN_TIMESTAMPS`] timestamps
pub const NEUTRAL_SCORE: f64 = 0.5;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Response-time statistics in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimingMetrics {
    pub response_times: Vec<i64>,
    pub avg_response_time: f64,
    /// Mean absolute difference between consecutive response times
    pub time_variance: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TimingScorer {
    max_response_time: f64,
}

impl TimingScorer {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            max_response_time: config.max_response_time as f64,
        }
    }

    /// Compute response-time statistics, `None` with fewer than two timestamps
    pub fn measure(timestamps: &[i64]) -> Option<TimingMetrics> {
        if timestamps.len() < MIN_TIMESTAMPS {
            return None;
        }

        let response_times: Vec<i64> = timestamps
            .windows(2)
            .map(|w| w[1].saturating_sub(w[0]))
            .collect();
        let as_float: Vec<f64> = response_times.iter().map(|&t| t as f64).collect();

        Some(TimingMetrics {
            avg_response_time: mean(as_float.iter().copied()),
            time_variance: mean_abs_step(&as_float),
            response_times,
        })
    }
}

impl Scorer for TimingScorer {
    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let Some(metrics) = input.timestamps.and_then(Self::measure) else {
            return ComponentScore::neutral(NEUTRAL_SCORE);
        };

        let mut flags = Vec::new();

        if metrics.avg_response_time > self.max_response_time {
            flags.push(format!(
                "Slow average response time ({:.1} hours)",
                metrics.avg_response_time / SECONDS_PER_HOUR
            ));
        }

        // Same ceiling as the average, applied to a differently scaled quantity
        if metrics.time_variance > self.max_response_time {
            flags.push("Highly inconsistent response times".to_string());
        }

        let score = (1.0 - metrics.avg_response_time / self.max_response_time).clamp(0.0, 1.0);

        debug!(
            scorer = self.name(),
            avg_response_time = metrics.avg_response_time,
            time_variance = metrics.time_variance,
            score,
            "component scored"
        );

        ComponentScore::new(score, flags)
    }

    fn name(&self) -> &str {
        "timing"
    }
}
