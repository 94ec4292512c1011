//! Scorer trait and common types

/// A conversation as seen by the scorers
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    /// Message texts in conversation order
    pub messages: &'a [&'a str],

    /// Epoch-second timestamps, parallel to `messages` when present
    pub timestamps: Option<&'a [i64]>,
}

impl<'a> ScoringInput<'a> {
    pub fn new(messages: &'a [&'a str], timestamps: Option<&'a [i64]>) -> Self {
        Self {
            messages,
            timestamps,
        }
    }
}

/// Trait for the independent signals combined into a timewaster verdict.
///
/// Scorers are pure: the same input always yields the same output.
pub trait Scorer: Send + Sync {
    /// Score the conversation, higher meaning more engaged
    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore;

    /// Get the scorer name
    fn name(&self) -> &str;
}

/// Output of a single scorer
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScore {
    /// Score, nominally within [0, 1]
    pub score: f64,

    /// Human-readable observations, in detection order
    pub flags: Vec<String>,
}

impl ComponentScore {
    /// Create a score with flags
    pub fn new(score: f64, flags: Vec<String>) -> Self {
        Self { score, flags }
    }

    /// A flag-free score used when there is not enough data to judge
    pub fn neutral(score: f64) -> Self {
        Self {
            score,
            flags: Vec::new(),
        }
    }
}

/// Arithmetic mean, zero for an empty iterator
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Mean absolute difference between consecutive values, zero with fewer than two values
pub(crate) fn mean_abs_step(values: &[f64]) -> f64 {
    mean(values.windows(2).map(|w| (w[1] - w[0]).abs()))
}

/// Format a ratio as a percentage with one decimal place
pub(crate) fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
