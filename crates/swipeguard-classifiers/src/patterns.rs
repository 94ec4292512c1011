//! Compiled regex pattern sets
//!
//! Pattern lists are configuration data. They are compiled once when a scorer
//! or analyzer is built and shared read-only afterwards.

use regex::{Regex, RegexBuilder};
use swipeguard_core::Result;

/// An ordered list of compiled patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile every pattern, failing on the first malformed one
    pub fn new<S: AsRef<str>>(patterns: &[S], case_insensitive: bool) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(case_insensitive)
                    .build()
                    .map_err(|e| {
                        swipeguard_core::Error::config(format!(
                            "Failed to compile pattern '{}': {}",
                            p.as_ref(),
                            e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// First match of each pattern that matches `text`, in pattern order
    pub fn first_matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.patterns
            .iter()
            .filter_map(|re| re.find(text).map(|m| m.as_str()))
            .collect()
    }

    /// Number of distinct patterns matching `text`
    pub fn count_matching(&self, text: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(text)).count()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_set_matches_in_order() {
        let set = PatternSet::new(&["instagram", "follow me"], true).unwrap();

        let matches = set.first_matches("Follow me on Instagram @someone");
        assert_eq!(matches, vec!["Instagram", "Follow me"]);
        assert_eq!(set.count_matching("nothing to see"), 0);
    }

    #[test]
    fn test_pattern_set_counts_each_pattern_once() {
        let set = PatternSet::new(&[r"\?", "tell me more"], false).unwrap();
        assert_eq!(set.count_matching("Really? Why? tell me more"), 2);
    }

    #[test]
    fn test_case_sensitivity_flag() {
        let sensitive = PatternSet::new(&["venmo"], false).unwrap();
        assert_eq!(sensitive.count_matching("VENMO me"), 0);

        let insensitive = PatternSet::new(&["venmo"], true).unwrap();
        assert_eq!(insensitive.count_matching("VENMO me"), 1);
    }

    #[test]
    fn test_malformed_pattern_is_config_error() {
        let err = PatternSet::new(&["(unclosed"], true).unwrap_err();
        assert!(matches!(err, swipeguard_core::Error::Config(_)));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_len() {
        let set = PatternSet::new(&["paypal", "cashapp"], true).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert!(PatternSet::new::<&str>(&[], true).unwrap().is_empty());
    }
}
