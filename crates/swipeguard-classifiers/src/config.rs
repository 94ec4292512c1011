//! Configuration for the timewaster filter and the conversation analyzer
//!
//! Every field is optional in serialized form; missing keys fall back to the
//! documented defaults. Configuration objects are plain values: to change the
//! behavior of a running filter, build a new classifier from a new config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use swipeguard_core::{Error, Result};

/// Thresholds and red-flag patterns for timewaster detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Floor for an acceptable average word count per message
    #[serde(default = "default_min_message_length")]
    pub min_message_length: u32,

    /// Ceiling in seconds for acceptable reply latency
    #[serde(default = "default_max_response_time")]
    pub max_response_time: u64,

    /// Verdict threshold on the overall score
    #[serde(default = "default_min_engagement_score")]
    pub min_engagement_score: f64,

    /// Floor for the fraction of messages containing a question
    #[serde(default = "default_min_question_ratio")]
    pub min_question_ratio: f64,

    /// Ceiling for the fraction of one-word replies
    #[serde(default = "default_max_one_word_ratio")]
    pub max_one_word_ratio: f64,

    /// Case-insensitive regexes for off-platform solicitation and scams
    #[serde(default = "default_red_flag_patterns")]
    pub red_flag_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_message_length: default_min_message_length(),
            max_response_time: default_max_response_time(),
            min_engagement_score: default_min_engagement_score(),
            min_question_ratio: default_min_question_ratio(),
            max_one_word_ratio: default_max_one_word_ratio(),
            red_flag_patterns: default_red_flag_patterns(),
        }
    }
}

impl FilterConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Check numeric ranges. Pattern syntax is checked when the patterns are compiled.
    pub fn validate(&self) -> Result<()> {
        if self.min_message_length < 1 {
            return Err(Error::config("min_message_length must be at least 1"));
        }
        if self.max_response_time < 60 {
            return Err(Error::config(format!(
                "max_response_time must be at least 60 seconds, got {}",
                self.max_response_time
            )));
        }
        check_unit_range("min_engagement_score", self.min_engagement_score)?;
        check_unit_range("min_question_ratio", self.min_question_ratio)?;
        check_unit_range("max_one_word_ratio", self.max_one_word_ratio)?;
        Ok(())
    }
}

/// Word lists and engagement regexes for the conversation analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Words that add little content
    #[serde(default = "default_filler_words")]
    pub filler_words: Vec<String>,

    /// Regexes signalling an engaged reply, matched as written
    #[serde(default = "default_engagement_indicators")]
    pub engagement_indicators: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            filler_words: default_filler_words(),
            engagement_indicators: default_engagement_indicators(),
        }
    }
}

impl AnalyzerConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Combined settings file with `filter` and `analyzer` sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, alias = "message_filter")]
    pub filter: FilterConfig,

    #[serde(default, alias = "message_analyzer")]
    pub analyzer: AnalyzerConfig,
}

impl Settings {
    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn check_unit_range(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::config(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

fn default_min_message_length() -> u32 {
    5
}

fn default_max_response_time() -> u64 {
    24 * 60 * 60
}

fn default_min_engagement_score() -> f64 {
    0.5
}

fn default_min_question_ratio() -> f64 {
    0.2
}

fn default_max_one_word_ratio() -> f64 {
    0.5
}

fn default_red_flag_patterns() -> Vec<String> {
    [
        "instagram",
        "snapchat",
        "follow me",
        "my profile",
        "venmo",
        "cashapp",
        "paypal",
        "send money",
        "not here often",
        "check my bio",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_filler_words() -> Vec<String> {
    [
        "um", "uh", "like", "so", "yeah", "just", "lol", "haha", "ok", "okay",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_engagement_indicators() -> Vec<String> {
    [
        r"\?",
        r"(?i)what do you think",
        r"(?i)tell me more",
        r"(?i)how about you",
        r"(?i)that's interesting",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.min_message_length, 5);
        assert_eq!(config.max_response_time, 86_400);
        assert_eq!(config.min_engagement_score, 0.5);
        assert_eq!(config.min_question_ratio, 0.2);
        assert_eq!(config.max_one_word_ratio, 0.5);
        assert_eq!(config.red_flag_patterns.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = FilterConfig::from_yaml("min_message_length: 8\n").unwrap();
        assert_eq!(config.min_message_length, 8);
        assert_eq!(config.max_response_time, 86_400);
        assert_eq!(config.red_flag_patterns, FilterConfig::default().red_flag_patterns);
    }

    #[test]
    fn test_json_config() {
        let config = FilterConfig::from_json(
            r#"{"min_engagement_score": 0.7, "red_flag_patterns": ["onlyfans"]}"#,
        )
        .unwrap();
        assert_eq!(config.min_engagement_score, 0.7);
        assert_eq!(config.red_flag_patterns, vec!["onlyfans".to_string()]);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = FilterConfig {
            max_response_time: 30,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FilterConfig {
            min_engagement_score: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FilterConfig {
            min_message_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FilterConfig {
            max_one_word_ratio: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_sections_and_aliases() {
        let yaml = r#"
message_filter:
  min_question_ratio: 0.3
message_analyzer:
  filler_words: ["um", "erm"]
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.filter.min_question_ratio, 0.3);
        assert_eq!(settings.analyzer.filler_words, vec!["um", "erm"]);
        assert_eq!(
            settings.analyzer.engagement_indicators,
            AnalyzerConfig::default().engagement_indicators
        );
    }

    #[test]
    fn test_settings_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"filter": {{"max_one_word_ratio": 0.4}}}}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.filter.max_one_word_ratio, 0.4);
        assert_eq!(settings.filter.min_message_length, 5);
    }

    #[test]
    fn test_filter_config_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "max_response_time: 3600").unwrap();

        let config = FilterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_response_time, 3600);
    }
}
