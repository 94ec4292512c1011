//! Loading settings and conversation files

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use swipeguard_classifiers::Settings;
use swipeguard_core::Conversation;
use tracing::info;

/// Load settings from `path`, or defaults when no file is given
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            let settings = Settings::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?;
            info!("Loaded settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

/// Read a JSON object mapping match name to conversation
pub fn load_conversations(path: &Path) -> Result<BTreeMap<String, Conversation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let conversations: BTreeMap<String, Conversation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid conversation file {}", path.display()))?;

    info!("Loaded {} conversations", conversations.len());
    Ok(conversations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use swipeguard_core::Sender;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_conversations() {
        let file = temp_file(
            ".json",
            r#"{
                "alex": {"messages": [
                    {"text": "Hey! How was the concert?", "timestamp": 100, "sender": "self"},
                    {"content": "Amazing, thanks", "timestamp": 400, "sender": "match"}
                ]},
                "sam": {"messages": []}
            }"#,
        );

        let conversations = load_conversations(file.path()).unwrap();
        assert_eq!(conversations.len(), 2);

        let alex = &conversations["alex"];
        assert_eq!(alex.texts(), vec!["Hey! How was the concert?", "Amazing, thanks"]);
        assert_eq!(alex.messages[1].sender, Sender::Match);
        assert_eq!(alex.timestamps().unwrap(), Some(vec![100, 400]));
        assert!(conversations["sam"].is_empty());
    }

    #[test]
    fn test_invalid_conversation_file() {
        let file = temp_file(".json", r#"{"alex": "not a conversation"}"#);
        let err = load_conversations(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid conversation file"));
    }

    #[test]
    fn test_settings_default_without_file() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_from_yaml() {
        let file = temp_file(
            ".yaml",
            "message_filter:\n  min_engagement_score: 0.7\n",
        );
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.filter.min_engagement_score, 0.7);
        assert_eq!(settings.filter.min_message_length, 5);
    }
}
