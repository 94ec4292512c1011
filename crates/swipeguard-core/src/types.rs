//! Core types for SwipeGuard

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sender {
    /// The account owner running the automation
    #[default]
    #[serde(rename = "self", alias = "user")]
    SelfUser,

    /// The match on the other side of the conversation
    #[serde(rename = "other", alias = "match")]
    Match,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message body
    #[serde(alias = "content")]
    pub text: String,

    /// Send time in epoch seconds (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Message author
    #[serde(default)]
    pub sender: Sender,
}

impl Message {
    /// Create a message without a timestamp
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: None,
            sender,
        }
    }

    /// Create a message sent by the account owner
    pub fn from_self(text: impl Into<String>) -> Self {
        Self::new(Sender::SelfUser, text)
    }

    /// Create a message sent by the match
    pub fn from_match(text: impl Into<String>) -> Self {
        Self::new(Sender::Match, text)
    }

    /// Attach a timestamp
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// An ordered conversation; position is the only identity a message has
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a conversation from plain texts, alternating senders starting with the owner
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let sender = if i % 2 == 0 {
                    Sender::SelfUser
                } else {
                    Sender::Match
                };
                Message::new(sender, text)
            })
            .collect();

        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message texts in conversation order
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    /// Messages written by one side of the conversation
    pub fn by_sender(&self, sender: Sender) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.sender == sender)
    }

    /// Timestamps in conversation order.
    ///
    /// Returns `None` when no message is timestamped. A conversation where only
    /// some messages carry a timestamp is rejected.
    pub fn timestamps(&self) -> Result<Option<Vec<i64>>> {
        let stamped = self
            .messages
            .iter()
            .filter(|m| m.timestamp.is_some())
            .count();

        if stamped == 0 {
            return Ok(None);
        }

        if stamped != self.messages.len() {
            return Err(Error::invalid_input(format!(
                "partial timestamps: {} of {} messages are timestamped",
                stamped,
                self.messages.len()
            )));
        }

        Ok(Some(self.messages.iter().filter_map(|m| m.timestamp).collect()))
    }

    /// Reject timestamp sequences that go backwards in time.
    ///
    /// Scoring itself tolerates unordered timestamps; this is for callers that
    /// want to refuse such input up front.
    pub fn validate_timestamps(&self) -> Result<()> {
        if let Some(timestamps) = self.timestamps()? {
            if let Some(i) = timestamps.windows(2).position(|w| w[1] < w[0]) {
                return Err(Error::invalid_input(format!(
                    "timestamp at position {} precedes the one before it",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<Message> for Conversation {
    fn from_iter<T: IntoIterator<Item = Message>>(iter: T) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_aliases() {
        let json = r#"[
            {"content": "Hi!", "sender": "user"},
            {"text": "Hey", "timestamp": 1620984900, "sender": "match"},
            {"text": "How are you?", "sender": "other"}
        ]"#;
        let messages: Vec<Message> = serde_json::from_str(json).unwrap();

        assert_eq!(messages[0].sender, Sender::SelfUser);
        assert_eq!(messages[0].text, "Hi!");
        assert_eq!(messages[1].sender, Sender::Match);
        assert_eq!(messages[1].timestamp, Some(1620984900));
        assert_eq!(messages[2].sender, Sender::Match);
    }

    #[test]
    fn test_sender_defaults_to_self() {
        let message: Message = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(message.sender, Sender::SelfUser);
        assert_eq!(message.timestamp, None);
    }

    #[test]
    fn test_timestamps_absent() {
        let conversation = Conversation::from_texts(["hi", "hello"]);
        assert_eq!(conversation.timestamps().unwrap(), None);
    }

    #[test]
    fn test_timestamps_complete() {
        let conversation: Conversation = vec![
            Message::from_self("hi").at(100),
            Message::from_match("hello").at(160),
        ]
        .into_iter()
        .collect();

        assert_eq!(conversation.timestamps().unwrap(), Some(vec![100, 160]));
    }

    #[test]
    fn test_partial_timestamps_rejected() {
        let conversation: Conversation = vec![
            Message::from_self("hi").at(100),
            Message::from_match("hello"),
        ]
        .into_iter()
        .collect();

        let err = conversation.timestamps().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_validate_timestamps_order() {
        let ordered: Conversation = vec![
            Message::from_self("a").at(10),
            Message::from_match("b").at(10),
            Message::from_self("c").at(20),
        ]
        .into_iter()
        .collect();
        assert!(ordered.validate_timestamps().is_ok());

        let unordered: Conversation = vec![
            Message::from_self("a").at(30),
            Message::from_match("b").at(20),
        ]
        .into_iter()
        .collect();
        assert!(unordered.validate_timestamps().is_err());
    }

    #[test]
    fn test_from_texts_alternates_senders() {
        let conversation = Conversation::from_texts(["a", "b", "c"]);
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.by_sender(Sender::SelfUser).count(), 2);
        assert_eq!(conversation.by_sender(Sender::Match).count(), 1);
        assert_eq!(conversation.texts(), vec!["a", "b", "c"]);
    }
}
