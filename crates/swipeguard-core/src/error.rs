//! Error types for SwipeGuard

/// Result type alias using SwipeGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SwipeGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid filter or analyzer configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Scorer or classifier construction errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Caller supplied a malformed conversation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem errors while loading configuration or conversations
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("max_response_time must be at least 60 seconds");
        assert_eq!(
            err.to_string(),
            "configuration error: max_response_time must be at least 60 seconds"
        );

        let err = Error::invalid_input("partial timestamps");
        assert_eq!(err.to_string(), "invalid input: partial timestamps");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
