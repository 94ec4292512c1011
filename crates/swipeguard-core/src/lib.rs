//! SwipeGuard Core
//!
//! Core types and error handling shared across SwipeGuard components.
//!
//! This crate provides:
//! - The conversation data model handed over by the automation layer
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Conversation, Message, Sender};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Conversation, Message, Sender};
}
