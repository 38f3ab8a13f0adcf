//! Transcript message types for Confab.
//!
//! These types model one conversation: the role enumeration, a single
//! message turn, and the `Transcript` shape used for export/import.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a message stored in the transcript.
///
/// Only `user` and `assistant` turns are ever stored; the system prompt
/// lives in its own session field and never appears as a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single conversation turn.
///
/// Messages are ordered by insertion within a transcript; `content` may be
/// empty and has no enforced length limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The transcript export shape.
///
/// Serializes to exactly the transfer format:
/// `{"messages": [{"role", "content"}, ...], "system_prompt": "..."}`.
/// Field order is stable for readability of exported files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub messages: Vec<Message>,
    pub system_prompt: String,
}
