//! Caller-supplied conversation history
//!
//! Prior turns are forwarded to the LLM as-is. Nothing is stored here: the
//! conversation lives with the caller and the LLM provider.

use serde::{Deserialize, Serialize};

/// Number of recent turns forwarded to the LLM
pub const MAX_HISTORY_TURNS: usize = 10;

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    #[serde(alias = "model", alias = "assistant")]
    Agent,
}

/// A single prior turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Agent,
            content: content.into(),
        }
    }
}

/// Keep the most recent non-empty turns, oldest first.
pub fn recent_turns(turns: &[ConversationTurn], max: usize) -> Vec<ConversationTurn> {
    let mut recent: Vec<ConversationTurn> = turns
        .iter()
        .rev()
        .filter(|t| !t.content.trim().is_empty())
        .take(max)
        .cloned()
        .collect();
    recent.reverse();
    recent
}
