use serde::{Deserialize, Serialize};
use std::fmt;

use extract::PaperMetadata;

/// Text recorded for a turn whose model call failed.
pub const FALLBACK_MESSAGE: &str = "Error: Unable to fetch response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Host,
    Guest,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Host => write!(f, "Host"),
            Speaker::Guest => write!(f, "Guest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub message: String,
    /// Set when the message is filler standing in for a failed model call.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl ConversationTurn {
    pub fn new(speaker: Speaker, message: impl Into<String>) -> Self {
        Self {
            speaker,
            message: message.into(),
            degraded: false,
        }
    }

    pub fn degraded(speaker: Speaker) -> Self {
        Self {
            speaker,
            message: FALLBACK_MESSAGE.to_string(),
            degraded: true,
        }
    }
}

/// The finished podcast script, in speaking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub conversation: Vec<ConversationTurn>,
    pub title: String,
    pub topic: String,
}

impl Transcript {
    pub fn degraded_turns(&self) -> usize {
        self.conversation.iter().filter(|t| t.degraded).count()
    }
}

/// Append-only accumulator; turns keep the order they were pushed in.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    turns: Vec<ConversationTurn>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn finish(self, metadata: &PaperMetadata) -> Transcript {
        Transcript {
            conversation: self.turns,
            title: metadata.title.clone(),
            topic: metadata.topic.clone(),
        }
    }
}
