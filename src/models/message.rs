use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author role of an outbound message. Only user turns are ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
}

/// Message content: a typed list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    pub content_type: String,
    pub parts: Vec<String>,
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            parts: vec![text.into()],
        }
    }
}

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// A user message with a fresh id and a single text part.
    pub fn user(prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: MessageContent::text(prompt),
        }
    }

    /// The first text part.
    pub fn text(&self) -> &str {
        self.content.parts.first().map(String::as_str).unwrap_or("")
    }
}
