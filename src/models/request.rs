use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::thread::ThreadRef;

/// Body of `POST /api/conversation`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationRequest {
    /// Always `"next"`.
    pub action: String,
    pub messages: Vec<Message>,
    /// Serialized as `null` for a new conversation.
    pub conversation_id: Option<String>,
    pub parent_message_id: String,
    pub model: String,
}

impl ConversationRequest {
    /// A request sending `prompt` into `thread`.
    pub fn next(prompt: impl Into<String>, thread: ThreadRef, model: impl Into<String>) -> Self {
        Self {
            action: "next".to_string(),
            messages: vec![Message::user(prompt)],
            conversation_id: thread.conversation_id,
            parent_message_id: thread.parent_id,
            model: model.into(),
        }
    }
}

/// Body of `POST /api/conversation/gen_title/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleRequest {
    pub message_id: String,
    pub model: String,
}

/// Body of `PATCH /api/conversation/{id}` when renaming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameRequest {
    pub title: String,
}

/// Body of the hide (delete) calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisibilityRequest {
    pub is_visible: bool,
}

impl VisibilityRequest {
    pub fn hidden() -> Self {
        Self { is_visible: false }
    }
}
