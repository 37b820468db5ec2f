//! Conversation thread linkage.
//!
//! Every message sent to the backend names the conversation it belongs to
//! and the message it replies to. A reply to an existing conversation
//! without an explicit parent is attached to the conversation's current
//! head node.

use std::future::Future;

use tracing::warn;
use uuid::Uuid;

use crate::error::{ChatError, ChatResult};

/// Where the next message goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRef {
    /// `None` starts a new conversation.
    pub conversation_id: Option<String>,
    pub parent_id: String,
}

impl ThreadRef {
    /// A fresh thread with a random parent placeholder.
    pub fn new_thread() -> Self {
        Self {
            conversation_id: None,
            parent_id: new_random_id(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.conversation_id.is_none()
    }
}

/// A random UUID v4 in hyphenated form.
pub fn new_random_id() -> String {
    Uuid::new_v4().to_string()
}

/// Decide the conversation and parent for the next message.
///
/// `fetch_head` is called only when a conversation is given without a
/// parent. If it fails or finds no head, a new thread is started instead;
/// that failure is logged and never returned.
pub async fn resolve_thread<F, Fut>(
    conversation_id: Option<String>,
    parent_id: Option<String>,
    fetch_head: F,
) -> ChatResult<ThreadRef>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = ChatResult<Option<String>>>,
{
    match (conversation_id, parent_id) {
        (None, Some(_)) => Err(ChatError::InvalidArgument(
            "parent requires conversation".to_string(),
        )),
        (None, None) => Ok(ThreadRef::new_thread()),
        (Some(conversation_id), Some(parent_id)) => Ok(ThreadRef {
            conversation_id: Some(conversation_id),
            parent_id,
        }),
        (Some(conversation_id), None) => match fetch_head(conversation_id.clone()).await {
            Ok(Some(head)) => Ok(ThreadRef {
                conversation_id: Some(conversation_id),
                parent_id: head,
            }),
            Ok(None) => {
                warn!(
                    conversation_id = %conversation_id,
                    "Conversation has no head node, starting a new thread"
                );
                Ok(ThreadRef::new_thread())
            }
            Err(e) => {
                warn!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Failed to fetch conversation head, starting a new thread"
                );
                Ok(ThreadRef::new_thread())
            }
        },
    }
}
