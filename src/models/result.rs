use crate::auth::AccountKey;
use crate::sse::ContentFrame;

/// Outcome of a buffered exchange.
///
/// When the stream carried no usable answer the four string fields are all
/// empty; see [`ExchangeResult::is_soft_empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResult {
    pub answer: String,
    pub conversation_id: String,
    /// Id of the answer message; pass it as the parent of the next turn.
    pub parent_id: String,
    /// Model slug reported by the backend, or empty.
    pub model: String,
    /// Account the exchange was sent with.
    pub account: AccountKey,
}

impl ExchangeResult {
    pub(crate) fn from_frame(frame: ContentFrame, account: AccountKey) -> Self {
        Self {
            answer: frame.text,
            conversation_id: frame.conversation_id,
            parent_id: frame.message_id,
            model: frame.model.unwrap_or_default(),
            account,
        }
    }

    pub(crate) fn soft_empty(account: AccountKey) -> Self {
        Self {
            answer: String::new(),
            conversation_id: String::new(),
            parent_id: String::new(),
            model: String::new(),
            account,
        }
    }

    /// True when no answer was observed.
    pub fn is_soft_empty(&self) -> bool {
        self.answer.is_empty() && self.conversation_id.is_empty() && self.parent_id.is_empty()
    }
}
