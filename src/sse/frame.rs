//! Frame types carried by `data:` lines of a conversation stream.

use serde_json::Value;

/// One decoded `data:` line.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// A snapshot of the answer so far, with thread linkage.
    Content(ContentFrame),
    /// A `{"detail": ...}` object reported mid-stream.
    Error(ErrorFrame),
    /// A JSON object of neither shape.
    Ignored,
}

/// Answer snapshot.
///
/// Each content frame carries the whole answer generated so far, not a
/// delta, so the last one seen is the complete answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFrame {
    /// First content part. Never empty.
    pub text: String,
    pub conversation_id: String,
    /// Id of the assistant message; the parent of the next turn.
    pub message_id: String,
    /// `message.metadata.model_slug`, when present.
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorFrame {
    pub detail: Value,
}

impl StreamFrame {
    pub fn as_content(&self) -> Option<&ContentFrame> {
        match self {
            StreamFrame::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, StreamFrame::Content(_))
    }
}
