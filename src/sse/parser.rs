//! Single-line frame parser.
//!
//! The conversation stream is a sequence of `data: <json>` lines separated
//! by blank lines, terminated by `data: [DONE]`. Anything that does not
//! decode cleanly is dropped rather than treated as an error: the backend
//! interleaves keep-alives and diagnostics with real frames.

use serde_json::Value;

use super::frame::{ContentFrame, ErrorFrame, StreamFrame};

const DATA_PREFIX: &str = "data: ";
const DONE_PAYLOAD: &str = "[DONE]";

/// Decode one line. `None` means the line is not a frame.
pub fn parse_frame(line: &str) -> Option<StreamFrame> {
    let payload = data_payload(line)?;
    if payload == DONE_PAYLOAD {
        return None;
    }

    let value: Value = serde_json::from_str(payload).ok()?;
    if !value.is_object() {
        return None;
    }

    if let Some(content) = content_frame(&value) {
        return Some(StreamFrame::Content(content));
    }

    match value.get("detail") {
        Some(detail) => Some(StreamFrame::Error(ErrorFrame {
            detail: detail.clone(),
        })),
        None => Some(StreamFrame::Ignored),
    }
}

/// Whether `line` is the `data: [DONE]` terminator.
pub fn is_done_marker(line: &str) -> bool {
    data_payload(line) == Some(DONE_PAYLOAD)
}

fn data_payload(line: &str) -> Option<&str> {
    line.trim().strip_prefix(DATA_PREFIX)
}

fn content_frame(value: &Value) -> Option<ContentFrame> {
    let text = value
        .pointer("/message/content/parts/0")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())?;
    let conversation_id = value.get("conversation_id").and_then(Value::as_str)?;
    let message_id = value.pointer("/message/id").and_then(Value::as_str)?;
    let model = value
        .pointer("/message/metadata/model_slug")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(ContentFrame {
        text: text.to_string(),
        conversation_id: conversation_id.to_string(),
        message_id: message_id.to_string(),
        model,
    })
}
