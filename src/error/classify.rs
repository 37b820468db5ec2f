//! Mapping of backend error payloads to [`ChatError`] kinds.
//!
//! The backend reports failures as `{"detail": ...}` objects, either as the
//! whole response body or as a `data:` frame inside an event stream. Only a
//! fixed set of detail values is known; everything else is treated as a
//! non-fatal diagnostic and ignored.

use serde_json::Value;

use super::ChatError;
use crate::traits::HttpError;

/// Raw, non-JSON body the backend sends when it crashes.
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal Server Error";

const RATE_LIMITED: &str = "Too many requests in 1 hour. Try again later.";
const CONVERSATION_NOT_FOUND: &str = "Conversation not found";
const RELOAD_CONVERSATION: &str = "Something went wrong, please try reloading the conversation.";
const INVALID_API_KEY: &str = "invalid_api_key";
const INVALID_TOKEN: &str = "invalid_token";

/// Classify the value of a `detail` field.
///
/// Strings are matched exactly. Objects are matched on their `code` field,
/// the shape the backend uses for credential rejections.
pub fn classify_detail(detail: &Value) -> Option<ChatError> {
    match detail {
        Value::String(text) => classify_detail_text(text),
        Value::Object(fields) => fields
            .get("code")
            .and_then(Value::as_str)
            .and_then(classify_detail_text),
        _ => None,
    }
}

fn classify_detail_text(text: &str) -> Option<ChatError> {
    match text {
        RATE_LIMITED => Some(ChatError::RateLimited),
        CONVERSATION_NOT_FOUND => Some(ChatError::ConversationNotFound),
        RELOAD_CONVERSATION => Some(ChatError::BackendTransient),
        INVALID_API_KEY | INVALID_TOKEN => Some(ChatError::invalid_credential(text)),
        _ => None,
    }
}

/// Classify a raw body (or a single body line) that is not JSON.
pub fn classify_body(body: &str) -> Option<ChatError> {
    (body.trim() == INTERNAL_SERVER_ERROR_BODY).then_some(ChatError::BackendInternal)
}

/// Classify a whole non-streamed error body: the raw crash text, or a JSON
/// object with a known `detail`.
pub fn classify_error_body(body: &str) -> Option<ChatError> {
    if let Some(err) = classify_body(body) {
        return Some(err);
    }
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    value.get("detail").and_then(classify_detail)
}

/// The error for a non-2xx response: a recognized backend error when the
/// body carries one, otherwise the raw status and body.
pub fn error_for_status(status: u16, body: &str) -> ChatError {
    classify_error_body(body).unwrap_or_else(|| {
        ChatError::Transport(HttpError::ServerError {
            status,
            message: body.trim().to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_details() {
        assert_eq!(
            classify_detail(&json!("Too many requests in 1 hour. Try again later.")),
            Some(ChatError::RateLimited)
        );
        assert_eq!(
            classify_detail(&json!("Conversation not found")),
            Some(ChatError::ConversationNotFound)
        );
        assert_eq!(
            classify_detail(&json!(
                "Something went wrong, please try reloading the conversation."
            )),
            Some(ChatError::BackendTransient)
        );
        assert!(matches!(
            classify_detail(&json!("invalid_api_key")),
            Some(ChatError::InvalidCredential { .. })
        ));
        assert!(matches!(
            classify_detail(&json!("invalid_token")),
            Some(ChatError::InvalidCredential { .. })
        ));
    }

    #[test]
    fn test_unknown_details_are_skipped() {
        assert_eq!(classify_detail(&json!("Only one message at a time.")), None);
        assert_eq!(classify_detail(&json!("conversation not found")), None);
        assert_eq!(classify_detail(&json!(42)), None);
        assert_eq!(classify_detail(&Value::Null), None);
    }

    #[test]
    fn test_object_detail_uses_code() {
        let detail = json!({"message": "Your token is invalid", "code": "invalid_token"});
        assert!(matches!(
            classify_detail(&detail),
            Some(ChatError::InvalidCredential { .. })
        ));
        assert_eq!(classify_detail(&json!({"message": "no code"})), None);
    }

    #[test]
    fn test_internal_server_error_body() {
        assert_eq!(
            classify_body("Internal Server Error"),
            Some(ChatError::BackendInternal)
        );
        assert_eq!(
            classify_body("Internal Server Error\n"),
            Some(ChatError::BackendInternal)
        );
        assert_eq!(classify_body("Internal Server Error: db down"), None);
    }

    #[test]
    fn test_error_body() {
        assert_eq!(
            classify_error_body(r#"{"detail":"Conversation not found"}"#),
            Some(ChatError::ConversationNotFound)
        );
        assert_eq!(
            classify_error_body("Internal Server Error"),
            Some(ChatError::BackendInternal)
        );
        assert_eq!(classify_error_body("<html>bad gateway</html>"), None);
        assert_eq!(classify_error_body(r#"{"detail":"nope"}"#), None);
    }

    #[test]
    fn test_error_for_status() {
        assert_eq!(
            error_for_status(404, r#"{"detail":"Conversation not found"}"#),
            ChatError::ConversationNotFound
        );
        assert_eq!(
            error_for_status(500, "Internal Server Error"),
            ChatError::BackendInternal
        );
        assert_eq!(
            error_for_status(502, " bad gateway "),
            ChatError::Transport(HttpError::ServerError {
                status: 502,
                message: "bad gateway".to_string()
            })
        );
    }
}
