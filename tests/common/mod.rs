//! Common test utilities for integration tests.
//!
//! Token builders, event-stream body builders and client constructors
//! shared by the wiremock and mock-transport tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{content_line, sse_body, valid_token};
//!
//! let body = sse_body(&[content_line("Hello", "conv-1", "msg-1")]);
//! ```

#![allow(dead_code)]

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::json;
use webchat::{ChatClient, ClientConfig};

/// A three-segment token carrying the given claims JSON.
pub fn token_with_claims(claims: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims);
    let signature = URL_SAFE_NO_PAD.encode("test-signature");
    format!("{}.{}.{}", header, payload, signature)
}

/// A token valid for the next hour.
pub fn valid_token() -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    token_with_claims(&format!(r#"{{"exp":{},"sub":"test-user"}}"#, exp))
}

/// A token that expired long ago.
pub fn expired_token() -> String {
    token_with_claims(r#"{"exp":1000,"sub":"test-user"}"#)
}

/// A `data:` line carrying an answer snapshot.
pub fn content_line(text: &str, conversation_id: &str, message_id: &str) -> String {
    format!(
        "data: {}",
        json!({
            "message": {
                "id": message_id,
                "author": {"role": "assistant"},
                "content": {"content_type": "text", "parts": [text]},
                "metadata": {"model_slug": "text-davinci-002-render-sha"}
            },
            "conversation_id": conversation_id,
            "error": null
        })
    )
}

/// A `data:` line carrying an error detail.
pub fn detail_line(detail: &str) -> String {
    format!("data: {}", json!({ "detail": detail }))
}

/// An event-stream body: each line followed by a blank line, then the
/// terminator.
pub fn sse_body(lines: &[String]) -> String {
    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push_str("\n\n");
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// A reqwest-backed client pointed at `base_url` with one free account.
pub fn client_for(base_url: &str) -> ChatClient {
    let config = ClientConfig::new().with_base_url(base_url);
    let mut client = ChatClient::new(config).expect("client builds");
    client.add_account(valid_token(), None, false);
    client
}
