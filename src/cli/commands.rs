//! Command handlers.
//!
//! Handlers write to a caller-supplied writer so they can be exercised
//! against the mock transport.

use std::io::Write;

use color_eyre::eyre::{eyre, Result};
use futures::StreamExt;

use super::args::AskArgs;
use crate::auth::AccountKey;
use crate::client::{ChatClient, ExchangeRequest, StreamHandle};
use crate::error::{classify_detail, error_for_status};
use crate::sse::StreamFrame;
use crate::traits::HttpClient;

/// Send a prompt and print the answer followed by its thread linkage.
pub async fn ask<C, W>(client: &ChatClient<C>, args: AskArgs, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    let stream = args.stream;
    let request = build_request(args);

    if stream {
        let prompt = request.prompt.clone();
        let handle = client.ask_stream(request).await?;
        return print_stream(handle, &prompt, out).await;
    }

    let result = client.ask(request).await?;
    if result.is_soft_empty() {
        return Err(eyre!("the backend returned no answer"));
    }

    writeln!(out, "{}", result.answer)?;
    writeln!(out)?;
    writeln!(out, "conversation: {}", result.conversation_id)?;
    writeln!(out, "parent:       {}", result.parent_id)?;
    Ok(())
}

/// Print one page of conversations, one per line.
pub async fn list<C, W>(client: &ChatClient<C>, offset: u32, limit: u32, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    let conversations = client
        .list_conversations(offset, limit, &AccountKey::default())
        .await?;

    for conversation in conversations {
        writeln!(
            out,
            "{}\t{}",
            conversation.id,
            conversation.title.as_deref().unwrap_or("(untitled)")
        )?;
    }
    Ok(())
}

fn build_request(args: AskArgs) -> ExchangeRequest {
    let mut request = ExchangeRequest::new(args.prompt);
    if let Some(conversation_id) = args.conversation_id {
        request = request.with_conversation(conversation_id);
    }
    if let Some(parent_id) = args.parent_id {
        request = request.with_parent(parent_id);
    }
    request
}

async fn print_stream<W: Write>(handle: StreamHandle, prompt: &str, out: &mut W) -> Result<()> {
    if !handle.is_success() {
        let status = handle.status();
        let mut body = String::new();
        let mut lines = handle.lines();
        while let Some(line) = lines.next().await {
            body.push_str(&line?);
            body.push('\n');
        }
        return Err(error_for_status(status, &body).into());
    }

    let mut frames = handle.frames();
    let mut printed = String::new();
    let mut linkage = None;

    while let Some(frame) = frames.next().await {
        match frame? {
            StreamFrame::Content(content) if content.text == prompt => {}
            StreamFrame::Content(content) => {
                write!(out, "{}", new_suffix(&printed, &content.text))?;
                out.flush()?;
                printed = content.text;
                linkage = Some((content.conversation_id, content.message_id));
            }
            StreamFrame::Error(error) => {
                if let Some(err) = classify_detail(&error.detail) {
                    return Err(err.into());
                }
            }
            StreamFrame::Ignored => {}
        }
    }

    writeln!(out)?;
    match linkage {
        Some((conversation_id, parent_id)) => {
            writeln!(out)?;
            writeln!(out, "conversation: {}", conversation_id)?;
            writeln!(out, "parent:       {}", parent_id)?;
            Ok(())
        }
        None => Err(eyre!("the backend returned no answer")),
    }
}

/// Part of `current` not yet printed. Each snapshot normally extends the
/// previous one; when it does not, the whole snapshot is new.
fn new_suffix<'a>(printed: &str, current: &'a str) -> &'a str {
    current.strip_prefix(printed).unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::client::test_support::{client, url, valid_token};
    use serde_json::json;

    fn content(text: &str) -> String {
        format!(
            "data: {}",
            json!({
                "message": {"id": "m1", "content": {"parts": [text]}},
                "conversation_id": "c1"
            })
        )
    }

    fn setup(response: MockResponse) -> ChatClient<MockHttpClient> {
        let http = MockHttpClient::new();
        http.set_default_response(response);
        let mut client = client(&http);
        client.add_account(valid_token(), None, false);
        client
    }

    fn args(prompt: &str, stream: bool) -> AskArgs {
        AskArgs {
            prompt: prompt.to_string(),
            stream,
            ..AskArgs::default()
        }
    }

    #[test]
    fn test_new_suffix() {
        assert_eq!(new_suffix("", "Hel"), "Hel");
        assert_eq!(new_suffix("Hel", "Hello"), "lo");
        assert_eq!(new_suffix("Hello", "Hello"), "");
        assert_eq!(new_suffix("Hello", "Goodbye"), "Goodbye");
    }

    #[tokio::test]
    async fn test_ask_prints_answer_and_linkage() {
        let client = setup(MockResponse::sse(&[content("Hi!"), "data: [DONE]".to_string()]));
        let mut out = Vec::new();
        ask(&client, args("Hello", false), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Hi!\n"));
        assert!(text.contains("conversation: c1"));
        assert!(text.contains("parent:       m1"));
    }

    #[tokio::test]
    async fn test_ask_stream_prints_increments() {
        let client = setup(MockResponse::sse(&[
            content("Hello"),
            content("The"),
            content("The answer"),
            "data: [DONE]".to_string(),
        ]));
        let mut out = Vec::new();
        ask(&client, args("Hello", true), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("The answer\n"));
    }

    #[tokio::test]
    async fn test_ask_stream_error_status() {
        let client = setup(MockResponse::json(
            429,
            json!({"detail": "Too many requests in 1 hour. Try again later."}),
        ));
        let mut out = Vec::new();
        let err = ask(&client, args("Hello", true), &mut out).await.unwrap_err();
        assert!(err.to_string().contains("rate limit"));
    }

    #[tokio::test]
    async fn test_ask_empty_answer_fails() {
        let client = setup(MockResponse::sse(&["data: [DONE]"]));
        let mut out = Vec::new();
        assert!(ask(&client, args("Hello", false), &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_list_prints_rows() {
        let http = MockHttpClient::new();
        http.set_response(
            &url("api/conversations?offset=0&limit=2"),
            MockResponse::json(
                200,
                json!({"items": [{"id": "c1", "title": "Trip"}, {"id": "c2", "title": null}]}),
            ),
        );
        let mut client = client(&http);
        client.add_account(valid_token(), None, false);

        let mut out = Vec::new();
        list(&client, 0, 2, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "c1\tTrip\nc2\t(untitled)\n");
    }
}
