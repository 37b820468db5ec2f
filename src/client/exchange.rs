//! Sending a prompt.
//!
//! An exchange picks an account, works out which conversation and parent
//! the prompt belongs to, and posts it. The answer arrives as an event
//! stream of cumulative snapshots. In buffered mode the stream is read to
//! the end and the last snapshot becomes the answer; in streaming mode the
//! unread body is handed to the caller.

use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::stream::StreamHandle;
use super::{to_body, Authorized, ChatClient, CONVERSATION_PATH};
use crate::auth::{AccountKey, AuthHeader};
use crate::error::{classify_body, classify_detail, error_for_status, ChatResult};
use crate::models::{ConversationRequest, ExchangeResult};
use crate::sse::{self, parse_frame, ContentFrame, StreamFrame};
use crate::thread::resolve_thread;
use crate::traits::{ByteStream, Headers, HttpClient, StreamResponse};

/// One prompt to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub prompt: String,
    /// Continue this conversation; `None` starts a new one.
    pub conversation_id: Option<String>,
    /// Reply to this message. Requires `conversation_id`. When absent for
    /// an existing conversation, the conversation's head is used.
    pub parent_id: Option<String>,
    /// Send with this account; `None` picks one.
    pub account: Option<AccountKey>,
    /// Return the unread body instead of the assembled answer.
    pub stream: bool,
}

impl ExchangeRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_account(mut self, account: impl Into<AccountKey>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Outcome of [`ChatClient::exchange`].
#[derive(Debug)]
pub enum Exchange {
    Streaming(StreamHandle),
    Complete(ExchangeResult),
}

impl Exchange {
    pub fn into_result(self) -> Option<ExchangeResult> {
        match self {
            Exchange::Complete(result) => Some(result),
            Exchange::Streaming(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<StreamHandle> {
        match self {
            Exchange::Streaming(handle) => Some(handle),
            Exchange::Complete(_) => None,
        }
    }
}

/// A posted exchange whose body has not been read.
struct Posted {
    response: StreamResponse,
    account: AccountKey,
    model: String,
}

impl<C: HttpClient> ChatClient<C> {
    /// Send `request`, streaming or buffered as it asks.
    pub async fn exchange(&self, request: ExchangeRequest) -> ChatResult<Exchange> {
        if request.stream {
            self.ask_stream(request).await.map(Exchange::Streaming)
        } else {
            self.ask(request).await.map(Exchange::Complete)
        }
    }

    /// Send `request` and read the whole answer.
    ///
    /// Fails on a known backend error, whether reported as the status or
    /// inside the stream. A stream without a usable answer is not an error:
    /// it yields a result whose fields are all empty.
    pub async fn ask(&self, request: ExchangeRequest) -> ChatResult<ExchangeResult> {
        let posted = self.post(&request).await?;

        if !posted.response.is_success() {
            let status = posted.response.status;
            let body = read_to_string(posted.response.body).await?;
            return Err(error_for_status(status, &body));
        }

        match last_answer(posted.response.body, &request.prompt).await? {
            Some(frame) => {
                debug!(
                    account = %posted.account,
                    conversation_id = %frame.conversation_id,
                    "Exchange complete"
                );
                Ok(ExchangeResult::from_frame(frame, posted.account))
            }
            None => {
                warn!(account = %posted.account, "Stream ended without an answer");
                Ok(ExchangeResult::soft_empty(posted.account))
            }
        }
    }

    /// Send `request` and return the body unread.
    pub async fn ask_stream(&self, request: ExchangeRequest) -> ChatResult<StreamHandle> {
        let posted = self.post(&request).await?;
        Ok(StreamHandle::new(posted.response, posted.account, posted.model))
    }

    async fn post(&self, request: &ExchangeRequest) -> ChatResult<Posted> {
        let auth = self.select_account(request.account.as_ref())?;

        let thread = resolve_thread(
            request.conversation_id.clone(),
            request.parent_id.clone(),
            |conversation_id| self.fetch_head(conversation_id, &auth),
        )
        .await?;

        let model = self.config.model_for(auth.paid).to_string();
        let new_thread = thread.is_new();
        let payload = ConversationRequest::next(request.prompt.clone(), thread, model.clone());
        let body = to_body(&payload)?;

        let url = self.config.endpoint(CONVERSATION_PATH);
        debug!(
            url = %url,
            account = %auth.key,
            model = %model,
            new_thread,
            stream = request.stream,
            "Sending exchange"
        );

        let response = self
            .http
            .post_stream(&url, &body, &self.exchange_headers(&auth.header))
            .await?;
        debug!(status = response.status, "Exchange response");

        Ok(Posted {
            response,
            account: auth.key,
            model,
        })
    }

    fn exchange_headers(&self, auth: &AuthHeader) -> Headers {
        let mut headers = self.json_headers(auth);
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert(
            "Accept-Language".to_string(),
            self.config.accept_language.clone(),
        );
        if let Some(referer) = &self.config.referer {
            headers.insert("Referer".to_string(), referer.clone());
        }
        headers
    }

    /// Current head node of a conversation, if it has one.
    async fn fetch_head(&self, conversation_id: String, auth: &Authorized) -> ChatResult<Option<String>> {
        let url = self.conversation_url(&conversation_id);
        let document = self.get_json(&url, &auth.header).await?;
        Ok(document
            .get("current_node")
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

/// Read a stream to its end and return the last content frame that is not
/// an echo of `prompt`.
async fn last_answer(body: ByteStream, prompt: &str) -> ChatResult<Option<ContentFrame>> {
    let mut lines = sse::lines(body);
    let mut answer = None;

    while let Some(line) = lines.next().await {
        let line = line?;

        if let Some(err) = classify_body(&line) {
            return Err(err);
        }

        match parse_frame(&line) {
            Some(StreamFrame::Content(frame)) if frame.text == prompt => {
                trace!("Skipping echoed prompt");
            }
            Some(StreamFrame::Content(frame)) => answer = Some(frame),
            Some(StreamFrame::Error(frame)) => match classify_detail(&frame.detail) {
                Some(err) => return Err(err),
                None => trace!(detail = %frame.detail, "Skipping unrecognized error frame"),
            },
            Some(StreamFrame::Ignored) | None => {}
        }
    }

    Ok(answer)
}

async fn read_to_string(body: ByteStream) -> ChatResult<String> {
    let mut body = body;
    let mut bytes = Vec::new();
    while let Some(chunk) = body.next().await {
        bytes.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
