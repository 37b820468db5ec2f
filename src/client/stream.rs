//! Live handle over a streamed exchange.

use std::fmt;
use std::pin::Pin;

use futures::future;
use futures::stream::{Stream, StreamExt};

use crate::auth::AccountKey;
use crate::sse::{self, is_done_marker, parse_frame, LineStream, StreamFrame};
use crate::traits::{ByteStream, HttpError, StreamResponse};

/// Stream of decoded frames, ending at `data: [DONE]` or end of body.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<StreamFrame, HttpError>> + Send>>;

/// The unread body of a streamed exchange.
///
/// Nothing has been read when the handle is returned; the status is
/// whatever the backend answered, error statuses included. Dropping the
/// handle closes the connection.
pub struct StreamHandle {
    status: u16,
    account: AccountKey,
    model: String,
    body: ByteStream,
}

impl StreamHandle {
    pub(crate) fn new(response: StreamResponse, account: AccountKey, model: String) -> Self {
        Self {
            status: response.status,
            account,
            model,
            body: response.body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Account the exchange was sent with.
    pub fn account(&self) -> &AccountKey {
        &self.account
    }

    /// Model that was requested.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The body as raw chunks.
    pub fn into_bytes(self) -> ByteStream {
        self.body
    }

    /// The body split into lines.
    pub fn lines(self) -> LineStream {
        sse::lines(self.body)
    }

    /// The body decoded into frames. Lines that are not frames are dropped.
    pub fn frames(self) -> FrameStream {
        let frames = self
            .lines()
            .take_while(|line| future::ready(!matches!(line, Ok(line) if is_done_marker(line))))
            .filter_map(|line| {
                future::ready(match line {
                    Ok(line) => parse_frame(&line).map(Ok),
                    Err(e) => Some(Err(e)),
                })
            });
        Box::pin(frames)
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("status", &self.status)
            .field("account", &self.account)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
