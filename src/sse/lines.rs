//! Lazy line splitting over a response body.

use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

use crate::traits::{ByteStream, HttpError};

/// Stream of decoded body lines.
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String, HttpError>> + Send>>;

struct LineState {
    body: ByteStream,
    buffer: Vec<u8>,
    finished: bool,
}

/// Split `body` into lines as chunks arrive.
///
/// Lines end at `\n`; a trailing `\r` is dropped. Bytes are buffered until
/// the line is complete, so characters split across chunks decode intact.
/// Invalid UTF-8 is replaced rather than rejected. A final line without a
/// terminator is yielded when the body ends. A body error is yielded once
/// and ends the stream.
pub fn lines(body: ByteStream) -> LineStream {
    let state = LineState {
        body,
        buffer: Vec::new(),
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if let Some(pos) = state.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = state.buffer.drain(..=pos).collect();
                return Some((Ok(decode_line(&line[..pos])), state));
            }

            if state.finished {
                if state.buffer.is_empty() {
                    return None;
                }
                let rest = std::mem::take(&mut state.buffer);
                return Some((Ok(decode_line(&rest)), state));
            }

            match state.body.next().await {
                Some(Ok(chunk)) => state.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    state.finished = true;
                    state.buffer.clear();
                    return Some((Err(e), state));
                }
                None => state.finished = true,
            }
        }
    }))
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
