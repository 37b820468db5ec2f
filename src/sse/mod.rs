//! Conversation event stream decoding.
//!
//! # Module structure
//! - `frame` - Frame types (StreamFrame, ContentFrame, ErrorFrame)
//! - `parser` - One-line decoding (parse_frame, is_done_marker)
//! - `lines` - Lazy line splitting over a byte stream

mod frame;
mod lines;
mod parser;

pub use frame::{ContentFrame, ErrorFrame, StreamFrame};
pub use lines::{lines, LineStream};
pub use parser::{is_done_marker, parse_frame};
