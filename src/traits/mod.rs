//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PATCH, streaming)
//! - [`AccountPicker`] - Selection among registered accounts

pub mod http;
pub mod picker;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, StreamResponse};
pub use picker::AccountPicker;
