//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`FixedPicker`] - Deterministic account selection

pub mod http;
pub mod picker;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use picker::FixedPicker;
