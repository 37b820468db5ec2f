//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`RandomPicker`] - Uniform random account selection
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::FixedPicker`] - Deterministic account selection

pub mod mock;
pub mod random_picker;
pub mod reqwest_http;

pub use mock::{FixedPicker, MockHttpClient, MockResponse};
pub use random_picker::RandomPicker;
pub use reqwest_http::ReqwestHttpClient;
