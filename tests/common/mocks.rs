//! Mock transport configurations.
//!
//! Re-exports the mock implementations from `webchat::adapters::mock` and
//! adds a builder for common response setups.

#[allow(unused_imports)]
pub use webchat::adapters::mock::{FixedPicker, MockHttpClient};

use webchat::adapters::mock::MockResponse;
use webchat::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response for one method and URL.
    pub fn with_json(self, method: &str, url: &str, status: u16, json: serde_json::Value) -> Self {
        self.client
            .set_method_response(method, url, MockResponse::json(status, json));
        self
    }

    /// Configures an event-stream answer for a prompt URL.
    pub fn with_sse(self, url: &str, lines: &[String]) -> Self {
        self.client
            .set_method_response("POST", url, MockResponse::sse(lines));
        self
    }

    /// Configures a raw body for a URL regardless of method.
    pub fn with_raw(self, url: &str, status: u16, body: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(body.to_string()))),
        );
        self
    }

    /// Configures a transport failure for a URL regardless of method.
    pub fn with_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
