//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors, and records every request it receives.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response, StreamResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST and PATCH requests)
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response. On a streaming request the body is
    /// delivered as a single chunk.
    Success(Response),
    /// Fail before any response is produced
    Error(HttpError),
    /// Return a streamed body split into the given chunks
    Stream { status: u16, chunks: Vec<Bytes> },
    /// Deliver the chunks, then fail while reading the body
    BrokenStream {
        status: u16,
        chunks: Vec<Bytes>,
        error: HttpError,
    },
}

impl MockResponse {
    /// A 200 event-stream body made of the given lines.
    pub fn sse<S: AsRef<str>>(lines: &[S]) -> Self {
        let chunks = lines
            .iter()
            .map(|line| Bytes::from(format!("{}\n", line.as_ref())))
            .collect();
        MockResponse::Stream {
            status: 200,
            chunks,
        }
    }

    /// A buffered JSON response.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(value.to_string())))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by method and URL first, then by URL alone
/// (exact match, then longest matching prefix), then the default.
///
/// # Example
///
/// ```ignore
/// use webchat::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_method_response(
///     "GET",
///     "https://backend.test/api/conversation/c1",
///     MockResponse::json(200, serde_json::json!({"current_node": "n1"})),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    method_responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL regardless of method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a response for one method on an exact URL.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        let mut responses = self.method_responses.lock().unwrap();
        responses.insert((method.to_string(), url.to_string()), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the recorded requests made with `method`.
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        {
            let by_method = self.method_responses.lock().unwrap();
            if let Some(response) = by_method.get(&(method.to_string(), url.to_string())) {
                return Some(response.clone());
            }
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let by_prefix = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if by_prefix.is_some() {
            return by_prefix;
        }

        self.default_response.lock().unwrap().clone()
    }

    fn buffered(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream { status, chunks }) => {
                let body: Vec<u8> = chunks.iter().flat_map(|c| c.to_vec()).collect();
                Ok(Response::new(status, Bytes::from(body)))
            }
            Some(MockResponse::BrokenStream { error, .. }) => Err(error),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.buffered("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.buffered("POST", url)
    }

    async fn patch(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("PATCH", url, headers, Some(body.to_string()));
        self.buffered("PATCH", url)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamResponse, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.get_response("POST", url) {
            Some(MockResponse::Stream { status, chunks }) => {
                let stream: ByteStream = Box::pin(futures::stream::iter(
                    chunks.into_iter().map(Ok::<Bytes, HttpError>),
                ));
                Ok(StreamResponse::new(status, stream))
            }
            Some(MockResponse::BrokenStream {
                status,
                chunks,
                error,
            }) => {
                let items = chunks
                    .into_iter()
                    .map(Ok::<Bytes, HttpError>)
                    .chain(std::iter::once(Err(error)));
                let stream: ByteStream = Box::pin(futures::stream::iter(items));
                Ok(StreamResponse::new(status, stream))
            }
            Some(MockResponse::Success(response)) => {
                let body = std::iter::once(Ok::<Bytes, HttpError>(response.body));
                let stream: ByteStream = Box::pin(futures::stream::iter(body));
                Ok(StreamResponse::new(response.status, stream))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/test",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client
            .get("https://example.com/test", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "https://example.com/test");
    }

    #[tokio::test]
    async fn test_method_response_wins_over_url_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/api/conversation",
            MockResponse::sse(&["data: [DONE]"]),
        );
        client.set_method_response(
            "GET",
            "https://example.com/api/conversation/c1",
            MockResponse::json(200, serde_json::json!({"current_node": "n1"})),
        );

        let head = client
            .get("https://example.com/api/conversation/c1", &Headers::new())
            .await
            .unwrap();
        assert_eq!(head.text().unwrap(), r#"{"current_node":"n1"}"#);
    }

    #[tokio::test]
    async fn test_longest_prefix_match() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/api",
            MockResponse::Success(Response::new(200, Bytes::from("short"))),
        );
        client.set_response(
            "https://example.com/api/conversations",
            MockResponse::Success(Response::new(200, Bytes::from("long"))),
        );

        let response = client
            .get("https://example.com/api/conversations?offset=0", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.body, Bytes::from("long"));
    }

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/stream",
            MockResponse::Stream {
                status: 200,
                chunks: vec![Bytes::from("chunk1"), Bytes::from("chunk2")],
            },
        );

        let response = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let chunks: Vec<_> = response.body.collect().await;
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].as_ref().unwrap(), &Bytes::from("chunk2"));
    }

    #[tokio::test]
    async fn test_broken_stream_ends_with_error() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::BrokenStream {
            status: 200,
            chunks: vec![Bytes::from("data: {}\n")],
            error: HttpError::Io("reset".to_string()),
        });

        let response = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await
            .unwrap();
        let items: Vec<_> = response.body.collect().await;
        assert!(items[0].is_ok());
        assert_eq!(items[1], Err(HttpError::Io("reset".to_string())));
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client
            .get("https://example.com/missing", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_patch_recorded_with_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, serde_json::json!({"success": true})));

        client
            .patch("https://example.com/x", r#"{"title":"t"}"#, &Headers::new())
            .await
            .unwrap();

        let patches = client.requests_with_method("PATCH");
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].json_body().unwrap()["title"], "t");
    }
}
