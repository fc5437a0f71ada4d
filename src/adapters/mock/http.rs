//! Mock HTTP client for testing.
//!
//! Serves scripted greetings and scripted answer streams, and records every
//! request so tests can check the form body and headers that were sent.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A request the chat client made.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// GET or POST
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// Form body of a POST
    pub body: Option<String>,
}

/// What the mock answers for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A complete response to a GET
    Success(Response),
    /// Fail the request before any body is read
    Error(HttpError),
    /// Answer a POST with these chunks
    Stream(Vec<Bytes>),
    /// Yield the chunks, then fail mid-stream
    StreamThenError(Vec<Bytes>, HttpError),
}

impl MockResponse {
    /// A stream whose chunks are the given strings.
    pub fn stream<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|chunk| Bytes::from(chunk.into()))
                .collect(),
        )
    }

    /// A 200 response with a JSON body.
    pub fn json(body: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(200, body.to_string()))
    }
}

/// Mock HTTP client for testing. Responses are matched by exact URL.
///
/// # Example
///
/// ```ignore
/// use shopbot::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:5000/ask",
///     MockResponse::stream(["data: {\"response\": \"Hi\"}\n", "data: [DONE]\n"]),
/// );
///
/// let requests = client.get_requests();
/// assert_eq!(requests[0].body.as_deref(), Some("question=hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to `url` with `response`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Requests made so far, oldest first.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
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

    fn response_for(&self, url: &str) -> Result<MockResponse, HttpError> {
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::Other(format!("No mock response for URL: {}", url)))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);

        match self.response_for(url)? {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
            MockResponse::Stream(_) | MockResponse::StreamThenError(..) => {
                Err(HttpError::Other("Stream response on non-stream request".to_string()))
            }
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.response_for(url)? {
            MockResponse::Stream(chunks) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok));
                Ok(Box::pin(stream))
            }
            MockResponse::StreamThenError(chunks, err) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            MockResponse::Error(err) => Err(err),
            MockResponse::Success(_) => {
                Err(HttpError::Other("Non-stream response on stream request".to_string()))
            }
        }
    }
}
