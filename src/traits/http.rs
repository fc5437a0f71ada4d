//! HTTP seam of the chat client.
//!
//! The backend is reached with exactly two requests: `GET /welcome` for the
//! greeting and `POST /ask`, whose answer is read as a byte stream.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// Streamed response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Request headers, name to value.
pub type Headers = HashMap<String, String>;

/// A fully read response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

/// Transport failures.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Could not connect
    ConnectionFailed(String),
    /// The request outlived its timeout
    Timeout(String),
    /// The backend answered with a non-2xx status; `message` is the body
    ServerError { status: u16, message: String },
    /// The body stream broke off
    Io(String),
    /// The request could not be built
    InvalidUrl(String),
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Text shown to the shopper after `Error: `.
    ///
    /// A rejected request usually carries a JSON body like
    /// `{"error": "No question provided"}`; that message is preferred over
    /// the generic status line.
    pub fn detail(&self) -> String {
        if let HttpError::ServerError { message, .. } = self {
            if let Ok(serde_json::Value::Object(body)) =
                serde_json::from_str::<serde_json::Value>(message)
            {
                if let Some(serde_json::Value::String(error)) = body.get("error") {
                    return error.clone();
                }
            }
        }
        self.to_string()
    }
}

/// Requests the chat client makes.
///
/// Implemented by [`ReqwestHttpClient`](crate::adapters::ReqwestHttpClient)
/// in production and [`MockHttpClient`](crate::adapters::MockHttpClient) in
/// tests.
///
/// # Example
///
/// ```ignore
/// use shopbot::traits::{HttpClient, Headers, HttpError};
///
/// async fn greeting<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.get("http://localhost:5000/welcome", &Headers::new()).await?;
///     response.text().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` and read the whole body. Any status is returned as a
    /// [`Response`]; only transport problems are errors.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST `body` to `url` and hand back the response body as it arrives.
    ///
    /// A non-2xx status is reported as [`HttpError::ServerError`] carrying
    /// the response body, before any chunk is yielded.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
