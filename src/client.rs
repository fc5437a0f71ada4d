//! Chat backend client.
//!
//! Fetches the greeting and asks questions against the shop assistant
//! backend. Each question opens a [`StreamSession`] over the streamed answer.

use std::sync::RwLock;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapters::{ByteStreamSource, ReqwestHttpClient};
use crate::config::ChatConfig;
use crate::decode::PayloadDecoder;
use crate::error::{ChatError, ChatResult};
use crate::models::{DecodedMessage, Sender};
use crate::render::MessageRenderer;
use crate::session::{SessionSummary, StreamSession};
use crate::traits::{Headers, HttpClient, HttpError, TranscriptSink};

const CSRF_HEADER: &str = "X-CSRFToken";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const EVENT_STREAM: &str = "text/event-stream";
const JSON: &str = "application/json";

/// Greeting returned by [`ChatClient::welcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub message: DecodedMessage,
    /// Token the backend expects back on `/ask`, if it issued one
    pub csrf_token: Option<String>,
}

/// Client for the shop assistant backend.
///
/// Generic over [`HttpClient`] so tests can script the backend with
/// [`MockHttpClient`](crate::adapters::MockHttpClient).
///
/// # Example
///
/// ```ignore
/// use shopbot::{ChatClient, ChatConfig, Transcript};
/// use tokio_util::sync::CancellationToken;
///
/// let client = ChatClient::from_config(ChatConfig::from_env()?)?;
/// let mut transcript = Transcript::new();
/// client.welcome(&mut transcript).await?;
/// client.ask("Do you have fly masks?", &mut transcript, &CancellationToken::new()).await?;
/// ```
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    config: ChatConfig,
    csrf_token: RwLock<Option<String>>,
    renderer: MessageRenderer,
}

impl ChatClient<ReqwestHttpClient> {
    /// Build a reqwest-backed client honoring the configured timeout.
    pub fn from_config(config: ChatConfig) -> ChatResult<Self> {
        config.validate()?;
        let http = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self::with_http(http, config))
    }
}

impl<C: HttpClient> ChatClient<C> {
    pub fn with_http(http: C, config: ChatConfig) -> Self {
        let csrf_token = RwLock::new(config.csrf_token.clone());
        Self {
            http,
            config,
            csrf_token,
            renderer: MessageRenderer::new(),
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// The CSRF token sent with questions, if known.
    pub fn csrf_token(&self) -> Option<String> {
        match self.csrf_token.read() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_csrf_token(&self, token: Option<String>) {
        match self.csrf_token.write() {
            Ok(mut slot) => *slot = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    /// Fetch the greeting and append it to `sink`.
    ///
    /// A known token is sent along; a token in the greeting replaces it. On
    /// failure nothing is appended.
    pub async fn welcome<S>(&self, sink: &mut S) -> ChatResult<Welcome>
    where
        S: TranscriptSink + ?Sized,
    {
        let url = self.config.welcome_url();
        let headers = self.headers_with_token([("Accept", JSON)]);

        debug!(url = %url, "Fetching greeting");
        let response = self.http.get(&url, &headers).await?;

        if !response.is_success() {
            let message = String::from_utf8_lossy(&response.body).into_owned();
            warn!(status = response.status, "Greeting request rejected");
            return Err(HttpError::ServerError {
                status: response.status,
                message,
            }
            .into());
        }

        let body = response
            .text()
            .map_err(|e| ChatError::InvalidGreeting(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(ChatError::InvalidGreeting("empty body".to_string()));
        }

        let csrf_token = extract_csrf_token(&body);
        if csrf_token.is_some() {
            self.set_csrf_token(csrf_token.clone());
        }

        let message = PayloadDecoder::new().decode_greeting(&body);
        let sender = message.sender();
        for segment in self.renderer.render(&message, sender) {
            sink.append(segment, sender);
        }

        info!(has_csrf_token = csrf_token.is_some(), "Greeting received");
        Ok(Welcome {
            message,
            csrf_token,
        })
    }

    /// Ask a question and stream the answer into `sink`.
    ///
    /// The question is echoed as a user message first. Transport failures do
    /// not return `Err`: they end the session with one error message, and the
    /// summary reports `TransportFailed`.
    pub async fn ask<S>(
        &self,
        question: &str,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> ChatResult<SessionSummary>
    where
        S: TranscriptSink + ?Sized,
    {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let echo = DecodedMessage::text(question);
        for segment in self.renderer.render(&echo, Sender::User) {
            sink.append(segment, Sender::User);
        }

        let url = self.config.ask_url();
        let body = format!("question={}", urlencoding::encode(question));
        let headers = self.ask_headers();

        let mut session = StreamSession::new(self.config.extractor(), sink);
        debug!(session_id = %session.id(), url = %url, "Posting question");

        let connect = self.http.post_stream(&url, &body, &headers);
        let stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                session.abandon();
                return Ok(session.summary());
            }
            result = connect => result,
        };

        match stream {
            Ok(stream) => {
                let mut source = ByteStreamSource::new(stream);
                Ok(session.run(&mut source, cancel).await)
            }
            Err(err) => {
                session.fail(&err);
                Ok(session.summary())
            }
        }
    }

    fn ask_headers(&self) -> Headers {
        self.headers_with_token([("Content-Type", FORM_CONTENT_TYPE), ("Accept", EVENT_STREAM)])
    }

    /// `fixed` plus the CSRF token header when a token is known.
    fn headers_with_token<const N: usize>(&self, fixed: [(&str, &str); N]) -> Headers {
        let mut headers: Headers = fixed
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        if let Some(token) = self.csrf_token() {
            headers.insert(CSRF_HEADER.to_string(), token);
        }
        headers
    }
}

impl<C: HttpClient + std::fmt::Debug> std::fmt::Debug for ChatClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("http", &self.http)
            .field("config", &self.config)
            .finish()
    }
}

fn extract_csrf_token(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("csrf_token")
        .and_then(|token| token.as_str())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
