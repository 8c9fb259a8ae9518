//! Transport contract and the default HTTP transport.
//!
//! The dispatch core is agnostic to how bytes actually move: anything that
//! can take a [`TransportRequest`] and come back with a [`RawOutcome`]
//! triple can serve as the transport. The shipped [`HttpTransport`] drives
//! a blocking `ureq` agent on the Tokio blocking pool.

use crate::cancel::{CancelHandle, CancelToken};
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use ureq::Agent;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl Method {
    /// The canonical upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
        }
    }

    /// Whether a request body is carried for this method.
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport-level request described as plain data.
///
/// Built from an [`Endpoint`](crate::endpoint::Endpoint) by the provider's
/// request-building function. Plugins receive it mutably before send and may
/// inject headers or rewrite it.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Fully resolved URL, including any query string.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request body, if the method carries one.
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing an existing value with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            slot.1 = value;
        } else {
            self.headers.push((name, value));
        }
    }
}

/// Response metadata reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in wire order.
    pub headers: Vec<(String, String)>,
}

/// The `(response?, body?, error?)` triple a transport exchange produces.
///
/// The provider converts this into a single
/// [`RequestResult`](crate::error::RequestResult): a complete response with
/// body wins, any reported error comes second, and a triple with none of the
/// three is treated as a malformed exchange.
#[derive(Debug, Clone, Default)]
pub struct RawOutcome {
    /// Response metadata, if the exchange got far enough to produce one.
    pub response: Option<RawResponse>,
    /// Response body bytes.
    pub body: Option<Bytes>,
    /// Transport-level failure.
    pub error: Option<TransportError>,
}

impl RawOutcome {
    /// A completed exchange with status, headers, and body.
    pub fn success(status: u16, headers: Vec<(String, String)>, body: Bytes) -> Self {
        Self {
            response: Some(RawResponse { status, headers }),
            body: Some(body),
            error: None,
        }
    }

    /// A failed exchange with no usable response.
    pub fn failure(error: TransportError) -> Self {
        Self {
            response: None,
            body: None,
            error: Some(error),
        }
    }
}

/// Failures reported by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The exchange could not be carried out (DNS, TCP, TLS, protocol).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The transport gave up waiting.
    #[error("request timed out")]
    Timeout,

    /// The transport aborted the exchange because it was cancelled.
    #[error("request cancelled by the transport")]
    Cancelled,

    /// The transport reported neither a response nor an error.
    #[error("unknown transport failure")]
    Unknown,
}

/// The collaborator that performs actual network I/O.
///
/// Implementations that support mid-flight abort should attach a
/// [`CancelHandle`] to the token before awaiting I/O, so a `cancel()` call
/// reaches the in-flight operation. The provider additionally races every
/// exchange against the token, so completions stay prompt even when the
/// transport cannot abort.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Carry out one exchange.
    async fn send(&self, request: TransportRequest, token: CancelToken) -> RawOutcome;
}

/// Default transport: a blocking `ureq` agent driven on the blocking pool.
///
/// Each exchange runs as one `spawn_blocking` task whose abort handle is
/// attached to the request's [`CancelToken`].
#[derive(Clone)]
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /// Transport with a 30 second global timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Transport with the given global timeout per exchange.
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.new_agent(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

struct AbortOnCancel(tokio::task::AbortHandle);

impl CancelHandle for AbortOnCancel {
    fn cancel(&self) {
        self.0.abort();
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest, token: CancelToken) -> RawOutcome {
        let agent = self.agent.clone();
        let task = tokio::task::spawn_blocking(move || run_blocking(&agent, request));
        token.attach(Box::new(AbortOnCancel(task.abort_handle())));
        match task.await {
            Ok(outcome) => outcome,
            Err(join_error) if join_error.is_cancelled() => {
                RawOutcome::failure(TransportError::Cancelled)
            }
            Err(join_error) => {
                RawOutcome::failure(TransportError::Connection(join_error.to_string()))
            }
        }
    }
}

fn run_blocking(agent: &Agent, request: TransportRequest) -> RawOutcome {
    let TransportRequest {
        url,
        method,
        headers,
        body,
    } = request;

    let sent = match method {
        Method::Get | Method::Head | Method::Delete => {
            let mut builder = match method {
                Method::Get => agent.get(url.as_str()),
                Method::Head => agent.head(url.as_str()),
                _ => agent.delete(url.as_str()),
            };
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if body.is_some() {
                warn!(%url, %method, "request body ignored for bodyless method");
            }
            builder.call()
        }
        Method::Post | Method::Put | Method::Patch => {
            let mut builder = match method {
                Method::Post => agent.post(url.as_str()),
                Method::Put => agent.put(url.as_str()),
                _ => agent.patch(url.as_str()),
            };
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let payload = body.unwrap_or_default();
            builder.send(&payload[..])
        }
    };

    match sent {
        Ok(mut response) => {
            let status = response.status().as_u16();
            let response_headers: Vec<(String, String)> = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.to_string(), v.to_string()))
                })
                .collect();
            match response.body_mut().read_to_vec() {
                Ok(data) => RawOutcome::success(status, response_headers, Bytes::from(data)),
                Err(error) => RawOutcome {
                    response: Some(RawResponse {
                        status,
                        headers: response_headers,
                    }),
                    body: None,
                    error: Some(map_ureq_error(error)),
                },
            }
        }
        Err(error) => RawOutcome::failure(map_ureq_error(error)),
    }
}

fn map_ureq_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(io_error) => TransportError::Connection(io_error.to_string()),
        other => TransportError::Connection(other.to_string()),
    }
}
