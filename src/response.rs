//! Successful response model and decode helpers.

use crate::error::Error;
use crate::transport::RawResponse;
use bytes::Bytes;
use serde::de::DeserializeOwned;

/// A committed response for one request attempt.
///
/// Stubbed responses carry `raw: None`; responses from a real transport
/// retain the transport's status/header metadata.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body bytes.
    pub body: Bytes,
    /// Transport-level response metadata, absent for stubbed responses.
    pub raw: Option<RawResponse>,
}

impl Response {
    pub fn new(status_code: u16, body: Bytes, raw: Option<RawResponse>) -> Self {
        Self {
            status_code,
            body,
            raw,
        }
    }

    /// Whether the status code is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Pass the response through only if its status is 2xx.
    pub fn filter_success(self) -> Result<Self, Error> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::UnexpectedBackend(self.status_code))
        }
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::ResponseFailed)
    }
}
