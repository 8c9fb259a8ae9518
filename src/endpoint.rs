//! Resolved, immutable description of one request.
//!
//! An [`Endpoint`] is built once per request by the provider's
//! endpoint-mapping function and carries everything the request-building
//! step needs, plus the sample-response function the stub path answers
//! with.

use crate::error::RequestBuildError;
use crate::target::Target;
use crate::transport::{Method, TransportError, TransportRequest};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// What a stub answers with when it fires.
#[derive(Debug, Clone)]
pub enum SampleResponse {
    /// A synthetic network response: status code and body bytes.
    Network(u16, Bytes),
    /// A synthetic transport failure.
    TransportFailure(TransportError),
}

/// Zero-argument function producing the sample response.
pub type SampleFn = Arc<dyn Fn() -> SampleResponse + Send + Sync>;

/// How endpoint parameters are carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterEncoding {
    /// Percent-encoded into the URL query string.
    #[default]
    Query,
    /// Serialized as a JSON body with a `content-type` header.
    JsonBody,
}

/// Resolved request description: URL, method, parameters, headers, and the
/// sample-response function used for stubbing.
///
/// Constructed once per request, never mutated afterwards, discarded when
/// the request completes.
#[derive(Clone)]
pub struct Endpoint {
    /// Fully resolved URL, before parameter encoding.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Parameters, encoded per [`encoding`](Endpoint::encoding).
    pub parameters: BTreeMap<String, Value>,
    /// Parameter encoding.
    pub encoding: ParameterEncoding,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    sample: SampleFn,
}

impl Endpoint {
    /// Endpoint with no parameters or headers.
    pub fn new(url: impl Into<String>, method: Method, sample: SampleFn) -> Self {
        Self {
            url: url.into(),
            method,
            parameters: BTreeMap::new(),
            encoding: ParameterEncoding::default(),
            headers: Vec::new(),
            sample,
        }
    }

    /// Copy with the given parameters and encoding.
    pub fn with_parameters(
        mut self,
        parameters: BTreeMap<String, Value>,
        encoding: ParameterEncoding,
    ) -> Self {
        self.parameters = parameters;
        self.encoding = encoding;
        self
    }

    /// Copy with one more header appended.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Evaluate the sample-response function.
    pub fn sample_response(&self) -> SampleResponse {
        (self.sample)()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("parameters", &self.parameters)
            .field("encoding", &self.encoding)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Default endpoint mapping: base URL and path concatenated, everything
/// else copied from the target verbatim, sample installed as a 200 response
/// over the target's sample data.
pub fn default_mapping(target: &dyn Target) -> Endpoint {
    let base = target.base_url();
    let base = base.trim_end_matches('/');
    let path = target.path();
    let path = path.trim_start_matches('/');
    let url = if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    };

    let data = target.sample_data();
    let sample: SampleFn = Arc::new(move || SampleResponse::Network(200, data.clone()));

    let mut endpoint = Endpoint::new(url, target.method(), sample)
        .with_parameters(target.parameters(), target.parameter_encoding());
    endpoint.headers = target.headers();
    endpoint
}

// Everything outside RFC 3986 "unreserved" plus the query delimiters.
const QUERY_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'+')
    .add(b'&')
    .add(b'=')
    .add(b'?')
    .add(b'%');

/// Default request building: validates the URL scheme and encodes
/// parameters per the endpoint's [`ParameterEncoding`].
pub fn default_request(endpoint: &Endpoint) -> Result<TransportRequest, RequestBuildError> {
    if !endpoint.url.starts_with("http://") && !endpoint.url.starts_with("https://") {
        return Err(RequestBuildError::InvalidUrl(endpoint.url.clone()));
    }

    let mut request = TransportRequest {
        url: endpoint.url.clone(),
        method: endpoint.method,
        headers: endpoint.headers.clone(),
        body: None,
    };

    if endpoint.parameters.is_empty() {
        return Ok(request);
    }

    match endpoint.encoding {
        ParameterEncoding::Query => {
            let query = encode_query(&endpoint.parameters);
            let separator = if request.url.contains('?') { '&' } else { '?' };
            request.url = format!("{}{}{}", request.url, separator, query);
        }
        ParameterEncoding::JsonBody => {
            let body = serde_json::to_vec(&endpoint.parameters)?;
            request.body = Some(Bytes::from(body));
            if request.header("content-type").is_none() {
                request.set_header("content-type", "application/json");
            }
        }
    }

    Ok(request)
}

fn encode_query(parameters: &BTreeMap<String, Value>) -> String {
    parameters
        .iter()
        .map(|(key, value)| {
            // Strings go in bare; everything else uses its JSON rendering.
            let value = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_SET),
                utf8_percent_encode(&value, QUERY_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
