//! Declarative description of an API call, supplied by the integrator.

use crate::endpoint::ParameterEncoding;
use crate::transport::Method;
use bytes::Bytes;
use serde_json::Value;
use std::collections::BTreeMap;

/// Capability set a provider needs to dispatch a request.
///
/// Implementations are read-only values owned by the API consumer, one per
/// call the API exposes. An enum with one variant per endpoint is the usual
/// shape:
///
/// ```
/// use bytes::Bytes;
/// use courier::{Method, Target};
///
/// enum UserApi {
///     Profile { id: u64 },
///     Delete { id: u64 },
/// }
///
/// impl Target for UserApi {
///     fn base_url(&self) -> String {
///         "https://api.example.com".to_string()
///     }
///
///     fn path(&self) -> String {
///         match self {
///             UserApi::Profile { id } | UserApi::Delete { id } => format!("users/{id}"),
///         }
///     }
///
///     fn method(&self) -> Method {
///         match self {
///             UserApi::Profile { .. } => Method::Get,
///             UserApi::Delete { .. } => Method::Delete,
///         }
///     }
///
///     fn sample_data(&self) -> Bytes {
///         Bytes::from_static(br#"{"id": 1, "name": "sample"}"#)
///     }
/// }
/// ```
pub trait Target: Send + Sync + 'static {
    /// Base URL of the API, e.g. `https://api.example.com`.
    fn base_url(&self) -> String;

    /// Path appended to the base URL. Leading slashes are tolerated.
    fn path(&self) -> String;

    /// HTTP method, `GET` by default.
    fn method(&self) -> Method {
        Method::Get
    }

    /// Request parameters. Sorted map so encodings are deterministic.
    fn parameters(&self) -> BTreeMap<String, Value> {
        BTreeMap::new()
    }

    /// How [`parameters`](Target::parameters) are carried on the wire.
    fn parameter_encoding(&self) -> ParameterEncoding {
        ParameterEncoding::Query
    }

    /// Static headers for every request to this target.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Payload the stub path answers with (as a 200 response, unless the
    /// endpoint mapping installs a richer sample).
    fn sample_data(&self) -> Bytes {
        Bytes::new()
    }
}
