//! Courier
//!
//! Declarative HTTP request dispatch: describe an API endpoint as data, get
//! back an executed (or simulated) network call, with every request and
//! response routed through a pipeline of observer plugins.
//!
//! # Features
//!
//! - **Declarative targets**: describe each API call once (base URL, path,
//!   method, parameters, sample data) and let the provider do the rest
//! - **Pluggable mapping**: endpoint mapping, request building, and the
//!   stub decision are injected function values with sensible defaults
//! - **Stubbed responses**: answer any request from its sample response,
//!   immediately or after a delay, without touching the network
//! - **Plugins**: observe or mutate outgoing requests and inspect every
//!   terminal result, in registration order
//! - **Cancellation**: every dispatch returns a token that cancels work
//!   before or during flight
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use courier::{Provider, StubBehavior, Target};
//!
//! struct GetUser;
//!
//! impl Target for GetUser {
//!     fn base_url(&self) -> String {
//!         "https://api.example.com".to_string()
//!     }
//!
//!     fn path(&self) -> String {
//!         "users/1".to_string()
//!     }
//!
//!     fn sample_data(&self) -> Bytes {
//!         Bytes::from_static(br#"{"id": 1}"#)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = Provider::<GetUser>::builder()
//!     .stub(StubBehavior::Immediate)
//!     .build();
//!
//! let response = provider.send(GetUser).await.unwrap();
//! assert_eq!(response.status_code, 200);
//! assert_eq!(&response.body[..], br#"{"id": 1}"#);
//! # }
//! ```

pub mod cancel;
pub mod endpoint;
pub mod error;
pub mod plugin;
pub mod provider;
pub mod response;
pub mod stub;
pub mod target;
pub mod transport;

pub use cancel::{CancelHandle, CancelToken};
pub use endpoint::{Endpoint, ParameterEncoding, SampleFn, SampleResponse};
pub use error::{Error, RequestBuildError, RequestResult};
pub use plugin::{LoggerPlugin, Plugin};
pub use provider::{Provider, ProviderBuilder};
pub use response::Response;
pub use stub::StubBehavior;
pub use target::Target;
pub use transport::{
    HttpTransport, Method, RawOutcome, RawResponse, Transport, TransportError, TransportRequest,
};
