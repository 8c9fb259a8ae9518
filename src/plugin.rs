//! Observer/interceptor hooks around every dispatch.
//!
//! Plugins are notified twice per request: once with the outgoing transport
//! request before it is sent (or, on the stub path, before the stub is
//! scheduled), and once with the terminal result immediately before the
//! completion fires. Invocation order is registration order.

use crate::error::RequestResult;
use crate::target::Target;
use crate::transport::TransportRequest;
use tracing::{debug, warn};

/// Capability interface invoked around every request.
///
/// Both hooks are fire-and-forget: no return value is consumed, and a panic
/// inside a plugin is the plugin's responsibility. Plugins for one request
/// never run concurrently with each other; hooks execute on the request's
/// dispatch task.
pub trait Plugin: Send + Sync {
    /// Called before the request is handed to the transport (or, for a
    /// stubbed request, with the request built for notification only).
    /// May mutate the request, e.g. to inject headers.
    fn will_send(&self, request: &mut TransportRequest, target: &dyn Target) {
        let _ = (request, target);
    }

    /// Called with the terminal result, real or stubbed, immediately before
    /// the completion fires.
    fn did_receive(&self, result: &RequestResult, target: &dyn Target) {
        let _ = (result, target);
    }
}

/// Logs every dispatch and its terminal result through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerPlugin;

impl Plugin for LoggerPlugin {
    fn will_send(&self, request: &mut TransportRequest, _target: &dyn Target) {
        debug!(method = %request.method, url = %request.url, "sending request");
    }

    fn did_receive(&self, result: &RequestResult, _target: &dyn Target) {
        match result {
            Ok(response) => debug!(
                status = response.status_code,
                bytes = response.body.len(),
                "received response"
            ),
            Err(error) => warn!(%error, "request failed"),
        }
    }
}
