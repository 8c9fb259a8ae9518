//! Stub scheduling: immediate or delayed synthetic responses.

use crate::cancel::CancelToken;
use crate::endpoint::{Endpoint, SampleResponse};
use crate::error::{Error, RequestResult};
use crate::response::Response;
use std::time::Duration;

/// When and whether a request is answered from its sample response
/// instead of hitting the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StubBehavior {
    /// Always dispatch to the real transport.
    #[default]
    Never,
    /// Answer from the sample response with no timer.
    Immediate,
    /// Answer from the sample response after the delay.
    Delayed(Duration),
}

impl StubBehavior {
    /// The schedule for the stub path, or `None` for real dispatch.
    pub(crate) fn schedule(self) -> Option<StubSchedule> {
        match self {
            StubBehavior::Never => None,
            StubBehavior::Immediate => Some(StubSchedule::Immediate),
            StubBehavior::Delayed(delay) => Some(StubSchedule::Delayed(delay)),
        }
    }
}

/// A stub that is actually going to fire. `Never` has no representation
/// here, so the stub path cannot be entered with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StubSchedule {
    Immediate,
    Delayed(Duration),
}

/// Wait out the schedule on the current task. Returns `false` if the token
/// was cancelled before the stub could fire; the cancel flag is re-checked
/// at fire time.
pub(crate) async fn wait_for_fire(schedule: StubSchedule, token: &CancelToken) -> bool {
    if let StubSchedule::Delayed(delay) = schedule {
        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            () = token.cancelled() => return false,
        }
    }
    !token.is_cancelled()
}

/// Evaluate the endpoint's sample-response function into a terminal result.
pub(crate) fn sample_result(endpoint: &Endpoint) -> RequestResult {
    match endpoint.sample_response() {
        SampleResponse::Network(status, body) => Ok(Response::new(status, body, None)),
        SampleResponse::TransportFailure(error) => Err(Error::Underlying(error)),
    }
}
