//! Request orchestration: endpoint mapping, stub-vs-real dispatch, plugin
//! notification, and completion delivery.

use crate::cancel::CancelToken;
use crate::endpoint::{self, Endpoint};
use crate::error::{Error, RequestBuildError, RequestResult};
use crate::plugin::Plugin;
use crate::response::Response;
use crate::stub::{self, StubBehavior, StubSchedule};
use crate::target::Target;
use crate::transport::{HttpTransport, RawOutcome, Transport, TransportError, TransportRequest};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

/// Boxed future returned by request-building functions.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Strategy turning a target into a resolved [`Endpoint`].
pub type EndpointFn<T> = Arc<dyn Fn(&T) -> Endpoint + Send + Sync>;

/// Strategy turning an [`Endpoint`] into a [`TransportRequest`].
///
/// Async so collaborators can fetch credentials or sign requests while
/// building; failures surface as [`Error::BuildingRequest`].
pub type RequestFn =
    Arc<dyn Fn(Endpoint) -> BoxFuture<Result<TransportRequest, RequestBuildError>> + Send + Sync>;

/// Strategy deciding stub-vs-real dispatch per request.
pub type StubFn<T> = Arc<dyn Fn(&T) -> StubBehavior + Send + Sync>;

/// Completion callback, invoked exactly once per request.
pub type Completion = Box<dyn FnOnce(RequestResult) + Send>;

/// The orchestrator: turns declarative targets into dispatched requests.
///
/// All configuration is injected at construction through
/// [`ProviderBuilder`]; every knob has a documented default. The provider
/// itself is cheap to clone and holds no per-request state.
///
/// `request()` and `send()` must be called within a Tokio runtime; the
/// dispatch for each request runs as one spawned task, so plugin hooks and
/// the completion for a request never interleave with each other. On a
/// current-thread runtime hooks of different requests are serialized too.
pub struct Provider<T: Target, M: Transport = HttpTransport> {
    endpoint_fn: EndpointFn<T>,
    request_fn: RequestFn,
    stub_fn: StubFn<T>,
    transport: Arc<M>,
    plugins: Arc<[Arc<dyn Plugin>]>,
}

impl<T: Target, M: Transport> Clone for Provider<T, M> {
    fn clone(&self) -> Self {
        Self {
            endpoint_fn: Arc::clone(&self.endpoint_fn),
            request_fn: Arc::clone(&self.request_fn),
            stub_fn: Arc::clone(&self.stub_fn),
            transport: Arc::clone(&self.transport),
            plugins: Arc::clone(&self.plugins),
        }
    }
}

impl<T: Target> Provider<T, HttpTransport> {
    /// Provider with every default: default endpoint mapping and request
    /// building, never stubbing, [`HttpTransport::new`], no plugins.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Builder over the full configuration surface.
    pub fn builder() -> ProviderBuilder<T, HttpTransport> {
        ProviderBuilder::new()
    }
}

impl<T: Target> Default for Provider<T, HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target, M: Transport> Provider<T, M> {
    /// Dispatch a request for `target`, delivering the outcome to
    /// `completion`.
    ///
    /// Returns the request's [`CancelToken`] immediately; the completion
    /// fires later, exactly once, on the request's dispatch task. Plugins'
    /// post-response hook runs immediately before it.
    pub fn request<C>(&self, target: T, completion: C) -> CancelToken
    where
        C: FnOnce(RequestResult) + Send + 'static,
    {
        let endpoint = (self.endpoint_fn)(&target);
        let token = CancelToken::new();

        let provider = self.clone();
        let task_token = token.clone();
        tokio::spawn(async move {
            provider
                .dispatch(target, endpoint, task_token, Box::new(completion))
                .await;
        });

        token
    }

    /// Dispatch a request for `target` and await its outcome.
    ///
    /// Convenience over [`request`](Provider::request) for callers that do
    /// not need the token.
    pub async fn send(&self, target: T) -> RequestResult {
        let (sender, receiver) = tokio::sync::oneshot::channel();
        let _token = self.request(target, move |result| {
            let _ = sender.send(result);
        });
        match receiver.await {
            Ok(result) => result,
            // The dispatch task was torn down before committing a result
            // (runtime shutdown); surface as a caller-level abort.
            Err(_) => Err(Error::Aborted),
        }
    }

    async fn dispatch(
        &self,
        target: T,
        endpoint: Endpoint,
        token: CancelToken,
        completion: Completion,
    ) {
        let request = match (self.request_fn)(endpoint.clone()).await {
            Ok(request) => request,
            Err(cause) => {
                warn!(url = %endpoint.url, error = %cause, "building the transport request failed");
                self.finish(&token, Err(Error::BuildingRequest(cause)), &target, completion);
                return;
            }
        };

        if token.is_cancelled() {
            debug!(url = %endpoint.url, "request cancelled before dispatch");
            self.finish(&token, Err(Error::Cancelled), &target, completion);
            return;
        }

        match (self.stub_fn)(&target).schedule() {
            None => self.dispatch_real(request, &target, token, completion).await,
            Some(schedule) => {
                self.dispatch_stub(schedule, request, &endpoint, &target, token, completion)
                    .await
            }
        }
    }

    async fn dispatch_real(
        &self,
        mut request: TransportRequest,
        target: &T,
        token: CancelToken,
        completion: Completion,
    ) {
        for plugin in self.plugins.iter() {
            plugin.will_send(&mut request, target);
        }

        debug!(method = %request.method, url = %request.url, "dispatching to transport");
        let result = tokio::select! {
            outcome = self.transport.send(request, token.clone()) => convert_outcome(outcome),
            () = token.cancelled() => Err(Error::Cancelled),
        };

        self.finish(&token, result, target, completion);
    }

    async fn dispatch_stub(
        &self,
        schedule: StubSchedule,
        mut request: TransportRequest,
        endpoint: &Endpoint,
        target: &T,
        token: CancelToken,
        completion: Completion,
    ) {
        // Notification only: the stub path never sends this request.
        for plugin in self.plugins.iter() {
            plugin.will_send(&mut request, target);
        }

        debug!(url = %endpoint.url, ?schedule, "dispatching stubbed response");
        let result = if stub::wait_for_fire(schedule, &token).await {
            stub::sample_result(endpoint)
        } else {
            Err(Error::Cancelled)
        };

        self.finish(&token, result, target, completion);
    }

    /// Terminal step shared by every dispatch path: marks the token fired,
    /// notifies plugins in registration order, then delivers the completion.
    fn finish(&self, token: &CancelToken, result: RequestResult, target: &T, completion: Completion) {
        token.mark_fired();
        for plugin in self.plugins.iter() {
            plugin.did_receive(&result, target);
        }
        completion(result);
    }
}

/// Convert the transport's triple into a terminal result.
///
/// A complete response with body and no error wins; any reported error
/// comes second (cancellations normalized to [`Error::Cancelled`]); a
/// triple with none of the three is a malformed exchange.
fn convert_outcome(outcome: RawOutcome) -> RequestResult {
    let RawOutcome {
        response,
        body,
        error,
    } = outcome;
    match (response, body, error) {
        (Some(raw), Some(body), None) => Ok(Response::new(raw.status, body, Some(raw))),
        (_, _, Some(TransportError::Cancelled)) => Err(Error::Cancelled),
        (_, _, Some(error)) => Err(Error::Underlying(error)),
        (_, _, None) => Err(Error::Underlying(TransportError::Unknown)),
    }
}

/// Configuration surface for [`Provider`].
pub struct ProviderBuilder<T: Target, M: Transport = HttpTransport> {
    endpoint_fn: EndpointFn<T>,
    request_fn: RequestFn,
    stub_fn: StubFn<T>,
    transport: M,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl<T: Target> ProviderBuilder<T, HttpTransport> {
    fn new() -> Self {
        Self {
            endpoint_fn: Arc::new(|target: &T| endpoint::default_mapping(target)),
            request_fn: Arc::new(
                |endpoint: Endpoint| -> BoxFuture<Result<TransportRequest, RequestBuildError>> {
                    Box::pin(async move { endpoint::default_request(&endpoint) })
                },
            ),
            stub_fn: Arc::new(|_: &T| StubBehavior::Never),
            transport: HttpTransport::new(),
            plugins: Vec::new(),
        }
    }
}

impl<T: Target, M: Transport> ProviderBuilder<T, M> {
    /// Replace the endpoint-mapping strategy
    /// (default: [`endpoint::default_mapping`]).
    pub fn endpoint_fn(mut self, f: impl Fn(&T) -> Endpoint + Send + Sync + 'static) -> Self {
        self.endpoint_fn = Arc::new(f);
        self
    }

    /// Replace the request-building strategy
    /// (default: [`endpoint::default_request`]).
    ///
    /// The function may be async, e.g. to fetch credentials while building.
    pub fn request_fn<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Endpoint) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<TransportRequest, RequestBuildError>> + Send + 'static,
    {
        self.request_fn = Arc::new(
            move |endpoint: Endpoint| -> BoxFuture<Result<TransportRequest, RequestBuildError>> {
                Box::pin(f(endpoint))
            },
        );
        self
    }

    /// Replace the per-request stub decision (default: never stub).
    pub fn stub_fn(mut self, f: impl Fn(&T) -> StubBehavior + Send + Sync + 'static) -> Self {
        self.stub_fn = Arc::new(f);
        self
    }

    /// Apply one stub behavior to every request.
    pub fn stub(self, behavior: StubBehavior) -> Self {
        self.stub_fn(move |_| behavior)
    }

    /// Replace the transport (default: [`HttpTransport::new`]).
    pub fn transport<N: Transport>(self, transport: N) -> ProviderBuilder<T, N> {
        ProviderBuilder {
            endpoint_fn: self.endpoint_fn,
            request_fn: self.request_fn,
            stub_fn: self.stub_fn,
            transport,
            plugins: self.plugins,
        }
    }

    /// Register a plugin. Hooks fire in registration order.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn build(self) -> Provider<T, M> {
        Provider {
            endpoint_fn: self.endpoint_fn,
            request_fn: self.request_fn,
            stub_fn: self.stub_fn,
            transport: Arc::new(self.transport),
            plugins: self.plugins.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{SampleFn, SampleResponse};
    use crate::transport::{Method, RawResponse};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    struct ShowQuote;

    impl Target for ShowQuote {
        fn base_url(&self) -> String {
            "https://api.example.com".to_string()
        }

        fn path(&self) -> String {
            "foo/bar".to_string()
        }

        fn sample_data(&self) -> Bytes {
            Bytes::from_static(br#"{"quote": "stub"}"#)
        }
    }

    fn ok_outcome(status: u16, body: &'static [u8]) -> RawOutcome {
        RawOutcome::success(
            status,
            vec![("content-type".to_string(), "text/plain".to_string())],
            Bytes::from_static(body),
        )
    }

    /// Transport double: answers with a canned outcome after an optional
    /// delay and counts exchanges.
    struct FakeTransport {
        outcome: RawOutcome,
        delay: Duration,
        sends: Arc<AtomicUsize>,
        last_request: Arc<Mutex<Option<TransportRequest>>>,
    }

    impl FakeTransport {
        fn new(outcome: RawOutcome) -> Self {
            Self::delayed(outcome, Duration::ZERO)
        }

        fn delayed(outcome: RawOutcome, delay: Duration) -> Self {
            Self {
                outcome,
                delay,
                sends: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(Mutex::new(None)),
            }
        }

        fn sends(&self) -> Arc<AtomicUsize> {
            self.sends.clone()
        }

        fn last_request(&self) -> Arc<Mutex<Option<TransportRequest>>> {
            self.last_request.clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: TransportRequest, _token: CancelToken) -> RawOutcome {
            self.sends.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome.clone()
        }
    }

    struct FlagPlugin {
        sent: Arc<AtomicBool>,
        received: Arc<AtomicBool>,
    }

    impl Plugin for FlagPlugin {
        fn will_send(&self, _request: &mut TransportRequest, _target: &dyn Target) {
            self.sent.store(true, Ordering::SeqCst);
        }

        fn did_receive(&self, _result: &RequestResult, _target: &dyn Target) {
            self.received.store(true, Ordering::SeqCst);
        }
    }

    struct RecordingPlugin {
        name: &'static str,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Plugin for RecordingPlugin {
        fn will_send(&self, _request: &mut TransportRequest, _target: &dyn Target) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:will_send", self.name));
        }

        fn did_receive(&self, _result: &RequestResult, _target: &dyn Target) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:did_receive", self.name));
        }
    }

    #[tokio::test]
    async fn token_is_returned_before_the_completion_fires() {
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"hi")))
            .build();

        let fired = Arc::new(AtomicBool::new(false));
        let observed = fired.clone();
        let (sender, receiver) = oneshot::channel();
        let token = provider.request(ShowQuote, move |result| {
            observed.store(true, Ordering::SeqCst);
            let _ = sender.send(result);
        });

        // Current-thread runtime: the dispatch task cannot have run yet.
        assert!(!fired.load(Ordering::SeqCst));
        assert!(!token.is_cancelled());

        let response = receiver.await.expect("completion fires").expect("success");
        assert_eq!(response.status_code, 200);
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn immediate_stub_answers_from_the_sample() {
        let transport = FakeTransport::new(ok_outcome(500, b"real backend"));
        let sends = transport.sends();
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(transport)
            .stub(StubBehavior::Immediate)
            .build();

        let response = provider.send(ShowQuote).await.expect("stubbed success");
        assert_eq!(response.status_code, 200);
        assert_eq!(&response.body[..], &br#"{"quote": "stub"}"#[..]);
        assert!(response.raw.is_none());
        assert_eq!(sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stub_sample_can_fail_with_a_transport_error() {
        let failing: SampleFn =
            Arc::new(|| SampleResponse::TransportFailure(TransportError::Timeout));
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"unused")))
            .endpoint_fn(move |_| {
                Endpoint::new("https://api.example.com/foo/bar", Method::Get, failing.clone())
            })
            .stub(StubBehavior::Immediate)
            .build();

        let error = provider.send(ShowQuote).await.unwrap_err();
        assert!(matches!(error, Error::Underlying(TransportError::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_stub_fires_after_its_delay() {
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"unused")))
            .stub(StubBehavior::Delayed(Duration::from_millis(500)))
            .build();

        let started = tokio::time::Instant::now();
        let response = provider.send(ShowQuote).await.expect("stubbed success");
        assert_eq!(response.status_code, 200);
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_stub_cancelled_before_fire_reports_cancelled() {
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"unused")))
            .stub(StubBehavior::Delayed(Duration::from_secs(60)))
            .build();

        let (sender, receiver) = oneshot::channel();
        let token = provider.request(ShowQuote, move |result| {
            let _ = sender.send(result);
        });

        // Let the dispatch task park on the stub timer, then cancel.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let started = tokio::time::Instant::now();
        token.cancel();

        let result = receiver.await.expect("completion fires");
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn cancel_before_dispatch_reports_cancelled_and_skips_the_transport() {
        let transport = FakeTransport::new(ok_outcome(200, b"unused"));
        let sends = transport.sends();
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(transport)
            .build();

        let (sender, receiver) = oneshot::channel();
        let token = provider.request(ShowQuote, move |result| {
            let _ = sender.send(result);
        });
        token.cancel();

        let result = receiver.await.expect("completion fires");
        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_flight_completes_before_the_transport_would() {
        let transport =
            FakeTransport::delayed(ok_outcome(200, b"too late"), Duration::from_secs(2));
        let sends = transport.sends();
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(transport)
            .build();

        let (sender, receiver) = oneshot::channel();
        let token = provider.request(ShowQuote, move |result| {
            let _ = sender.send(result);
        });

        // Let the exchange start before cancelling.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(sends.load(Ordering::SeqCst), 1);

        let started = tokio::time::Instant::now();
        token.cancel();
        let result = receiver.await.expect("completion fires");
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn real_dispatch_delivers_a_delayed_transport_response() {
        let body: &[u8] = b"Half measures are as bad as nothing at all.";
        let transport = FakeTransport::delayed(
            RawOutcome::success(200, Vec::new(), Bytes::from_static(body)),
            Duration::from_millis(500),
        );
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(transport)
            .build();

        let response = provider.send(ShowQuote).await.expect("success");
        assert_eq!(response.status_code, 200);
        assert_eq!(&response.body[..], body);
        assert!(response.raw.is_some());
    }

    #[tokio::test]
    async fn plugin_flags_flip_on_a_successful_round_trip() {
        let sent = Arc::new(AtomicBool::new(false));
        let received = Arc::new(AtomicBool::new(false));
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"ok")))
            .plugin(FlagPlugin {
                sent: sent.clone(),
                received: received.clone(),
            })
            .build();

        provider.send(ShowQuote).await.expect("success");
        assert!(sent.load(Ordering::SeqCst));
        assert!(received.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn plugins_fire_in_registration_order_around_the_completion() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"ok")))
            .plugin(RecordingPlugin {
                name: "a",
                events: events.clone(),
            })
            .plugin(RecordingPlugin {
                name: "b",
                events: events.clone(),
            })
            .build();

        let (sender, receiver) = oneshot::channel();
        let completion_events = events.clone();
        provider.request(ShowQuote, move |result| {
            completion_events
                .lock()
                .unwrap()
                .push("completion".to_string());
            let _ = sender.send(result);
        });
        receiver.await.expect("completion fires").expect("success");

        let log = events.lock().unwrap().clone();
        assert_eq!(
            log,
            vec![
                "a:will_send",
                "b:will_send",
                "a:did_receive",
                "b:did_receive",
                "completion",
            ]
        );
    }

    #[tokio::test]
    async fn plugins_can_inject_headers_into_the_live_request() {
        struct TracePlugin;

        impl Plugin for TracePlugin {
            fn will_send(&self, request: &mut TransportRequest, _target: &dyn Target) {
                request.set_header("x-trace-id", "abc123");
            }
        }

        let transport = FakeTransport::new(ok_outcome(200, b"ok"));
        let last_request = transport.last_request();
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(transport)
            .plugin(TracePlugin)
            .build();

        provider.send(ShowQuote).await.expect("success");
        let request = last_request.lock().unwrap().take().expect("request sent");
        assert_eq!(request.header("x-trace-id"), Some("abc123"));
    }

    #[tokio::test]
    async fn building_failure_reaches_completion_and_plugins_without_sending() {
        let transport = FakeTransport::new(ok_outcome(200, b"unused"));
        let sends = transport.sends();
        let sent = Arc::new(AtomicBool::new(false));
        let received = Arc::new(AtomicBool::new(false));
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(transport)
            .request_fn(|_endpoint| async {
                Err(RequestBuildError::Other("no signing key".to_string()))
            })
            .plugin(FlagPlugin {
                sent: sent.clone(),
                received: received.clone(),
            })
            .build();

        let error = provider.send(ShowQuote).await.unwrap_err();
        assert!(matches!(error, Error::BuildingRequest(_)));
        assert_eq!(sends.load(Ordering::SeqCst), 0);
        // No request was ever built, so only the terminal hook fires.
        assert!(!sent.load(Ordering::SeqCst));
        assert!(received.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn completion_fires_exactly_once_even_with_a_late_cancel() {
        let provider = Provider::<ShowQuote, _>::builder()
            .transport(FakeTransport::new(ok_outcome(200, b"ok")))
            .build();

        let completions = Arc::new(AtomicUsize::new(0));
        let counted = completions.clone();
        let (sender, receiver) = oneshot::channel();
        let token = provider.request(ShowQuote, move |result| {
            counted.fetch_add(1, Ordering::SeqCst);
            let _ = sender.send(result);
        });

        receiver.await.expect("completion fires").expect("success");
        token.cancel();
        tokio::task::yield_now().await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert!(!token.is_cancelled());
    }

    #[test]
    fn outcome_conversion_follows_the_precedence() {
        let full = RawOutcome::success(204, Vec::new(), Bytes::new());
        let response = convert_outcome(full).expect("complete triple is a response");
        assert_eq!(response.status_code, 204);
        assert_eq!(
            response.raw,
            Some(RawResponse {
                status: 204,
                headers: Vec::new()
            })
        );

        // An error outranks a response, even a complete-looking one.
        let mut with_error = RawOutcome::success(200, Vec::new(), Bytes::from_static(b"x"));
        with_error.error = Some(TransportError::Timeout);
        assert!(matches!(
            convert_outcome(with_error),
            Err(Error::Underlying(TransportError::Timeout))
        ));

        // Transport-reported cancellation converges on the canonical variant.
        assert!(matches!(
            convert_outcome(RawOutcome::failure(TransportError::Cancelled)),
            Err(Error::Cancelled)
        ));

        // A response without a body is a malformed exchange.
        let mut headless = RawOutcome::success(200, Vec::new(), Bytes::new());
        headless.body = None;
        assert!(matches!(
            convert_outcome(headless),
            Err(Error::Underlying(TransportError::Unknown))
        ));

        // So is a completely empty triple.
        assert!(matches!(
            convert_outcome(RawOutcome::default()),
            Err(Error::Underlying(TransportError::Unknown))
        ));
    }
}
