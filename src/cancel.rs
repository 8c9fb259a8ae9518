//! Cancellation token shared between the caller and the dispatch path.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// A lower-level cancellable operation attached to a [`CancelToken`].
///
/// Transports attach one per exchange so `cancel()` reaches the in-flight
/// operation. A plain closure works: `token.attach(Box::new(|| { .. }))`.
pub trait CancelHandle: Send + Sync {
    /// Abort the underlying operation. Must be safe to call at most once
    /// per attached handle.
    fn cancel(&self);
}

impl<F> CancelHandle for F
where
    F: Fn() + Send + Sync,
{
    fn cancel(&self) {
        self()
    }
}

#[derive(Default)]
struct State {
    cancelled: bool,
    fired: bool,
    handle: Option<Box<dyn CancelHandle>>,
}

/// Handle returned by [`Provider::request`](crate::provider::Provider::request)
/// enabling cancellation before or during flight.
///
/// `cancel()` is idempotent and valid from any thread up until the
/// completion fires; afterwards the token is inert. The cancel flag is
/// persistent: a handle attached after `cancel()` was requested is cancelled
/// immediately upon attachment, so the window between dispatch start and
/// transport start cannot swallow a cancellation.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    notify: Notify,
}

impl CancelToken {
    /// Fresh token in the unattached, not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Request cancellation.
    ///
    /// Forwards to the attached handle, if any, and flips the persistent
    /// flag consulted at the dispatch checkpoints. A no-op once the
    /// completion has fired.
    pub fn cancel(&self) {
        let handle = {
            let mut state = self.lock();
            if state.fired || state.cancelled {
                return;
            }
            state.cancelled = true;
            state.handle.take()
        };
        if let Some(handle) = handle {
            handle.cancel();
        }
        self.inner.notify.notify_waiters();
    }

    /// Attach the lower-level cancellable for the in-flight operation.
    ///
    /// If cancellation was already requested the handle is cancelled on the
    /// spot; once the completion has fired the handle is discarded.
    pub fn attach(&self, handle: Box<dyn CancelHandle>) {
        {
            let mut state = self.lock();
            if state.fired {
                return;
            }
            if !state.cancelled {
                state.handle = Some(handle);
                return;
            }
        }
        handle.cancel();
    }

    /// Mark the completion as delivered; the token is inert afterwards.
    pub(crate) fn mark_fired(&self) {
        let mut state = self.lock();
        state.fired = true;
        state.handle = None;
    }

    /// Resolves once cancellation is requested. Never resolves if the
    /// request completes uncancelled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register interest before checking the flag, so a cancel()
            // between check and await cannot be missed.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("CancelToken")
            .field("cancelled", &state.cancelled)
            .field("fired", &state.fired)
            .field("attached", &state.handle.is_some())
            .finish()
    }
}
