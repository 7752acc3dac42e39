use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[cfg(test)]
#[path = "debouncer_test.rs"]
mod debouncer_test;

// ============================================================================
// TRAILING-EDGE DEBOUNCE
// ============================================================================

/// Delays an action until `wait` has passed without another [`call`](Self::call).
///
/// Every call cancels the pending run and schedules a new one with the latest
/// arguments. Bundle several arguments into a tuple or struct as `A`.
/// Clones share the same pending run.
pub struct Debouncer<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    wait: Duration,
    action: Box<dyn Fn(A) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Debounce `action` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use [`with_handle`](Self::with_handle) there.
    pub fn new<F>(wait: Duration, action: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_handle(Handle::current(), wait, action)
    }

    pub fn with_handle<F>(runtime: Handle, wait: Duration, action: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                wait,
                action: Box::new(action),
                pending: Mutex::new(None),
                runtime,
            }),
        }
    }

    pub fn call(&self, args: A) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(self.inner.runtime.spawn(async move {
            tokio::time::sleep(inner.wait).await;
            (inner.action)(args);
        }));
    }

    /// Drop the pending run, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.lock_pending().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.inner.wait)
            .finish_non_exhaustive()
    }
}
