//! Generic polling cache.
//!
//! A [`Coordinator`] owns one snapshot of remote state and knows how to
//! fetch a new one. Consumers read [`Coordinator::latest`] and register
//! listeners that fire after every successful refresh. Concurrent
//! [`Coordinator::refresh`] calls coalesce onto a single in-flight fetch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

use crate::error::CoreError;

/// Fetches one snapshot. `Ok(None)` means the panel answered but carried
/// no usable data; that still counts as a successful refresh.
pub type FetchFn<T> = Box<
    dyn Fn() -> BoxFuture<'static, Result<Option<T>, panelbridge_api::Error>> + Send + Sync,
>;

type ListenerFn = Box<dyn Fn() + Send + Sync>;
type InFlight = Shared<BoxFuture<'static, Result<(), CoreError>>>;

/// Token returned by [`Coordinator::add_listener`], used to unregister.
#[derive(Debug)]
pub struct ListenerHandle(usize);

/// Cheaply cloneable handle onto one polling cache.
pub struct Coordinator<T> {
    inner: Arc<CoordinatorInner<T>>,
}

impl<T> Clone for Coordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CoordinatorInner<T> {
    name: &'static str,
    interval: Duration,
    fetch: FetchFn<T>,
    data: RwLock<Option<Arc<T>>>,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
    listeners: Mutex<Vec<(usize, ListenerFn)>>,
    next_listener_id: AtomicUsize,
    in_flight: Mutex<Option<InFlight>>,
}

impl<T: Send + Sync + 'static> Coordinator<T> {
    pub fn new(name: &'static str, interval: Duration, fetch: FetchFn<T>) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                name,
                interval,
                fetch,
                data: RwLock::new(None),
                last_refresh: RwLock::new(None),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicUsize::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Most recent snapshot, or `None` if the cache was never populated
    /// or the last successful refresh carried no data.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<T>> {
        self.inner.data.read().expect("data lock poisoned").clone()
    }

    /// When the last *successful* refresh completed. Failed refreshes do
    /// not move this timestamp.
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self
            .inner
            .last_refresh
            .read()
            .expect("timestamp lock poisoned")
    }

    /// Registers a callback that runs synchronously after every successful
    /// refresh, in registration order. Callbacks must not register or
    /// remove listeners themselves.
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> ListenerHandle {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .expect("listener lock poisoned")
            .push((id, Box::new(listener)));
        ListenerHandle(id)
    }

    pub fn remove_listener(&self, handle: ListenerHandle) {
        self.inner
            .listeners
            .lock()
            .expect("listener lock poisoned")
            .retain(|(id, _)| *id != handle.0);
    }

    pub fn clear_listeners(&self) {
        self.inner
            .listeners
            .lock()
            .expect("listener lock poisoned")
            .clear();
    }

    /// Fetches a new snapshot, stores it, and notifies listeners.
    ///
    /// If a refresh is already in flight this joins it instead of issuing
    /// a second request; every joined caller observes the same outcome.
    /// On failure the previous snapshot stays in place, stale but readable.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let fut = {
            let mut slot = self
                .inner
                .in_flight
                .lock()
                .expect("in-flight lock poisoned");
            if let Some(existing) = slot.as_ref() {
                debug!(cache = self.inner.name, "refresh already in flight, joining");
                existing.clone()
            } else {
                let inner = Arc::clone(&self.inner);
                let fresh: InFlight = async move {
                    let result = inner.fetch_and_store().await;
                    *inner.in_flight.lock().expect("in-flight lock poisoned") = None;
                    result
                }
                .boxed()
                .shared();
                *slot = Some(fresh.clone());
                fresh
            }
        };
        fut.await
    }
}

impl<T: Send + Sync + 'static> CoordinatorInner<T> {
    async fn fetch_and_store(&self) -> Result<(), CoreError> {
        match (self.fetch)().await {
            Ok(snapshot) => {
                let absent = snapshot.is_none();
                *self.data.write().expect("data lock poisoned") = snapshot.map(Arc::new);
                *self.last_refresh.write().expect("timestamp lock poisoned") = Some(Utc::now());
                if absent {
                    debug!(cache = self.name, "refresh succeeded with no data");
                } else {
                    debug!(cache = self.name, "refresh succeeded");
                }
                let listeners = self.listeners.lock().expect("listener lock poisoned");
                for (_, listener) in &*listeners {
                    listener();
                }
                Ok(())
            }
            Err(e) => Err(CoreError::from(e)),
        }
    }
}
