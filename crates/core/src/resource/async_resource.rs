use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

use crate::errors::CoreError;

/// Message surfaced when a failure carries no text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Boxed future returned by a producer.
pub type ProducerFuture<T> = Pin<Box<dyn Future<Output = Result<T, CoreError>> + Send>>;

type Producer<T> = Arc<dyn Fn() -> ProducerFuture<T> + Send + Sync>;

/// Construction options for [`AsyncResource`].
#[derive(Debug, Clone)]
pub struct ResourceOptions<T> {
    /// Value of `data` before the first load commits.
    pub initial_data: Option<T>,

    /// Start loading on construction and on dependency changes.
    pub immediate: bool,
}

impl<T> Default for ResourceOptions<T> {
    fn default() -> Self {
        Self {
            initial_data: None,
            immediate: true,
        }
    }
}

impl<T> ResourceOptions<T> {
    /// Do not load until `refetch` / `refresh` is called.
    pub fn deferred() -> Self {
        Self {
            initial_data: None,
            immediate: false,
        }
    }

    pub fn with_initial_data(mut self, data: T) -> Self {
        self.initial_data = Some(data);
        self
    }
}

/// Why a reload was requested. Only used for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshReason {
    /// User asked for fresh data (pull-to-refresh, retry button)
    Manual,
    /// Something the producer reads from changed
    DependenciesChanged,
    /// Periodic refresh driven by the caller
    Interval,
}

impl std::fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshReason::Manual => write!(f, "manual"),
            RefreshReason::DependenciesChanged => write!(f, "dependencies changed"),
            RefreshReason::Interval => write!(f, "interval"),
        }
    }
}

/// Point-in-time copy of a resource's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

struct State<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    /// Token of the most recently started load; only it may commit.
    latest_seq: u64,
    dependencies: Vec<String>,
    disposed: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    tasks: Mutex<Vec<AbortHandle>>,
    version: watch::Sender<u64>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // A panicking updater must not brick the resource for every later reader.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }
}

/// State container around one asynchronous data load.
///
/// Holds `data`, `loading` and `error` for a producer (typically a provider
/// call) and exposes them to rendering code. Guarantees:
///
/// - Every load takes a sequence token; only the most recently *started*
///   load may commit. Late completions of superseded loads are dropped.
/// - A failed load keeps the previous `data` and only sets `error`.
/// - After [`dispose`](Self::dispose) (or drop) nothing commits anymore.
/// - A spawned load whose producer panics ends with the generic error; a
///   `refetch` dropped before completion just clears `loading`.
///
/// The state lock is never held across an `.await`.
pub struct AsyncResource<T> {
    producer: Producer<T>,
    shared: Arc<Shared<T>>,
    immediate: bool,
}

impl<T> std::fmt::Debug for AsyncResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("AsyncResource")
            .field("has_data", &state.data.is_some())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .field("latest_seq", &state.latest_seq)
            .field("disposed", &state.disposed)
            .finish()
    }
}

impl<T: Send + 'static> AsyncResource<T> {
    /// Wrap `producer`. With `options.immediate` the first load is spawned
    /// right away on the current Tokio runtime.
    pub fn new<F, Fut>(producer: F, options: ResourceOptions<T>) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let producer: Producer<T> = Arc::new(move || Box::pin(producer()) as ProducerFuture<T>);
        let (version, _) = watch::channel(0);
        let resource = Self {
            producer,
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    data: options.initial_data,
                    loading: false,
                    error: None,
                    latest_seq: 0,
                    dependencies: Vec::new(),
                    disposed: false,
                }),
                tasks: Mutex::new(Vec::new()),
                version,
            }),
            immediate: options.immediate,
        };

        if resource.immediate {
            resource.spawn_load("initial");
        }
        resource
    }

    /// Run the producer now and wait for this load to commit (or be
    /// discarded because a newer load started meanwhile).
    pub async fn refetch(&self) {
        let Some(seq) = begin_load(&self.shared) else {
            return;
        };
        let mut guard = RefetchGuard {
            shared: &*self.shared,
            seq,
            armed: true,
        };
        finish_load(Arc::clone(&self.shared), Arc::clone(&self.producer), seq, "refetch").await;
        guard.armed = false;
    }

    /// Start a reload in the background. Returns `false` if no load could be
    /// started (resource disposed or no Tokio runtime).
    pub fn refresh(&self, reason: RefreshReason) -> bool {
        self.spawn_load(&reason.to_string())
    }

    /// Record the keys the producer depends on. When they differ from the
    /// previous keys and the resource is `immediate`, a reload is started.
    ///
    /// Returns whether a reload was started.
    pub fn update_dependencies<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        {
            let mut state = self.shared.lock();
            if state.disposed || state.dependencies == keys {
                return false;
            }
            state.dependencies = keys;
        }
        self.immediate && self.refresh(RefreshReason::DependenciesChanged)
    }

    fn spawn_load(&self, reason: &str) -> bool {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(reason, "no Tokio runtime available, load not started");
            return false;
        };

        // The token is taken now, not when the task is first polled, so a
        // later `refetch` on the same task still supersedes this load.
        let Some(seq) = begin_load(&self.shared) else {
            return false;
        };

        let load = handle.spawn(finish_load(
            Arc::clone(&self.shared),
            Arc::clone(&self.producer),
            seq,
            reason.to_string(),
        ));
        let load_abort = load.abort_handle();
        let supervisor = handle.spawn(supervise_load(Arc::clone(&self.shared), seq, load));

        let mut tasks = self.shared.tasks.lock().unwrap_or_else(|p| p.into_inner());
        tasks.retain(|t| !t.is_finished());
        tasks.push(load_abort);
        tasks.push(supervisor.abort_handle());
        true
    }
}

impl<T> AsyncResource<T> {
    /// Replace `data` with `value`. `loading` and `error` are untouched.
    pub fn set_data(&self, value: T) {
        self.update_data(|_| value);
    }

    /// Replace `data` with `updater(current)`. The updater always sees the
    /// latest committed value.
    pub fn update_data<F>(&self, updater: F)
    where
        F: FnOnce(Option<&T>) -> T,
    {
        {
            let mut state = self.shared.lock();
            if state.disposed {
                return;
            }
            let next = updater(state.data.as_ref());
            state.data = Some(next);
        }
        self.shared.notify();
    }

    pub fn is_loading(&self) -> bool {
        self.shared.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.shared.lock().error.clone()
    }

    pub fn has_data(&self) -> bool {
        self.shared.lock().data.is_some()
    }

    /// Borrow the current data for the duration of `f`.
    pub fn with_data<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.shared.lock().data.as_ref())
    }

    /// Receiver whose value increments on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.version.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// Tear the resource down: abort spawned loads and ignore any completion
    /// that still arrives. Idempotent.
    pub fn dispose(&self) {
        {
            let mut state = self.shared.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.loading = false;
        }
        let tasks = std::mem::take(&mut *self.shared.tasks.lock().unwrap_or_else(|p| p.into_inner()));
        for task in tasks {
            task.abort();
        }
        tracing::debug!("resource disposed");
        self.shared.notify();
    }
}

impl<T: Clone> AsyncResource<T> {
    pub fn data(&self) -> Option<T> {
        self.shared.lock().data.clone()
    }

    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        let state = self.shared.lock();
        ResourceSnapshot {
            data: state.data.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

impl<T> Drop for AsyncResource<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Take a fresh sequence token and enter the loading state.
/// `None` once the resource is disposed.
fn begin_load<T>(shared: &Shared<T>) -> Option<u64> {
    let seq = {
        let mut state = shared.lock();
        if state.disposed {
            return None;
        }
        state.latest_seq += 1;
        state.loading = true;
        state.error = None;
        state.latest_seq
    };
    shared.notify();
    Some(seq)
}

/// Await the producer and commit the outcome if `seq` is still the latest token.
async fn finish_load<T>(
    shared: Arc<Shared<T>>,
    producer: Producer<T>,
    seq: u64,
    reason: impl AsRef<str>,
) {
    tracing::debug!(seq, reason = reason.as_ref(), "load started");
    let result = producer().await;

    {
        let mut state = shared.lock();
        if state.disposed {
            tracing::debug!(seq, "resource disposed, dropping completion");
            return;
        }
        if seq != state.latest_seq {
            tracing::debug!(seq, latest = state.latest_seq, "stale completion discarded");
            return;
        }
        match result {
            Ok(data) => {
                state.data = Some(data);
                tracing::debug!(seq, "load committed");
            }
            Err(e) => {
                let message = error_message(&e);
                tracing::debug!(seq, error = %message, "load failed");
                state.error = Some(message);
            }
        }
        state.loading = false;
    }
    shared.notify();
}

/// Wait for a spawned load. A panicked producer ends the load with the
/// generic error instead of leaving `loading` set.
async fn supervise_load<T>(shared: Arc<Shared<T>>, seq: u64, load: JoinHandle<()>) {
    if let Err(e) = load.await {
        if e.is_panic() && end_load(&shared, seq, Some(GENERIC_ERROR_MESSAGE)) {
            tracing::warn!(seq, "producer panicked");
        }
    }
}

/// Leave the loading state without a result. No-op unless `seq` is still
/// the latest token of a live resource. Returns whether state changed.
fn end_load<T>(shared: &Shared<T>, seq: u64, error: Option<&str>) -> bool {
    {
        let mut state = shared.lock();
        if state.disposed || state.latest_seq != seq || !state.loading {
            return false;
        }
        state.loading = false;
        if let Some(message) = error {
            state.error = Some(message.to_string());
        }
    }
    shared.notify();
    true
}

/// Clears `loading` when a `refetch` future is dropped before it finished.
struct RefetchGuard<'a, T> {
    shared: &'a Shared<T>,
    seq: u64,
    armed: bool,
}

impl<T> Drop for RefetchGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed && end_load(self.shared, self.seq, None) {
            tracing::debug!(seq = self.seq, "refetch abandoned before completion");
        }
    }
}

/// Human-readable message for a failed load.
fn error_message(e: &CoreError) -> String {
    let message = e.to_string();
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
