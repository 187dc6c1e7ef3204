use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default number of extractions allowed in flight
pub const DEFAULT_EXTRACT_CONCURRENCY: usize = 100;

pub const MAX_EXTRACT_CONCURRENCY: usize = 1024;

/// Overrides [`DEFAULT_EXTRACT_CONCURRENCY`]
pub const EXTRACT_CONCURRENCY_ENV: &str = "BILLS_EXTRACT_CONCURRENCY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionSnapshot {
    pub limit: usize,
    pub in_flight: usize,
    pub waiters: usize,
    /// Highest `in_flight` observed since the gate was created
    pub peak_in_flight: usize,
}

pub(crate) fn parse_extract_concurrency(raw: Option<&str>, default_value: usize) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default_value)
        .clamp(1, MAX_EXTRACT_CONCURRENCY)
}

/// Concurrency from `BILLS_EXTRACT_CONCURRENCY`, falling back to `default_value`.
pub fn extract_concurrency_from_env(default_value: usize) -> usize {
    let raw = std::env::var(EXTRACT_CONCURRENCY_ENV).ok();
    parse_extract_concurrency(raw.as_deref(), default_value)
}

#[derive(Debug)]
struct GateState {
    limit: usize,
    semaphore: Arc<Semaphore>,
    in_flight: AtomicUsize,
    waiters: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Counting admission gate bounding how many extraction tasks run at once.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    state: Arc<GateState>,
}

impl AdmissionGate {
    /// `limit` is clamped to `1..=MAX_EXTRACT_CONCURRENCY`.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.clamp(1, MAX_EXTRACT_CONCURRENCY);
        Self {
            state: Arc::new(GateState {
                limit,
                semaphore: Arc::new(Semaphore::new(limit)),
                in_flight: AtomicUsize::new(0),
                waiters: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
            }),
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.state.limit
    }

    pub fn snapshot(&self) -> AdmissionSnapshot {
        AdmissionSnapshot {
            limit: self.state.limit,
            in_flight: self.state.in_flight.load(Ordering::Relaxed),
            waiters: self.state.waiters.load(Ordering::Relaxed),
            peak_in_flight: self.state.peak_in_flight.load(Ordering::Relaxed),
        }
    }

    /// Wait for a free slot. The slot is released when the permit drops.
    pub async fn acquire(&self) -> ExtractionPermit {
        // The semaphore is never closed; acquire failures are not expected.
        let waiter = WaiterGuard::new(&self.state);
        let permit = self
            .state
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .unwrap_or_else(|_| unreachable!("extraction semaphore closed"));
        drop(waiter);

        let now = self.state.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.state.peak_in_flight.fetch_max(now, Ordering::Relaxed);
        ExtractionPermit {
            permit,
            state: self.state.clone(),
        }
    }
}

pub struct ExtractionPermit {
    #[allow(dead_code)]
    permit: OwnedSemaphorePermit,
    state: Arc<GateState>,
}

impl Drop for ExtractionPermit {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

struct WaiterGuard<'a> {
    state: &'a GateState,
}

impl<'a> WaiterGuard<'a> {
    fn new(state: &'a GateState) -> Self {
        state.waiters.fetch_add(1, Ordering::Relaxed);
        Self { state }
    }
}

impl Drop for WaiterGuard<'_> {
    fn drop(&mut self) {
        self.state.waiters.fetch_sub(1, Ordering::Relaxed);
    }
}
