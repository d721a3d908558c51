use crate::domain::model::TransmissionResult;
use crate::domain::ports::TransmissionFetcher;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Single-flight wrapper around a [`TransmissionFetcher`]: a busy flag, not
/// a queue. Requests made while a fetch is in flight are dropped.
pub struct Tuner<F: TransmissionFetcher> {
    fetcher: Arc<F>,
    busy: Arc<AtomicBool>,
}

impl<F: TransmissionFetcher> Clone for Tuner<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            busy: Arc::clone(&self.busy),
        }
    }
}

/// Clears the busy flag however the fetch ends, abort included.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<F: TransmissionFetcher> Tuner<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn claim(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.busy)))
    }

    /// Fetch one transmission. `None` if another fetch is still in flight.
    pub async fn receive(&self, current_time_label: &str) -> Option<TransmissionResult> {
        let Some(guard) = self.claim() else {
            tracing::debug!("📻 Tuner busy, ignoring request");
            return None;
        };
        Some(self.fetch(guard, current_time_label).await)
    }

    /// Spawn a fetch in the background. The busy flag is claimed before
    /// spawning, so back-to-back calls cannot both start one.
    pub fn tune_in(&self, current_time_label: String) -> Option<JoinHandle<TransmissionResult>> {
        let Some(guard) = self.claim() else {
            tracing::debug!("📻 Tuner busy, ignoring request");
            return None;
        };
        let tuner = self.clone();
        Some(tokio::spawn(async move {
            tuner.fetch(guard, &current_time_label).await
        }))
    }

    async fn fetch(&self, _guard: BusyGuard, current_time_label: &str) -> TransmissionResult {
        tracing::info!("📻 Scanning frequencies at {}", current_time_label);
        let result = self.fetcher.request_transmission(current_time_label).await;
        if result.is_signal_lost() {
            tracing::warn!("📻 Signal lost");
        } else {
            tracing::info!("📻 Received transmission on {}", result.frequency);
        }
        result
    }
}
