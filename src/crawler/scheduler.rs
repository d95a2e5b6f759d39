//! Per-site request pacing
//!
//! Every Site Profile gets one [`Scheduler`]. It enforces:
//! - a maximum number of requests in flight (parallelism, normally 1)
//! - a fixed minimum delay before each request, counted from both the start and the
//!   completion of the previous one
//!
//! Requests are only ever ordered, never dropped. Waiting for a slot is cancellable.

use crate::VosDroitsError;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Pacing state of one site
#[derive(Debug, Clone, Default)]
pub struct DomainState {
    /// Number of requests issued to this site
    pub request_count: u64,

    /// Start or completion of the last request to this site, whichever is later
    pub last_request_time: Option<Instant>,
}

impl DomainState {
    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < delay).then(|| delay - elapsed)
    }

    /// Records that a request was made to this site
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }

    /// Records that a request finished; the next delay is counted from here
    pub fn record_completion(&mut self, now: Instant) {
        if self.last_request_time.map_or(true, |last| last < now) {
            self.last_request_time = Some(now);
        }
    }
}

/// A granted request slot
///
/// Dropping it marks the request as finished, then releases the slot.
#[derive(Debug)]
pub struct SchedulerPermit {
    state: Arc<Mutex<DomainState>>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for SchedulerPermit {
    fn drop(&mut self) {
        lock(&self.state).record_completion(Instant::now());
    }
}

/// Serializes and spaces out requests to one site
#[derive(Debug)]
pub struct Scheduler {
    site: String,
    delay: Duration,
    slots: Arc<Semaphore>,
    state: Arc<Mutex<DomainState>>,
}

impl Scheduler {
    pub fn new(site: impl Into<String>, max_parallelism: u32, delay: Duration) -> Self {
        Self {
            site: site.into(),
            delay,
            slots: Arc::new(Semaphore::new(max_parallelism.max(1) as usize)),
            state: Arc::new(Mutex::new(DomainState::default())),
        }
    }

    /// Waits for a request slot and for the politeness delay
    ///
    /// The request is recorded when the permit is granted and again when the permit is
    /// dropped, so a slow response still leaves a full delay before the next request.
    ///
    /// # Returns
    ///
    /// * `Ok(SchedulerPermit)` - The caller may send its request now
    /// * `Err(VosDroitsError::Cancelled)` - The token fired while waiting
    pub async fn acquire(
        &self,
        cancel: &CancellationToken,
    ) -> Result<SchedulerPermit, VosDroitsError> {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(VosDroitsError::Cancelled),
            permit = self.slots.clone().acquire_owned() => permit
                .map_err(|_| VosDroitsError::Cancelled)?,
        };

        loop {
            let wait = {
                let mut state = self.lock_state();
                let now = Instant::now();
                match state.time_until_next_request(self.delay, now) {
                    None => {
                        state.record_request(now);
                        None
                    }
                    Some(wait) => Some(wait),
                }
            };

            let Some(wait) = wait else {
                tracing::trace!("Request slot granted for {}", self.site);
                return Ok(SchedulerPermit {
                    state: Arc::clone(&self.state),
                    _permit: permit,
                });
            };

            tracing::debug!("Waiting {:?} before next request to {}", wait, self.site);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(VosDroitsError::Cancelled),
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    /// Number of requests issued through this scheduler
    pub fn request_count(&self) -> u64 {
        self.lock_state().request_count
    }

    fn lock_state(&self) -> MutexGuard<'_, DomainState> {
        lock(&self.state)
    }
}

// The state is plain data; a panic elsewhere cannot leave it inconsistent.
fn lock(state: &Mutex<DomainState>) -> MutexGuard<'_, DomainState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
