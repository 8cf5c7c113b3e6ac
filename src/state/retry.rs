//! Retrieval backoff state
//!
//! The detail-fetch loop treats transport failures as a global backpressure
//! signal rather than a per-item condition: one counter spans the whole
//! retrieval pass, grows on every failure regardless of which identifier
//! failed, and resets only when a fetch succeeds.

use std::time::Duration;

/// Counter value from which the wait stops growing
pub const BACKOFF_CEILING: u32 = 11;

/// Fixed wait applied at and beyond the ceiling
const MAX_WAIT: Duration = Duration::from_secs(35 * 60);

/// Computes the backoff wait for a retry counter value.
///
/// `2^counter` seconds for counters below [`BACKOFF_CEILING`]; a flat
/// 35 minutes from the ceiling on, no matter how far the counter climbs.
pub fn wait_duration(counter: u32) -> Duration {
    if counter >= BACKOFF_CEILING {
        MAX_WAIT
    } else {
        Duration::from_secs(1u64 << counter)
    }
}

/// Mutable backoff counter for one retrieval pass.
///
/// Constructed fresh per pass; tests may inject a starting counter via
/// [`RetryState::with_counter`].
#[derive(Debug, Default)]
pub struct RetryState {
    counter: u32,
}

impl RetryState {
    /// Creates a state with the counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with an injected starting counter
    pub fn with_counter(counter: u32) -> Self {
        Self { counter }
    }

    /// Current counter value
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Records a failed fetch and returns the wait to apply before the next
    /// identifier is attempted
    pub fn record_failure(&mut self) -> Duration {
        self.counter = self.counter.saturating_add(1);
        wait_duration(self.counter)
    }

    /// Records a successful fetch, resetting the counter
    pub fn record_success(&mut self) {
        self.counter = 0;
    }
}
