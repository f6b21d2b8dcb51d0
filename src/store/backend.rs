//! Counter store trait for abstracting over backing storage.

use async_trait::async_trait;

use crate::error::{FloodgateError, Result};
use crate::ratelimit::CounterKey;

/// Outcome of an atomic increment-with-ceiling update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeilingOutcome {
    /// The counter was below the ceiling and has been incremented; carries
    /// the new count.
    Admitted(u64),
    /// The counter had already reached the ceiling and was left unchanged;
    /// carries the current count.
    AtCeiling(u64),
}

/// The contract the rate limiter requires from its backing storage.
///
/// Implementations may keep counters in memory, a key-value store, or a
/// relational table; the limiter assumes nothing beyond these operations.
/// Counter records are never deleted by the limiter itself — expiry of
/// past-window records is a storage-layer retention concern.
///
/// Every operation fails with
/// [`FloodgateError::StoreUnavailable`] when the underlying storage cannot
/// be reached.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Fetch the count recorded under `key`, or `None` if no record exists.
    async fn fetch_count(&self, key: &CounterKey) -> Result<Option<u64>>;

    /// Create the record under `key` at count 1 if absent, otherwise
    /// increment it. Returns the new count.
    async fn record_request(&self, key: &CounterKey) -> Result<u64>;

    /// Atomically increment the counter under `key` unless it has reached
    /// `ceiling`.
    ///
    /// Strict mode requires this primitive (a conditional update or
    /// compare-and-swap on the backing storage). Stores without one keep the
    /// default implementation, which reports the capability as missing.
    async fn increment_with_ceiling(
        &self,
        key: &CounterKey,
        ceiling: u64,
    ) -> Result<CeilingOutcome> {
        let _ = (key, ceiling);
        Err(FloodgateError::StrictModeUnsupported)
    }
}
