//! In-memory counter store implementation.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;
use crate::ratelimit::{CounterKey, Timestamp};

use super::backend::{CeilingOutcome, CounterStore};

/// An in-memory [`CounterStore`] over a concurrent map.
///
/// Suitable for tests and single-process deployments. Counts are scoped to
/// this process; a shared deployment needs a store backed by shared storage.
///
/// The map's per-key entry lock makes both `record_request` and
/// `increment_with_ceiling` atomic with respect to concurrent callers, so
/// this store supports strict mode.
#[derive(Default)]
pub struct MemoryStore {
    /// Counter records indexed by (identifier, window start)
    counters: DashMap<CounterKey, u64>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
        }
    }

    /// The number of counter records currently held.
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Remove all counter records.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        self.counters.clear();
    }

    /// Drop every record whose window started before `cutoff`.
    ///
    /// The limiter never deletes records; embedding processes call this
    /// periodically with the start of the oldest window they still care
    /// about.
    pub fn purge_before(&self, cutoff: Timestamp) {
        self.counters.retain(|key, _| key.window_start >= cutoff);
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn fetch_count(&self, key: &CounterKey) -> Result<Option<u64>> {
        Ok(self.counters.get(key).map(|entry| *entry))
    }

    async fn record_request(&self, key: &CounterKey) -> Result<u64> {
        let mut entry = self.counters.entry(key.clone()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    async fn increment_with_ceiling(
        &self,
        key: &CounterKey,
        ceiling: u64,
    ) -> Result<CeilingOutcome> {
        let mut entry = self.counters.entry(key.clone()).or_insert(0);
        if *entry >= ceiling {
            Ok(CeilingOutcome::AtCeiling(*entry))
        } else {
            *entry += 1;
            Ok(CeilingOutcome::Admitted(*entry))
        }
    }
}
