//! Core fixed-window rate limiter implementation.

use tracing::{debug, instrument, trace};

use crate::config::{LimiterConfig, Mode};
use crate::error::Result;
use crate::store::{CeilingOutcome, CounterStore};

use super::key::{CounterKey, Identifier};
use super::window::{Timestamp, Window};

/// The outcome of a rate limit check.
///
/// Both variants are normal outcomes; store failures are surfaced as errors,
/// never folded into a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed and has been counted.
    Allow,
    /// The identifier has exhausted its budget for the current window.
    Deny,
}

impl Decision {
    /// Whether the request may proceed.
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Whether the request was rejected.
    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny)
    }
}

/// The core rate limiter: at most `max_requests` requests per identifier per
/// fixed `window_seconds` window.
///
/// The limiter holds no per-request state of its own; all counts live in the
/// injected [`CounterStore`], so instances are cheap and any number of
/// request-handling contexts can share one behind an `Arc`.
///
/// Windows are aligned to epoch boundaries. An identifier can therefore issue
/// up to `2 x max_requests` requests across a window boundary (a full budget
/// just before it and another just after); callers that need smoothing over
/// boundaries want a different algorithm, not a larger window.
pub struct RateLimiter<S: CounterStore> {
    /// Backing counter store
    store: S,
    /// Policy configuration, fixed at construction
    config: LimiterConfig,
}

impl<S: CounterStore> RateLimiter<S> {
    /// Create a new rate limiter with default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: LimiterConfig::default(),
        }
    }

    /// Create a new rate limiter with the given configuration.
    pub fn with_config(store: S, config: LimiterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// The limiter's configuration.
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide whether a request from `identifier` observed at `now` may
    /// proceed, recording it if so.
    ///
    /// In relaxed mode this performs exactly one store read and, when the
    /// request is admitted, one store write; a denied request writes nothing.
    /// In strict mode the read-then-write pair is replaced by a single
    /// atomic increment-with-ceiling update.
    ///
    /// Fails with [`FloodgateError::StoreUnavailable`] when the store cannot
    /// be read or written.
    ///
    /// [`FloodgateError::StoreUnavailable`]: crate::error::FloodgateError::StoreUnavailable
    #[instrument(skip_all, fields(identifier = %identifier, now = now))]
    pub async fn check_and_record(
        &self,
        identifier: &Identifier,
        now: Timestamp,
    ) -> Result<Decision> {
        let window = Window::containing(now, self.config.window_seconds);
        let key = CounterKey::new(identifier.clone(), window.start());

        trace!(key = %key, mode = ?self.config.mode, "Checking rate limit");

        match self.config.mode {
            Mode::Relaxed => self.check_relaxed(&key).await,
            Mode::Strict => self.check_strict(&key).await,
        }
    }

    /// Best-effort read-then-write check.
    async fn check_relaxed(&self, key: &CounterKey) -> Result<Decision> {
        let count = self.store.fetch_count(key).await?.unwrap_or(0);

        if count < self.config.max_requests {
            let new_count = self.store.record_request(key).await?;
            debug!(key = %key, count = new_count, "Request allowed");
            Ok(Decision::Allow)
        } else {
            debug!(
                key = %key,
                count = count,
                limit = self.config.max_requests,
                "Rate limit exceeded"
            );
            Ok(Decision::Deny)
        }
    }

    /// Single conditional-update check for stores with an atomic
    /// increment-with-ceiling primitive.
    async fn check_strict(&self, key: &CounterKey) -> Result<Decision> {
        match self
            .store
            .increment_with_ceiling(key, self.config.max_requests)
            .await?
        {
            CeilingOutcome::Admitted(count) => {
                debug!(key = %key, count = count, "Request allowed");
                Ok(Decision::Allow)
            }
            CeilingOutcome::AtCeiling(count) => {
                debug!(
                    key = %key,
                    count = count,
                    limit = self.config.max_requests,
                    "Rate limit exceeded"
                );
                Ok(Decision::Deny)
            }
        }
    }

    /// The current counter value for an identifier in the window containing
    /// `now`.
    ///
    /// Returns `None` if no request has been counted in that window. One
    /// store read, no write.
    pub async fn current_count(
        &self,
        identifier: &Identifier,
        now: Timestamp,
    ) -> Result<Option<u64>> {
        let window = Window::containing(now, self.config.window_seconds);
        let key = CounterKey::new(identifier.clone(), window.start());
        self.store.fetch_count(&key).await
    }
}
