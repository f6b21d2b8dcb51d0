//! Rate limiting policy: windowing, keys, and the allow/deny decision.

mod key;
mod limiter;
mod window;

pub use key::{CounterKey, Identifier, ANONYMOUS_IDENTIFIER};
pub use limiter::{Decision, RateLimiter};
pub use window::{Timestamp, Window};
