//! Floodgate - Fixed-Window Rate Limiting
//!
//! This crate implements a fixed-window request rate limiter with a
//! pluggable counter store. The windowing and counting policy lives in
//! [`ratelimit`]; backing storage implements the narrow contract in
//! [`store`], so counters can live in memory, a key-value store, or a
//! relational table without changing the policy.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod store;
