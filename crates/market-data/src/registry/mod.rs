//! Provider throttling.
//!
//! Holds the per-provider token buckets the fetcher waits on before every request.

mod rate_limiter;

pub use rate_limiter::{RateLimitConfig, RateLimiter};
