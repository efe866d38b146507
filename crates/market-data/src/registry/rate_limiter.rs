//! Token bucket rate limiter for price providers.
//!
//! Each provider gets its own bucket. Free price APIs throttle aggressively,
//! so a refresh of many symbols is spread out instead of tripping HTTP 429.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::provider::RateLimit;

/// Default rate limit: 30 requests per minute (CoinGecko public tier).
const DEFAULT_REQUESTS_PER_MINUTE: u32 = 30;

/// Default bucket capacity (allows bursting one refresh of a small portfolio).
const DEFAULT_BURST_CAPACITY: f64 = 10.0;

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    /// Tokens per second.
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn new(config: &RateLimitConfig) -> Self {
        Self {
            tokens: config.burst_capacity,
            last_update: Instant::now(),
            rate: f64::from(config.requests_per_minute) / 60.0,
            capacity: config.burst_capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();
        if self.tokens >= 1.0 || self.rate <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.rate)
        }
    }
}

/// Rate limiter configuration for one provider.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Maximum requests per minute.
    pub requests_per_minute: u32,
    /// Maximum burst capacity.
    pub burst_capacity: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            burst_capacity: DEFAULT_BURST_CAPACITY,
        }
    }
}

impl From<&RateLimit> for RateLimitConfig {
    fn from(limit: &RateLimit) -> Self {
        Self {
            requests_per_minute: limit.requests_per_minute,
            burst_capacity: limit.max_concurrency.max(1) as f64,
        }
    }
}

/// Per-provider token buckets, shared by every concurrent fetch of a batch.
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    configs: Mutex<HashMap<String, RateLimitConfig>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            configs: Mutex::new(HashMap::new()),
        }
    }

    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<String, TokenBucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter buckets mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_configs(&self) -> MutexGuard<'_, HashMap<String, RateLimitConfig>> {
        self.configs.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter configs mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Configure the limits for a provider, resetting its bucket.
    pub fn configure(&self, provider: &str, config: RateLimitConfig) {
        self.lock_configs().insert(provider.to_string(), config);
        self.lock_buckets().remove(provider);
    }

    fn bucket_config(&self, provider: &str) -> RateLimitConfig {
        self.lock_configs()
            .get(provider)
            .cloned()
            .unwrap_or_default()
    }

    /// Wait until a token is available for `provider`, then take it.
    pub async fn acquire(&self, provider: &str) {
        loop {
            let wait_time = {
                let config = self.bucket_config(provider);
                let mut buckets = self.lock_buckets();
                let bucket = buckets
                    .entry(provider.to_string())
                    .or_insert_with(|| TokenBucket::new(&config));

                if bucket.try_acquire() {
                    return;
                }
                bucket.time_until_available()
            };

            debug!(
                "Rate limiter: waiting {:?} for provider '{}'",
                wait_time, provider
            );
            tokio::time::sleep(wait_time.max(Duration::from_millis(1))).await;
        }
    }

    /// Take a token without waiting. Returns false when the provider is throttled.
    pub fn try_acquire(&self, provider: &str) -> bool {
        let config = self.bucket_config(provider);
        let mut buckets = self.lock_buckets();
        buckets
            .entry(provider.to_string())
            .or_insert_with(|| TokenBucket::new(&config))
            .try_acquire()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
