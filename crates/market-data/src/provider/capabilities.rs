//! How hard a price provider may be called.

/// Request budget a provider advertises to the fetcher.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Sustained request budget.
    pub requests_per_minute: u32,

    /// Requests that may go out back to back before throttling kicks in.
    pub max_concurrency: usize,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 30,
            max_concurrency: 5,
        }
    }
}
