use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Shared by every request a provider issues, across all endpoints.
pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub const DEFAULT_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(50) {
    Some(n) => n,
    None => panic!("rate limit must be non-zero"),
};

pub fn maps_limiter(per_second: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_second(per_second)))
}
