use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Free-tier ORS allowance for directions and geocoding.
pub const ORS_REQUESTS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(40) {
    Some(n) => n,
    None => panic!("quota must be non-zero"),
};

pub fn ors_limiter() -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(ORS_REQUESTS_PER_MINUTE)))
}

/// Blocks the calling thread until the limiter admits one request.
pub fn wait(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        let delay = not_until.wait_time_from(clock.now());
        log::debug!("Rate limited, sleeping {:?}", delay);
        std::thread::sleep(delay);
    }
}
