//! In-memory sliding-window rate limiting keyed by user.
//!
//! State lives in this process only. Restarting the service, or running
//! more than one instance, resets or splits every user's allowance.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use super::auth::UserId;

/// Requests allowed per user per window by default.
pub const DEFAULT_REQUESTS_PER_WINDOW: usize = 60;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

const SWEEP_THRESHOLD: usize = 1024;

/// Outcome of [`SlidingWindowRateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request counts against the window.
    Allowed { remaining: usize },
    /// The window is full; try again after `retry_after`.
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    /// True for [`RateLimitDecision::Allowed`].
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Per-user request log pruned on every check.
///
/// Rejected requests are not recorded, so a client that keeps retrying
/// regains capacity as soon as its oldest accepted request leaves the
/// window.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use mockable::DefaultClock;
/// use pawdesk::domain::auth::UserId;
/// use pawdesk::domain::rate_limit::SlidingWindowRateLimiter;
/// use uuid::Uuid;
///
/// let limiter = SlidingWindowRateLimiter::new(Arc::new(DefaultClock), 1, Duration::from_secs(60));
/// let user = UserId::new(Uuid::nil());
/// assert!(limiter.check(user).is_allowed());
/// assert!(!limiter.check(user).is_allowed());
/// ```
pub struct SlidingWindowRateLimiter {
    clock: Arc<dyn Clock>,
    limit: usize,
    window: Duration,
    window_delta: TimeDelta,
    requests: Mutex<HashMap<UserId, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowRateLimiter {
    /// Allow `limit` requests per user within any `window`.
    pub fn new(clock: Arc<dyn Clock>, limit: usize, window: Duration) -> Self {
        Self {
            clock,
            limit,
            window,
            window_delta: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Allow `limit` requests per user in any sixty-second window.
    pub fn per_minute(clock: Arc<dyn Clock>, limit: usize) -> Self {
        Self::new(clock, limit, DEFAULT_WINDOW)
    }

    /// Configured allowance per window.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Record a request for `user` if the window has room.
    pub fn check(&self, user: UserId) -> RateLimitDecision {
        let now = self.clock.utc();
        let cutoff = now.checked_sub_signed(self.window_delta);
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if requests.len() > SWEEP_THRESHOLD {
            requests.retain(|_, log| {
                prune(log, cutoff);
                !log.is_empty()
            });
        }

        let log = requests.entry(user).or_default();
        prune(log, cutoff);
        if log.len() >= self.limit {
            return RateLimitDecision::Limited {
                retry_after: self.window,
            };
        }
        log.push_back(now);
        RateLimitDecision::Allowed {
            remaining: self.limit - log.len(),
        }
    }

    /// Users with at least one request still inside the window.
    #[must_use]
    pub fn tracked_users(&self) -> usize {
        let cutoff = self.clock.utc().checked_sub_signed(self.window_delta);
        let requests = self
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        requests
            .values()
            .filter(|log| log.back().is_some_and(|last| cutoff.is_none_or(|c| *last > c)))
            .count()
    }
}

fn prune(log: &mut VecDeque<DateTime<Utc>>, cutoff: Option<DateTime<Utc>>) {
    let Some(cutoff) = cutoff else {
        return;
    };
    while log.front().is_some_and(|oldest| *oldest <= cutoff) {
        log.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::clock::MutableClock;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn user(n: u128) -> UserId {
        UserId::new(Uuid::from_u128(n))
    }

    #[rstest]
    fn sixty_first_request_is_limited(clock: Arc<MutableClock>) {
        let limiter = SlidingWindowRateLimiter::per_minute(clock.clone(), 60);
        for n in 0..60 {
            assert!(limiter.check(user(1)).is_allowed(), "request {n}");
            clock.advance(Duration::from_millis(500));
        }
        assert_eq!(
            limiter.check(user(1)),
            RateLimitDecision::Limited {
                retry_after: Duration::from_secs(60)
            }
        );
    }

    #[rstest]
    fn users_are_counted_separately(clock: Arc<MutableClock>) {
        let limiter = SlidingWindowRateLimiter::per_minute(clock, 2);
        assert!(limiter.check(user(1)).is_allowed());
        assert!(limiter.check(user(1)).is_allowed());
        assert!(!limiter.check(user(1)).is_allowed());
        assert_eq!(
            limiter.check(user(2)),
            RateLimitDecision::Allowed { remaining: 1 }
        );
    }

    #[rstest]
    fn window_slides(clock: Arc<MutableClock>) {
        let limiter = SlidingWindowRateLimiter::per_minute(clock.clone(), 2);
        assert!(limiter.check(user(1)).is_allowed());
        clock.advance(Duration::from_secs(30));
        assert!(limiter.check(user(1)).is_allowed());
        assert!(!limiter.check(user(1)).is_allowed());

        clock.advance(Duration::from_secs(30));
        assert_eq!(
            limiter.check(user(1)),
            RateLimitDecision::Allowed { remaining: 0 }
        );
        assert!(!limiter.check(user(1)).is_allowed());
    }

    #[rstest]
    fn idle_users_stop_being_tracked(clock: Arc<MutableClock>) {
        let limiter = SlidingWindowRateLimiter::per_minute(clock.clone(), 5);
        limiter.check(user(1));
        limiter.check(user(2));
        assert_eq!(limiter.tracked_users(), 2);
        clock.advance(Duration::from_secs(61));
        assert_eq!(limiter.tracked_users(), 0);
    }
}
