//! In-memory per-key daily rate limiter
//!
//! A fixed 24-hour window opens on a key's first request; once the count
//! reaches the limit, further requests are refused until the window expires.
//! State lives in process memory: restarts reset quotas, which is acceptable
//! for the anonymous tier this guards.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Anonymous callers get this many guarded writes per day
pub const ANON_DAILY_LIMIT: u32 = 3;

/// Outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited { retry_at: DateTime<Utc> },
}

struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

/// Per-key counter over a rolling daily window
pub struct IpRateLimiter {
    limit: u32,
    windows: Mutex<HashMap<String, Window>>,
}

impl IpRateLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check and consume one unit of quota for `key`
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Utc::now())
    }

    /// Clock-injected variant of [`check`](Self::check)
    pub fn check_at(&self, key: &str, now: DateTime<Utc>) -> Decision {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            // a poisoned counter map fails open rather than locking everyone out
            Err(poisoned) => poisoned.into_inner(),
        };

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now - window.started_at >= Duration::hours(24) {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.limit {
            return Decision::Limited {
                retry_at: window.started_at + Duration::hours(24),
            };
        }

        window.count += 1;
        Decision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_enforced_within_window() {
        let limiter = IpRateLimiter::new(3);
        let now = Utc::now();

        for _ in 0..3 {
            assert_eq!(limiter.check_at("ip-a", now), Decision::Allowed);
        }
        let retry_at = match limiter.check_at("ip-a", now) {
            Decision::Limited { retry_at } => retry_at,
            Decision::Allowed => panic!("fourth request should be limited"),
        };
        assert_eq!(retry_at, now + Duration::hours(24));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = IpRateLimiter::new(1);
        let now = Utc::now();

        assert_eq!(limiter.check_at("ip-a", now), Decision::Allowed);
        assert_eq!(limiter.check_at("ip-b", now), Decision::Allowed);
        assert!(matches!(
            limiter.check_at("ip-a", now),
            Decision::Limited { .. }
        ));
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let limiter = IpRateLimiter::new(1);
        let now = Utc::now();

        assert_eq!(limiter.check_at("ip-a", now), Decision::Allowed);
        assert!(matches!(
            limiter.check_at("ip-a", now + Duration::hours(23)),
            Decision::Limited { .. }
        ));
        assert_eq!(
            limiter.check_at("ip-a", now + Duration::hours(24)),
            Decision::Allowed
        );
    }
}
