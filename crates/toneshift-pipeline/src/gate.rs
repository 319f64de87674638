//! Per-client rate limiting

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Rate limit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    /// Admissions allowed per window
    pub max_requests: usize,
    /// Trailing window length in milliseconds
    pub window_ms: u64,
}

impl RateLimitConfig {
    /// Window length
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_ms: 60_000,
        }
    }
}

/// Sliding-window admission control keyed by client identity
///
/// Each identity keeps the timestamps of its admitted requests. Stale
/// timestamps are pruned on every check, so the map grows with the number of
/// distinct identities until [`RequestGate::sweep_idle`] is called.
pub struct RequestGate {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RequestGate {
    /// Create a gate enforcing `config`
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or reject a request from `identity` at `now`
    pub fn admit(&self, identity: &str, now: Instant) -> bool {
        let window = self.config.window();
        let mut windows = self.windows.lock();
        let stamps = windows.entry(identity.to_string()).or_default();

        stamps.retain(|stamp| now.saturating_duration_since(*stamp) < window);

        if stamps.len() >= self.config.max_requests {
            warn!(identity, limit = self.config.max_requests, "Rate limit exceeded");
            return false;
        }

        stamps.push_back(now);
        debug!(identity, used = stamps.len(), "Request admitted");
        true
    }

    /// Forget identities with no request inside the window
    pub fn sweep_idle(&self, now: Instant) -> usize {
        let window = self.config.window();
        let mut windows = self.windows.lock();
        let before = windows.len();

        windows.retain(|_, stamps| {
            stamps.retain(|stamp| now.saturating_duration_since(*stamp) < window);
            !stamps.is_empty()
        });

        let removed = before - windows.len();
        if removed > 0 {
            debug!(removed, "Swept idle rate limit windows");
        }
        removed
    }

    /// Number of identities currently tracked
    pub fn tracked_identities(&self) -> usize {
        self.windows.lock().len()
    }

    /// Active policy
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(max_requests: usize, window_ms: u64) -> RequestGate {
        RequestGate::new(RateLimitConfig {
            max_requests,
            window_ms,
        })
    }

    #[test]
    fn test_default_policy() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window(), Duration::from_secs(60));
    }

    #[test]
    fn test_gate_admits_up_to_limit() {
        let gate = RequestGate::default();
        let now = Instant::now();
        for _ in 0..10 {
            assert!(gate.admit("1.2.3.4", now));
        }
        assert!(!gate.admit("1.2.3.4", now));
    }

    #[test]
    fn test_gate_reopens_after_window() {
        let gate = gate(2, 1_000);
        let start = Instant::now();
        assert!(gate.admit("a", start));
        assert!(gate.admit("a", start + Duration::from_millis(100)));
        assert!(!gate.admit("a", start + Duration::from_millis(999)));

        // The first stamp is exactly one window old and no longer counts
        assert!(gate.admit("a", start + Duration::from_millis(1_000)));
        assert!(!gate.admit("a", start + Duration::from_millis(1_050)));
    }

    #[test]
    fn test_gate_rejections_do_not_consume_quota() {
        let gate = gate(1, 1_000);
        let start = Instant::now();
        assert!(gate.admit("a", start));
        for ms in [10, 20, 30] {
            assert!(!gate.admit("a", start + Duration::from_millis(ms)));
        }
        assert!(gate.admit("a", start + Duration::from_millis(1_000)));
    }

    #[test]
    fn test_gate_identities_are_independent() {
        let gate = gate(1, 60_000);
        let now = Instant::now();
        assert!(gate.admit("a", now));
        assert!(!gate.admit("a", now));
        assert!(gate.admit("b", now));
        assert_eq!(gate.tracked_identities(), 2);
    }

    #[test]
    fn test_gate_sweep_idle() {
        let gate = gate(5, 1_000);
        let start = Instant::now();
        gate.admit("old", start);
        gate.admit("fresh", start + Duration::from_millis(900));

        assert_eq!(gate.sweep_idle(start + Duration::from_millis(1_200)), 1);
        assert_eq!(gate.tracked_identities(), 1);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// **Property: Window Quota**
        /// *For any* policy, exactly `max_requests` admissions succeed inside
        /// one window, the next fails, and a full window later it succeeds.
        #[test]
        fn prop_quota_per_window(max_requests in 1usize..30, window_ms in 1u64..120_000) {
            let gate = RequestGate::new(RateLimitConfig { max_requests, window_ms });
            let start = Instant::now();

            for _ in 0..max_requests {
                prop_assert!(gate.admit("client", start));
            }
            prop_assert!(!gate.admit("client", start + Duration::from_millis(window_ms - 1)));
            prop_assert!(gate.admit("client", start + Duration::from_millis(window_ms)));
        }
    }
}
