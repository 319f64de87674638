//! Trailing-edge debounce with sequence tickets
//!
//! Every event takes a ticket from a monotonically increasing counter and
//! then waits out the delay. Only the holder of the newest ticket when its
//! delay ends proceeds; an event arriving during the wait restarts the
//! effective timer because its own wait ends later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet period before a tone change is issued
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Collapses bursts of events into the last one
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    /// Register a new event and return its ticket
    pub fn ticket(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Wait out the delay; true when `ticket` is still the newest
    pub async fn settle(&self, ticket: u64) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_latest(ticket)
    }

    /// Whether no event arrived after `ticket`
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let debouncer = Debouncer::default();
        assert_eq!(debouncer.ticket(), 1);
        assert_eq!(debouncer.ticket(), 2);
        assert!(debouncer.is_latest(2));
        assert!(!debouncer.is_latest(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_event_settles() {
        let debouncer = Debouncer::default();
        let ticket = debouncer.ticket();
        let start = tokio::time::Instant::now();
        assert!(debouncer.settle(ticket).await);
        assert!(start.elapsed() >= DEFAULT_DEBOUNCE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_last_only() {
        let debouncer = Debouncer::default();

        let first = async {
            let ticket = debouncer.ticket();
            debouncer.settle(ticket).await
        };
        let second = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let ticket = debouncer.ticket();
            debouncer.settle(ticket).await
        };

        let (first, second) = tokio::join!(first, second);
        assert!(!first);
        assert!(second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_past_the_window_both_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let ticket = debouncer.ticket();
        assert!(debouncer.settle(ticket).await);
        let ticket = debouncer.ticket();
        assert!(debouncer.settle(ticket).await);
    }
}
