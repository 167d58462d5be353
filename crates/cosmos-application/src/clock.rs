use std::time::Duration;

use cosmos_core::clock::Clock;
use tokio::time::Instant;

/// A clock on tokio's timeline.
///
/// Follows `tokio::time::pause` and `advance`, so async tests can run a
/// whole meditation in virtual time.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The tokio instant corresponding to `at` on this clock.
    pub fn instant_at(&self, at: Duration) -> Instant {
        self.origin + at
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_follows_paused_time() {
        let clock = TokioClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        tokio::time::advance(Duration::from_secs(16)).await;
        assert_eq!(clock.now(), Duration::from_secs(16));
        assert_eq!(clock.instant_at(Duration::from_secs(16)), Instant::now());
    }
}
