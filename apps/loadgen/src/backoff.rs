use std::time::Duration;

/// Geometric retry waits with a ceiling.
///
/// Once the next wait would exceed `max` the backoff is exhausted.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    factor: u32,
    max: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, factor: u32, max: Duration) -> Self {
        Self {
            next: initial,
            factor,
            max,
        }
    }

    pub fn next_wait(&mut self) -> Option<Duration> {
        if self.next > self.max {
            return None;
        }
        let wait = self.next;
        self.next = self.next.saturating_mul(self.factor);
        Some(wait)
    }
}

impl Default for Backoff {
    /// 1s, tripling, at most 30s
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 3, Duration::from_secs(30))
    }
}
