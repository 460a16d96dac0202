use tokio::time::{Duration, Instant, sleep};

/// Enforces a minimum gap between consecutive requests
///
/// A single slot rather than a token bucket: the limiter only remembers when
/// the previous request went out. Callers issue requests one at a time, which
/// `&mut self` makes explicit.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Sleeps until `min_interval` has passed since the previous call, then
    /// records the current instant as the new request time
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        self.last_request = Some(Instant::now());
    }
}
