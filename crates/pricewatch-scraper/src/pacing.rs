use std::time::Duration;

use rand::Rng;

use pricewatch_core::AppConfig;

/// Randomized pause inserted between consecutive store requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min_ms: u64,
    max_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            min_ms: 500,
            max_ms: 1000,
        }
    }
}

impl Pacing {
    /// An inverted range collapses to `min_ms`.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms,
            max_ms: max_ms.max(min_ms),
        }
    }

    /// No pause at all. Used by tests and local mirrors.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.scraper_pacing_min_ms, config.scraper_pacing_max_ms)
    }

    #[must_use]
    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_ms),
            Duration::from_millis(self.max_ms),
        )
    }

    /// Uniform draw from `[min_ms, max_ms]`.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    pub async fn wait(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        tracing::debug!(delay_ms = delay.as_millis(), "pacing before next store");
        tokio::time::sleep(delay).await;
    }
}
