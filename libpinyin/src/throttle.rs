//! Minimum spacing between fallback lookups.
//!
//! The remote dictionary is a third-party site, so consecutive requests are
//! spaced by a fixed floor. The wait blocks the calling thread.

use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_start: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_start: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until a new request may start, then mark it as started.
    ///
    /// The first call returns immediately. Later calls sleep until
    /// `min_interval` has passed since the previous start. Returns the time
    /// spent waiting.
    pub fn wait(&mut self) -> Duration {
        let mut waited = Duration::ZERO;
        if let Some(last) = self.last_start {
            let remaining = self.min_interval.saturating_sub(last.elapsed());
            if !remaining.is_zero() {
                info!(
                    "waiting {:.1}s before the next dictionary request",
                    remaining.as_secs_f32()
                );
                thread::sleep(remaining);
                waited = remaining;
            }
        }
        self.last_start = Some(Instant::now());
        waited
    }
}
