//! Proactive waiting on the GitHub core rate limit.

use octocrab::Octocrab;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: usize = 5;

/// Snapshot of the core (issues, pulls) rate limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CoreRateLimit {
    /// Requests remaining in the current window.
    pub remaining: usize,
    /// Unix timestamp when the window resets.
    pub reset: u64,
}

impl CoreRateLimit {
    /// How long to sleep before the next call, if at all.
    pub(crate) fn wait_duration(&self, now: u64) -> Option<Duration> {
        if self.remaining >= MIN_REMAINING_THRESHOLD || self.reset <= now {
            return None;
        }

        let wait_secs = self.reset - now;
        if wait_secs > MAX_WAIT_SECS {
            warn!(
                wait_secs,
                max_wait = MAX_WAIT_SECS,
                "Rate limit reset too far in future, capping wait time"
            );
        }
        Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
    }
}

/// Sleeps until the core rate limit resets when few requests remain.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub(crate) async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let limit = CoreRateLimit {
        remaining: rate_limit.resources.core.remaining,
        reset: rate_limit.resources.core.reset,
    };

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    if let Some(wait) = limit.wait_duration(now) {
        info!(
            remaining = limit.remaining,
            wait_secs = wait.as_secs(),
            "Rate limit low, waiting for reset"
        );
        tokio::time::sleep(wait).await;
    }
    Ok(())
}
