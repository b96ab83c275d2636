//! Background scheduler for cache eviction.
//!
//! Cached reports are already refused once stale; this loop drops the
//! entries nobody has read within the cache TTL.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use crate::main_lib::AppState;

const PURGE_INTERVAL_SECS: u64 = 60;

/// Starts the background cache purge loop.
pub fn start_cache_purge_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!(
            "Cache purge scheduler started ({}s interval)",
            PURGE_INTERVAL_SECS
        );

        let mut purge_interval = interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        // First tick completes immediately; nothing is cached yet.
        purge_interval.tick().await;

        loop {
            purge_interval.tick().await;
            run_purge(&state);
        }
    });
}

fn run_purge(state: &AppState) {
    let purged = state.purge_caches();
    if purged > 0 {
        debug!("Purged {} expired cache entries", purged);
    }
}
