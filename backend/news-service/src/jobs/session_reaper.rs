//! Session Reaper Background Job
//!
//! Periodically deletes sessions that have expired or been revoked so the
//! session table does not grow without bound.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::sleep;

use crate::services::SessionStore;

pub async fn start_session_reaper(sessions: Arc<dyn SessionStore>, interval: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Starting session reaper background job"
    );

    loop {
        sleep(interval).await;
        reap_once(sessions.as_ref()).await;
    }
}

/// Run a single purge cycle, returning the number of sessions removed
pub async fn reap_once(sessions: &dyn SessionStore) -> u64 {
    let cycle_start = Instant::now();

    match sessions.purge_expired().await {
        Ok(removed) => {
            tracing::info!(
                removed,
                duration_ms = cycle_start.elapsed().as_millis(),
                "Session reap cycle completed"
            );
            removed
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                duration_ms = cycle_start.elapsed().as_millis(),
                "Session reap cycle failed"
            );
            0
        }
    }
}
