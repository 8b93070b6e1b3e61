//! Periodic cleanup of expired vote idempotency keys.
//!
//! A `requestId` only needs to outlive the client's retry window, so rows in
//! `vote_requests` older than the retention period are deleted on a fixed
//! interval.

use std::time::Duration;

use chirpy_db::repositories::VoteRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the retention loop until `cancel` is triggered.
pub async fn run(pool: PgPool, retention: Duration, cancel: CancellationToken) {
    tracing::info!(
        retention_secs = retention.as_secs(),
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Vote request retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Vote request retention job stopping");
                break;
            }
            _ = interval.tick() => prune_once(&pool, retention).await,
        }
    }
}

async fn prune_once(pool: &PgPool, retention: Duration) {
    match VoteRepo::prune_requests(pool, retention).await {
        Ok(0) => tracing::debug!("Vote request retention: no rows to purge"),
        Ok(deleted) => tracing::info!(deleted, "Vote request retention: purged expired keys"),
        Err(e) => tracing::error!(error = %e, "Vote request retention: cleanup failed"),
    }
}
