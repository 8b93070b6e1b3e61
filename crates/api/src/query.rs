//! Query parameter types for API handlers.

use serde::Deserialize;

/// Parameters for `GET /api/leaderboard`.
///
/// `limit` stays a raw string so that non-numeric input falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<String>,
}
