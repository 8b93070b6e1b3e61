//! Species rows and leaderboard projections.

use chirpy_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `birds` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Species {
    pub id: DbId,
    pub slug: String,
    pub common_name: Option<String>,
    pub wins: i32,
    pub losses: i32,
}

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub id: DbId,
    pub slug: String,
    pub common_name: Option<String>,
    pub wins: i32,
    pub losses: i32,
    pub total_matches: i64,
}
