//! Ranked reads over the `birds` table.

use sqlx::PgPool;

use crate::models::species::LeaderboardEntry;

/// Read-only ranking queries.
pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// Species that have played at least one match, ranked by wins, then by
    /// total matches, both descending. `limit` must already be resolved
    /// (see `chirpy_core::leaderboard::resolve_limit`).
    pub async fn top_species(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT id::BIGINT AS id, slug, common_name, wins, losses, \
                    (wins + losses)::BIGINT AS total_matches \
             FROM birds \
             WHERE wins + losses > 0 \
             ORDER BY wins DESC, total_matches DESC, id \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
