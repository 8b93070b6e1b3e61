//! Atomic vote recording.

use std::time::Duration;

use chirpy_core::vote::ValidatedVote;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::VoteError;
use crate::models::species::Species;
use crate::models::vote::VoteOutcome;
use crate::repositories::species_repo::{SpeciesRepo, COLUMNS};

/// Applies votes to species tallies.
pub struct VoteRepo;

impl VoteRepo {
    /// Record one vote: the winner gains a win and the loser gains a loss.
    ///
    /// Both species are created on first reference. Creation, both
    /// increments, and the optional `request_id` receipt commit together or
    /// not at all; an early return drops the transaction, which rolls it back.
    ///
    /// If `request_id` was already recorded for the same winner and loser,
    /// nothing is applied and the current rows are returned with `replayed`
    /// set. A key first used for a different pair fails with
    /// [`VoteError::RequestIdReused`].
    pub async fn record_vote(
        pool: &PgPool,
        vote: &ValidatedVote,
        request_id: Option<Uuid>,
    ) -> Result<VoteOutcome, VoteError> {
        let mut tx = pool.begin().await?;

        if let Some(request_id) = request_id {
            // Blocks on a concurrent holder of the same key until it ends.
            let first_seen = sqlx::query(
                "INSERT INTO vote_requests (request_id, winner_slug, loser_slug) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (request_id) DO NOTHING",
            )
            .bind(request_id)
            .bind(&vote.winner.slug)
            .bind(&vote.loser.slug)
            .execute(&mut *tx)
            .await?
            .rows_affected()
                > 0;

            if !first_seen {
                let (winner_slug, loser_slug): (String, String) = sqlx::query_as(
                    "SELECT winner_slug, loser_slug FROM vote_requests WHERE request_id = $1",
                )
                .bind(request_id)
                .fetch_one(&mut *tx)
                .await?;
                tx.rollback().await?;

                if winner_slug != vote.winner.slug || loser_slug != vote.loser.slug {
                    return Err(VoteError::RequestIdReused {
                        request_id,
                        winner_slug,
                        loser_slug,
                    });
                }

                tracing::info!(%request_id, "Duplicate vote request, not applied");
                return Ok(Self::replay(pool, &winner_slug, &loser_slug).await?);
            }
        }

        for contender in vote.lock_order() {
            SpeciesRepo::ensure_in(&mut *tx, &contender.slug, contender.common_name.as_deref())
                .await?;
        }

        let winner_query =
            format!("UPDATE birds SET wins = wins + 1 WHERE slug = $1 RETURNING {COLUMNS}");
        let winner = sqlx::query_as::<_, Species>(&winner_query)
            .bind(&vote.winner.slug)
            .fetch_one(&mut *tx)
            .await?;

        let loser_query =
            format!("UPDATE birds SET losses = losses + 1 WHERE slug = $1 RETURNING {COLUMNS}");
        let loser = sqlx::query_as::<_, Species>(&loser_query)
            .bind(&vote.loser.slug)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            winner = %winner.slug,
            loser = %loser.slug,
            winner_wins = winner.wins,
            loser_losses = loser.losses,
            "Vote recorded",
        );

        Ok(VoteOutcome {
            updated: vec![winner, loser],
            replayed: false,
        })
    }

    /// Current rows for a vote that was already applied under its request id.
    async fn replay(
        pool: &PgPool,
        winner_slug: &str,
        loser_slug: &str,
    ) -> Result<VoteOutcome, sqlx::Error> {
        let mut updated = Vec::with_capacity(2);
        for slug in [winner_slug, loser_slug] {
            // The original vote committed both rows and rows are never deleted.
            let species = SpeciesRepo::find_by_slug(pool, slug)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            updated.push(species);
        }
        Ok(VoteOutcome {
            updated,
            replayed: true,
        })
    }

    /// Delete idempotency receipts older than `retention`.
    ///
    /// Returns the number of rows removed. A client retrying with a pruned
    /// key is counted again.
    pub async fn prune_requests(pool: &PgPool, retention: Duration) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM vote_requests \
             WHERE created_at < NOW() - make_interval(secs => $1)",
        )
        .bind(retention.as_secs_f64())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
