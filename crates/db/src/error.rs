use uuid::Uuid;

/// Failure modes of [`crate::repositories::VoteRepo::record_vote`].
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    /// The idempotency key was first used for a different species pair.
    #[error("requestId {request_id} was already used for {winner_slug} over {loser_slug}")]
    RequestIdReused {
        request_id: Uuid,
        winner_slug: String,
        loser_slug: String,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
