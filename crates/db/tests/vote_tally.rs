//! Integration tests for atomic vote recording and the leaderboard query.

use std::time::Duration;

use assert_matches::assert_matches;
use chirpy_core::vote::{validate_vote, ContenderInput, ValidatedVote};
use chirpy_db::error::VoteError;
use chirpy_db::repositories::{LeaderboardRepo, SpeciesRepo, VoteRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn vote(winner: &str, loser: &str) -> ValidatedVote {
    validate_vote(
        ContenderInput {
            slug: Some(winner),
            ..Default::default()
        },
        ContenderInput {
            slug: Some(loser),
            ..Default::default()
        },
    )
    .unwrap()
}

async fn tallies(pool: &PgPool, slug: &str) -> (i32, i32) {
    let species = SpeciesRepo::find_by_slug(pool, slug)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("{slug} should exist"));
    (species.wins, species.losses)
}

async fn set_tallies(pool: &PgPool, slug: &str, wins: i32, losses: i32) {
    SpeciesRepo::ensure(pool, slug, None).await.unwrap();
    sqlx::query("UPDATE birds SET wins = $2, losses = $3 WHERE slug = $1")
        .bind(slug)
        .bind(wins)
        .bind(losses)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Vote recording
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_vote_creates_both_species(pool: PgPool) {
    let outcome = VoteRepo::record_vote(&pool, &vote("turdus-migratorius", "corvus-corax"), None)
        .await
        .unwrap();

    assert!(!outcome.replayed);
    assert_eq!(outcome.updated.len(), 2);
    assert_eq!(outcome.updated[0].slug, "turdus-migratorius");
    assert_eq!((outcome.updated[0].wins, outcome.updated[0].losses), (1, 0));
    assert_eq!(outcome.updated[1].slug, "corvus-corax");
    assert_eq!((outcome.updated[1].wins, outcome.updated[1].losses), (0, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_changes_only_the_two_contenders(pool: PgPool) {
    set_tallies(&pool, "a", 2, 3).await;
    set_tallies(&pool, "b", 5, 1).await;
    set_tallies(&pool, "bystander", 7, 7).await;

    VoteRepo::record_vote(&pool, &vote("a", "b"), None)
        .await
        .unwrap();

    assert_eq!(tallies(&pool, "a").await, (3, 3));
    assert_eq!(tallies(&pool, "b").await, (5, 2));
    assert_eq!(tallies(&pool, "bystander").await, (7, 7));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_backfills_common_names(pool: PgPool) {
    let input = validate_vote(
        ContenderInput {
            slug: Some("turdus-migratorius"),
            scientific_name: None,
            common_name: Some("American Robin"),
        },
        ContenderInput {
            slug: Some("corvus-corax"),
            scientific_name: None,
            common_name: None,
        },
    )
    .unwrap();

    let outcome = VoteRepo::record_vote(&pool, &input, None).await.unwrap();

    assert_eq!(
        outcome.updated[0].common_name.as_deref(),
        Some("American Robin")
    );
    assert_eq!(outcome.updated[1].common_name, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_votes_lose_no_updates(pool: PgPool) {
    const VOTES: usize = 20;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..VOTES {
        let pool = pool.clone();
        // Alternate roles so opposing locks are exercised on the shared pair.
        let loser = if i % 2 == 0 { "corvus-corax" } else { "pica-pica" };
        tasks.spawn(async move {
            VoteRepo::record_vote(&pool, &vote("turdus-migratorius", loser), None).await
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(tallies(&pool, "turdus-migratorius").await, (VOTES as i32, 0));
    assert_eq!(tallies(&pool, "corvus-corax").await, (0, (VOTES / 2) as i32));
    assert_eq!(tallies(&pool, "pica-pica").await, (0, (VOTES / 2) as i32));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn opposing_concurrent_votes_both_apply(pool: PgPool) {
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..10 {
        let pool = pool.clone();
        let (winner, loser) = if i % 2 == 0 {
            ("corvus-corax", "pica-pica")
        } else {
            ("pica-pica", "corvus-corax")
        };
        tasks.spawn(async move { VoteRepo::record_vote(&pool, &vote(winner, loser), None).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(tallies(&pool, "corvus-corax").await, (5, 5));
    assert_eq!(tallies(&pool, "pica-pica").await, (5, 5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_request_id_is_counted_once(pool: PgPool) {
    let request_id = Uuid::new_v4();
    let ballot = vote("turdus-migratorius", "corvus-corax");

    let first = VoteRepo::record_vote(&pool, &ballot, Some(request_id))
        .await
        .unwrap();
    let second = VoteRepo::record_vote(&pool, &ballot, Some(request_id))
        .await
        .unwrap();

    assert!(!first.replayed);
    assert!(second.replayed);
    assert_eq!(first.updated, second.updated);
    assert_eq!(tallies(&pool, "turdus-migratorius").await, (1, 0));
    assert_eq!(tallies(&pool, "corvus-corax").await, (0, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_id_reused_for_other_pair_is_rejected(pool: PgPool) {
    let request_id = Uuid::new_v4();
    VoteRepo::record_vote(&pool, &vote("turdus-migratorius", "corvus-corax"), Some(request_id))
        .await
        .unwrap();

    let result =
        VoteRepo::record_vote(&pool, &vote("pica-pica", "corvus-corax"), Some(request_id)).await;

    assert_matches!(
        result,
        Err(VoteError::RequestIdReused { winner_slug, loser_slug, .. })
            if winner_slug == "turdus-migratorius" && loser_slug == "corvus-corax"
    );
    assert_eq!(tallies(&pool, "turdus-migratorius").await, (1, 0));
    assert_eq!(tallies(&pool, "corvus-corax").await, (0, 1));
    assert!(SpeciesRepo::find_by_slug(&pool, "pica-pica").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_id_reused_with_swapped_pair_is_rejected(pool: PgPool) {
    let request_id = Uuid::new_v4();
    VoteRepo::record_vote(&pool, &vote("turdus-migratorius", "corvus-corax"), Some(request_id))
        .await
        .unwrap();

    let result =
        VoteRepo::record_vote(&pool, &vote("corvus-corax", "turdus-migratorius"), Some(request_id))
            .await;

    assert_matches!(result, Err(VoteError::RequestIdReused { .. }));
    assert_eq!(tallies(&pool, "corvus-corax").await, (0, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distinct_request_ids_are_counted_separately(pool: PgPool) {
    let ballot = vote("turdus-migratorius", "corvus-corax");

    VoteRepo::record_vote(&pool, &ballot, Some(Uuid::new_v4()))
        .await
        .unwrap();
    VoteRepo::record_vote(&pool, &ballot, Some(Uuid::new_v4()))
        .await
        .unwrap();

    assert_eq!(tallies(&pool, "turdus-migratorius").await, (2, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_vote_leaves_no_partial_state(pool: PgPool) {
    // Make the loser update fail after the winner update has run.
    sqlx::query(
        "ALTER TABLE birds ADD CONSTRAINT ck_test_losses_cap CHECK (losses < 1)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result =
        VoteRepo::record_vote(&pool, &vote("turdus-migratorius", "corvus-corax"), None).await;
    assert!(result.is_err());

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM birds")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 0, "rows created inside the failed vote must roll back");
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_breaks_ties_by_total_matches(pool: PgPool) {
    set_tallies(&pool, "five-of-five", 5, 0).await;
    set_tallies(&pool, "five-of-seven", 5, 2).await;
    set_tallies(&pool, "three-of-three", 3, 0).await;

    let board = LeaderboardRepo::top_species(&pool, 50).await.unwrap();
    let slugs: Vec<_> = board.iter().map(|e| e.slug.as_str()).collect();

    assert_eq!(slugs, ["five-of-seven", "five-of-five", "three-of-three"]);
    assert_eq!(board[0].total_matches, 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_skips_species_without_matches(pool: PgPool) {
    set_tallies(&pool, "idle", 0, 0).await;
    set_tallies(&pool, "loser-only", 0, 1).await;

    let board = LeaderboardRepo::top_species(&pool, 50).await.unwrap();

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].slug, "loser-only");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_respects_limit(pool: PgPool) {
    for (i, slug) in ["a", "b", "c", "d"].into_iter().enumerate() {
        set_tallies(&pool, slug, i as i32 + 1, 0).await;
    }

    let board = LeaderboardRepo::top_species(&pool, 2).await.unwrap();
    let slugs: Vec<_> = board.iter().map(|e| e.slug.as_str()).collect();

    assert_eq!(slugs, ["d", "c"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_then_leaderboard_scenario(pool: PgPool) {
    VoteRepo::record_vote(&pool, &vote("turdus-migratorius", "corvus-corax"), None)
        .await
        .unwrap();

    let board = LeaderboardRepo::top_species(&pool, 10).await.unwrap();

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].slug, "turdus-migratorius");
    assert_eq!((board[0].wins, board[0].losses), (1, 0));
    assert_eq!(board[1].slug, "corvus-corax");
    assert_eq!(board[1].total_matches, 1);
}

// ---------------------------------------------------------------------------
// Request-id retention
// ---------------------------------------------------------------------------

async fn request_count(pool: &PgPool) -> i64 {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vote_requests")
        .fetch_one(pool)
        .await
        .unwrap();
    count.0
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn prune_requests_removes_only_expired_receipts(pool: PgPool) {
    let ballot = vote("turdus-migratorius", "corvus-corax");
    let stale = Uuid::new_v4();
    let fresh = Uuid::new_v4();
    VoteRepo::record_vote(&pool, &ballot, Some(stale)).await.unwrap();
    VoteRepo::record_vote(&pool, &ballot, Some(fresh)).await.unwrap();
    sqlx::query(
        "UPDATE vote_requests SET created_at = NOW() - INTERVAL '2 days' WHERE request_id = $1",
    )
    .bind(stale)
    .execute(&pool)
    .await
    .unwrap();

    let deleted = VoteRepo::prune_requests(&pool, Duration::from_secs(3600))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(request_count(&pool).await, 1);
    assert_eq!(tallies(&pool, "turdus-migratorius").await, (2, 0));

    // The surviving key still deduplicates.
    let replay = VoteRepo::record_vote(&pool, &ballot, Some(fresh)).await.unwrap();
    assert!(replay.replayed);
    assert_eq!(tallies(&pool, "turdus-migratorius").await, (2, 0));
}
