//! Handler for the ranked species listing.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chirpy_core::leaderboard::resolve_limit;
use chirpy_db::repositories::LeaderboardRepo;

use crate::error::AppResult;
use crate::query::LeaderboardParams;
use crate::state::AppState;

/// GET /api/leaderboard?limit=N
///
/// Bare JSON array of species with at least one match, best first. A query
/// string that does not deserialize (e.g. a repeated `limit`) is treated like
/// a missing limit.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let raw_limit = match &params {
        Ok(Query(params)) => params.limit.as_deref(),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Ignoring unparsable leaderboard query");
            None
        }
    };
    let limit = resolve_limit(raw_limit);
    let entries = LeaderboardRepo::top_species(&state.pool, limit).await?;

    Ok(Json(entries))
}
