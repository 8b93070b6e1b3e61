//! Handler for vote submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chirpy_core::vote::validate_vote;
use chirpy_db::models::vote::SubmitVote;
use chirpy_db::repositories::VoteRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/vote
///
/// Record one vote. Responds with `{ "updated": [winner, loser] }`.
/// Missing or identical slugs are rejected with 400 before any storage access.
pub async fn submit_vote(
    State(state): State<AppState>,
    payload: Result<Json<SubmitVote>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let vote = validate_vote(input.winner(), input.loser())?;
    let outcome = VoteRepo::record_vote(&state.pool, &vote, input.request_id).await?;

    Ok(Json(outcome))
}
