pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /vote                 submit a vote
/// GET  /leaderboard?limit=N  ranked species
/// GET  /species/{slug}       single species
/// GET  /health               liveness ("OK")
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/vote", post(handlers::vote::submit_vote))
        .route("/leaderboard", get(handlers::leaderboard::get_leaderboard))
        .route("/species/{slug}", get(handlers::species::get_species))
        .merge(health::liveness_router())
}
