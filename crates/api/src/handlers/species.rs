//! Handler for single-species lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chirpy_core::error::CoreError;
use chirpy_core::slug::{normalize_slug, MAX_SLUG_LEN};
use chirpy_db::repositories::SpeciesRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/species/{slug}
pub async fn get_species(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let slug = normalize_slug(&slug)
        .filter(|s| s.chars().count() <= MAX_SLUG_LEN)
        .ok_or_else(|| CoreError::Validation(format!("slug must be 1-{MAX_SLUG_LEN} characters")))?;

    let species = SpeciesRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Species",
                key: slug.to_string(),
            })
        })?;

    Ok(Json(species))
}
