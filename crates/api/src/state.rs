/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted. It is created once at
/// startup and injected here rather than held in a global.
#[derive(Clone)]
pub struct AppState {
    pub pool: chirpy_db::DbPool,
}
