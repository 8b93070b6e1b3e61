//! Leaderboard size policy.

/// Rows returned when no usable `limit` is supplied.
pub const DEFAULT_LIMIT: i64 = 50;

/// Resolve the raw `limit` query value.
///
/// Missing, non-numeric, zero, or negative values fall back to
/// [`DEFAULT_LIMIT`]. Positive values are used as given.
pub fn resolve_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_LIMIT)
}
