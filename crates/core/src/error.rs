#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A vote request that can never succeed as submitted (missing or
    /// malformed species identifiers). Not retried.
    #[error("Invalid vote: {0}")]
    InvalidVote(String),

    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
