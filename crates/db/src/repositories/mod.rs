//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a connection inside an open transaction).

pub mod leaderboard_repo;
pub mod species_repo;
pub mod vote_repo;

pub use leaderboard_repo::LeaderboardRepo;
pub use species_repo::SpeciesRepo;
pub use vote_repo::VoteRepo;
