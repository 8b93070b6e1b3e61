//! Domain types and pure logic for the Chirpy vote backend.
//!
//! Nothing in this crate performs I/O; the storage and HTTP layers build on it.

pub mod error;
pub mod leaderboard;
pub mod slug;
pub mod types;
pub mod vote;
