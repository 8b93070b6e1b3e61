pub mod leaderboard;
pub mod species;
pub mod vote;
