//! Great Escape Leaderboard: storage for escape times.
//!
//! Two `LeaderboardRepository` implementations live here: a PostgreSQL one
//! for deployments with a database and an in-memory one for everything
//! else.

pub mod in_memory;
pub mod pg_leaderboard_repository;
pub mod schema;
