//! Route modules organized by bounded context.

pub mod assets;
pub mod health;
pub mod leaderboard;
pub mod rooms;
pub mod sessions;

#[cfg(test)]
mod testing;
