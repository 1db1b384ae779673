//! Leaderboard repository abstraction.
//!
//! The leaderboard is a side channel: the session engine never reads it, and
//! it is written at most once per escaped session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Default number of entries returned by a leaderboard read.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Largest number of entries a single leaderboard read may return.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Longest nickname kept on the leaderboard, in characters.
pub const MAX_NICKNAME_CHARS: usize = 20;

/// One recorded escape time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Display name of the player.
    pub nickname: String,
    /// Escape time in whole seconds.
    pub elapsed_seconds: u64,
    /// Room the player escaped from.
    pub room_id: String,
    /// When the score was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Normalises a player-supplied nickname: trims it, caps it at
/// [`MAX_NICKNAME_CHARS`] characters and substitutes `Anonymous` when empty.
#[must_use]
pub fn normalize_nickname(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return "Anonymous".to_owned();
    }
    trimmed.chars().take(MAX_NICKNAME_CHARS).collect()
}

/// Clamps a requested read size to `1..=MAX_LEADERBOARD_LIMIT`.
#[must_use]
pub fn normalize_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT)
}

/// Repository trait for recording and reading escape times.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Persist one score entry.
    async fn record_score(&self, entry: &ScoreEntry) -> Result<(), DomainError>;

    /// The fastest `limit` entries, ascending by elapsed time; ties are
    /// broken by the earlier recording time.
    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nickname_defaults_blank_to_anonymous() {
        assert_eq!(normalize_nickname(None), "Anonymous");
        assert_eq!(normalize_nickname(Some("   ")), "Anonymous");
    }

    #[test]
    fn test_normalize_nickname_trims_and_truncates() {
        assert_eq!(normalize_nickname(Some("  ada  ")), "ada");
        let long = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(normalize_nickname(Some(long)), "abcdefghijklmnopqrst");
    }

    #[test]
    fn test_normalize_limit_clamps_to_bounds() {
        assert_eq!(normalize_limit(None), 10);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(500)), 100);
        assert_eq!(normalize_limit(Some(25)), 25);
    }
}
