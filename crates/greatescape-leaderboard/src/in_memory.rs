//! In-memory leaderboard for deployments without a database.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use greatescape_core::error::DomainError;
use greatescape_core::repository::{LeaderboardRepository, ScoreEntry};

/// Keeps scores sorted fastest first. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    entries: Mutex<Vec<ScoreEntry>>,
}

impl InMemoryLeaderboard {
    /// Creates an empty leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryLeaderboard {
    async fn record_score(&self, entry: &ScoreEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        // Insert after any equal key so earlier recordings stay ahead.
        let key = (entry.elapsed_seconds, entry.recorded_at);
        let at = entries.partition_point(|e| (e.elapsed_seconds, e.recorded_at) <= key);
        entries.insert(at, entry.clone());
        Ok(())
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, DomainError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn entry(nickname: &str, elapsed_seconds: u64, offset_secs: i64) -> ScoreEntry {
        ScoreEntry {
            id: Uuid::new_v4(),
            nickname: nickname.to_owned(),
            elapsed_seconds,
            room_id: "clockwork-vault".to_owned(),
            recorded_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
                + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn test_top_scores_orders_fastest_first() {
        // Arrange
        let board = InMemoryLeaderboard::new();
        board.record_score(&entry("slow", 300, 0)).await.unwrap();
        board.record_score(&entry("fast", 45, 1)).await.unwrap();
        board.record_score(&entry("middle", 120, 2)).await.unwrap();

        // Act
        let top = board.top_scores(10).await.unwrap();

        // Assert
        let names: Vec<&str> = top.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["fast", "middle", "slow"]);
    }

    #[tokio::test]
    async fn test_top_scores_breaks_ties_by_recording_time() {
        let board = InMemoryLeaderboard::new();
        board.record_score(&entry("second", 60, 5)).await.unwrap();
        board.record_score(&entry("first", 60, 1)).await.unwrap();
        board.record_score(&entry("third", 60, 5)).await.unwrap();

        let top = board.top_scores(10).await.unwrap();

        let names: Vec<&str> = top.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_top_scores_respects_limit() {
        let board = InMemoryLeaderboard::new();
        for i in 0..5 {
            board.record_score(&entry("p", 10 * i, 0)).await.unwrap();
        }

        let top = board.top_scores(2).await.unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].elapsed_seconds, 0);
        assert_eq!(top[1].elapsed_seconds, 10);
        assert_eq!(board.len(), 5);
    }

    #[tokio::test]
    async fn test_empty_leaderboard_returns_no_scores() {
        let board = InMemoryLeaderboard::new();

        let top = board.top_scores(10).await.unwrap();

        assert!(top.is_empty());
        assert!(board.is_empty());
    }
}
