//! Test repositories: mock `LeaderboardRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use greatescape_core::error::DomainError;
use greatescape_core::repository::{LeaderboardRepository, ScoreEntry};

/// A leaderboard that records every `record_score` call and answers
/// `top_scores` from what it has recorded, fastest first.
#[derive(Debug, Default)]
pub struct RecordingLeaderboard {
    recorded: Mutex<Vec<ScoreEntry>>,
}

impl RecordingLeaderboard {
    /// Create an empty recording leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded entries, in recording order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn recorded(&self) -> Vec<ScoreEntry> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeaderboardRepository for RecordingLeaderboard {
    async fn record_score(&self, entry: &ScoreEntry) -> Result<(), DomainError> {
        self.recorded.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, DomainError> {
        let mut entries = self.recorded.lock().unwrap().clone();
        entries.sort_by_key(|e| (e.elapsed_seconds, e.recorded_at));
        entries.truncate(limit);
        Ok(entries)
    }
}

/// A leaderboard that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingLeaderboard;

#[async_trait]
impl LeaderboardRepository for FailingLeaderboard {
    async fn record_score(&self, _entry: &ScoreEntry) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn top_scores(&self, _limit: usize) -> Result<Vec<ScoreEntry>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
