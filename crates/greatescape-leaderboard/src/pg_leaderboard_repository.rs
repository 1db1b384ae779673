//! PostgreSQL implementation of `LeaderboardRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use greatescape_core::error::DomainError;
use greatescape_core::repository::{LeaderboardRepository, ScoreEntry};
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::schema::CREATE_SCORES_TABLE;

/// PostgreSQL-backed leaderboard.
#[derive(Debug, Clone)]
pub struct PgLeaderboardRepository {
    pool: PgPool,
}

impl PgLeaderboardRepository {
    /// Creates a new `PgLeaderboardRepository` with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the scores table and its ranking index if they are missing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the statements fail.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_SCORES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}

fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("leaderboard store: {err}"))
}

#[async_trait]
impl LeaderboardRepository for PgLeaderboardRepository {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, room_id = %entry.room_id))]
    async fn record_score(&self, entry: &ScoreEntry) -> Result<(), DomainError> {
        let elapsed = i64::try_from(entry.elapsed_seconds).map_err(|_| {
            DomainError::Validation(format!(
                "elapsed time out of range: {}",
                entry.elapsed_seconds
            ))
        })?;

        sqlx::query(
            "INSERT INTO escape_scores (id, nickname, elapsed_seconds, room_id, recorded_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(entry.id)
        .bind(&entry.nickname)
        .bind(elapsed)
        .bind(&entry.room_id)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        debug!(elapsed_seconds = entry.elapsed_seconds, "score recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT id, nickname, elapsed_seconds, room_id, recorded_at \
             FROM escape_scores \
             ORDER BY elapsed_seconds ASC, recorded_at ASC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        rows.iter()
            .map(|row| {
                let elapsed: i64 = row.try_get("elapsed_seconds").map_err(infrastructure)?;
                let id: Uuid = row.try_get("id").map_err(infrastructure)?;
                let recorded_at: DateTime<Utc> =
                    row.try_get("recorded_at").map_err(infrastructure)?;
                Ok(ScoreEntry {
                    id,
                    nickname: row.try_get("nickname").map_err(infrastructure)?,
                    elapsed_seconds: u64::try_from(elapsed).unwrap_or(0),
                    room_id: row.try_get("room_id").map_err(infrastructure)?,
                    recorded_at,
                })
            })
            .collect()
    }
}
