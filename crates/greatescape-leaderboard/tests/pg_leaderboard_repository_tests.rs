//! Integration tests for `PgLeaderboardRepository`.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`; run
//! them with `cargo test -- --ignored`.

use chrono::{Duration, TimeZone, Utc};
use greatescape_core::repository::{LeaderboardRepository, ScoreEntry};
use greatescape_leaderboard::pg_leaderboard_repository::PgLeaderboardRepository;
use sqlx::PgPool;
use uuid::Uuid;

fn make_entry(nickname: &str, elapsed_seconds: u64, offset_secs: i64) -> ScoreEntry {
    ScoreEntry {
        id: Uuid::new_v4(),
        nickname: nickname.to_owned(),
        elapsed_seconds,
        room_id: "clockwork-vault".to_owned(),
        recorded_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
            + Duration::seconds(offset_secs),
    }
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = "../../migrations")]
async fn test_top_scores_returns_empty_vec_for_empty_table(pool: PgPool) {
    let repo = PgLeaderboardRepository::new(pool);

    let scores = repo.top_scores(10).await.unwrap();

    assert!(scores.is_empty());
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = "../../migrations")]
async fn test_record_and_read_single_score(pool: PgPool) {
    let repo = PgLeaderboardRepository::new(pool);
    let entry = make_entry("ada", 95, 0);

    repo.record_score(&entry).await.unwrap();

    let scores = repo.top_scores(10).await.unwrap();
    assert_eq!(scores, vec![entry]);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = "../../migrations")]
async fn test_top_scores_orders_by_time_then_recording(pool: PgPool) {
    let repo = PgLeaderboardRepository::new(pool);
    for entry in [
        make_entry("slow", 300, 0),
        make_entry("tie-late", 60, 9),
        make_entry("tie-early", 60, 3),
        make_entry("fast", 30, 1),
    ] {
        repo.record_score(&entry).await.unwrap();
    }

    let scores = repo.top_scores(3).await.unwrap();

    let names: Vec<&str> = scores.iter().map(|e| e.nickname.as_str()).collect();
    assert_eq!(names, ["fast", "tie-early", "tie-late"]);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = "../../migrations")]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let repo = PgLeaderboardRepository::new(pool);

    repo.ensure_schema().await.unwrap();
    repo.ensure_schema().await.unwrap();

    assert!(repo.top_scores(1).await.unwrap().is_empty());
}
