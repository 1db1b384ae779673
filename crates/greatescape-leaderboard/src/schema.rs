//! Leaderboard database schema.

/// SQL to create the scores table.
pub const CREATE_SCORES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS escape_scores (
    id              UUID PRIMARY KEY,
    nickname        VARCHAR(64) NOT NULL,
    elapsed_seconds BIGINT NOT NULL CHECK (elapsed_seconds >= 0),
    room_id         VARCHAR(255) NOT NULL,
    recorded_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_escape_scores_ranking
    ON escape_scores (elapsed_seconds, recorded_at);
";
