//! Leaderboard read endpoint.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use greatescape_core::repository::{ScoreEntry, normalize_limit};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// Entries to return; clamped to `1..=100`, default 10.
    pub limit: Option<usize>,
}

/// GET /
async fn top_scores(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<ScoreEntry>>, ApiError> {
    let entries = state
        .leaderboard
        .top_scores(normalize_limit(query.limit))
        .await?;
    Ok(Json(entries))
}

/// Returns the router for the leaderboard.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(top_scores))
}
