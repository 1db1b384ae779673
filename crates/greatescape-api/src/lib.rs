//! The Great Escape: HTTP API.
//!
//! Exposes the room catalog, content orchestration, play sessions and the
//! leaderboard over JSON. The binary in `main.rs` wires real providers; tests
//! build the same router over test doubles.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/rooms", routes::rooms::router())
        .nest("/api/v1/sessions", routes::sessions::router())
        .nest("/api/v1/leaderboard", routes::leaderboard::router())
        .nest("/api/v1/assets", routes::assets::router())
        .with_state(state)
}
