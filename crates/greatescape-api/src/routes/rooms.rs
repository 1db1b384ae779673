//! Routes for the room catalog and content orchestration.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use greatescape_content::application::{command_handlers, query_handlers};
use greatescape_content::domain::commands;
use greatescape_content::domain::prompts::SynthesisMode;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRoomRequest {
    /// Free-text theme.
    pub theme: String,
    /// `"360"` or `"flat"`.
    pub mode: SynthesisMode,
}

/// Response body for GET /generation-status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatusResponse {
    /// Whether any synthesis or upgrade is in flight.
    pub is_generating: bool,
}

/// GET /
async fn list_rooms(State(state): State<AppState>) -> Json<Vec<query_handlers::RoomSummaryView>> {
    Json(query_handlers::list_rooms(&state.catalog))
}

/// GET /{room_id}
async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<query_handlers::RoomView>, ApiError> {
    let view = query_handlers::get_room_by_id(&state.catalog, &room_id)?;
    Ok(Json(view))
}

/// POST /generate
#[instrument(skip(state, request), fields(mode = ?request.mode))]
async fn generate_room(
    State(state): State<AppState>,
    Json(request): Json<GenerateRoomRequest>,
) -> Result<Json<query_handlers::RoomView>, ApiError> {
    let command = commands::SynthesizeRoom {
        correlation_id: Uuid::new_v4(),
        theme: request.theme,
        mode: request.mode,
    };

    info!(correlation_id = %command.correlation_id, "handling synthesize_room command");

    let room =
        command_handlers::handle_synthesize_room(&command, &state.orchestrator, &state.catalog)
            .await?;

    Ok(Json(query_handlers::room_view(&room)))
}

/// POST /{room_id}/upgrade
#[instrument(skip(state))]
async fn upgrade_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<query_handlers::RoomView>, ApiError> {
    let command = commands::UpgradeRoomVisuals {
        correlation_id: Uuid::new_v4(),
        room_id,
    };

    info!(correlation_id = %command.correlation_id, "handling upgrade_room_visuals command");

    let room = command_handlers::handle_upgrade_room_visuals(
        &command,
        &state.orchestrator,
        &state.catalog,
    )
    .await?;

    Ok(Json(query_handlers::room_view(&room)))
}

/// GET /generation-status
async fn generation_status(State(state): State<AppState>) -> Json<GenerationStatusResponse> {
    Json(GenerationStatusResponse {
        is_generating: state.orchestrator.is_generating(),
    })
}

/// Returns the router for rooms.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms))
        .route("/generate", post(generate_room))
        .route("/generation-status", get(generation_status))
        .route("/{room_id}", get(get_room))
        .route("/{room_id}/upgrade", post(upgrade_room))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    use axum::http::StatusCode;
    use greatescape_leaderboard::in_memory::InMemoryLeaderboard;
    use greatescape_test_support::{
        FailingImageProvider, FailingTextProvider, ScriptedTextProvider, StaticImageProvider,
        gated_room_json,
    };
    use tower::ServiceExt;

    use crate::routes::testing::{app_state_with, get, json_body, post, test_app_state};

    #[tokio::test]
    async fn test_list_rooms_returns_catalog() {
        // Arrange
        let app = router().with_state(test_app_state());

        // Act
        let response = app.oneshot(get("/")).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|room| room["id"].as_str().unwrap())
            .collect();
        assert!(ids.contains(&"victorian-study"));
        assert!(ids.contains(&"clockwork-vault"));
    }

    #[tokio::test]
    async fn test_get_room_returns_404_for_unknown_room() {
        let app = router().with_state(test_app_state());

        let response = app.oneshot(get("/attic")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["error"], "room_not_found");
    }

    #[tokio::test]
    async fn test_generate_room_returns_generated_room() {
        // Arrange
        let state = test_app_state();
        let app = router().with_state(state.clone());
        let body = serde_json::json!({ "theme": "Clockwork Vault", "mode": "flat" });

        // Act
        let response = app.oneshot(post("/generate", &body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let room_id = json["id"].as_str().unwrap();
        assert!(room_id.starts_with("ai-"));
        assert_eq!(json["mode"], "2d");
        assert_eq!(json["visuallyUpgraded"], true);
        assert!(json["quiz"].get("correctAnswer").is_none());
        assert!(state.catalog.get(room_id).is_some());
    }

    #[tokio::test]
    async fn test_generate_room_returns_502_when_text_provider_fails() {
        let state = app_state_with(
            Arc::new(FailingTextProvider),
            Arc::new(StaticImageProvider::new()),
            Arc::new(InMemoryLeaderboard::new()),
        );
        let app = router().with_state(state);
        let body = serde_json::json!({ "theme": "Sunken Library", "mode": "360" });

        let response = app.oneshot(post("/generate", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = json_body(response).await;
        assert_eq!(json["error"], "content_generation_failed");
    }

    #[tokio::test]
    async fn test_generate_room_returns_400_for_blank_theme() {
        let app = router().with_state(test_app_state());
        let body = serde_json::json!({ "theme": "   ", "mode": "flat" });

        let response = app.oneshot(post("/generate", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_room_returns_422_for_unknown_mode() {
        let app = router().with_state(test_app_state());
        let body = serde_json::json!({ "theme": "Sunken Library", "mode": "vr" });

        let response = app.oneshot(post("/generate", &body)).await.unwrap();

        // Axum returns 422 for deserialization failures.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upgrade_room_replaces_background() {
        let state = test_app_state();
        let app = router().with_state(state.clone());

        let response = app
            .oneshot(post("/victorian-study/upgrade", &serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["id"], "victorian-study");
        assert_eq!(json["visuallyUpgraded"], true);
        assert!(state.catalog.get("victorian-study").unwrap().visually_upgraded());
    }

    #[tokio::test]
    async fn test_upgrade_room_keeps_room_when_images_fail() {
        let state = app_state_with(
            Arc::new(ScriptedTextProvider::new(gated_room_json())),
            Arc::new(FailingImageProvider),
            Arc::new(InMemoryLeaderboard::new()),
        );
        let app = router().with_state(state);

        let response = app
            .oneshot(post("/victorian-study/upgrade", &serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["visuallyUpgraded"], false);
    }

    #[tokio::test]
    async fn test_generation_status_is_idle_between_requests() {
        let app = router().with_state(test_app_state());

        let response = app.oneshot(get("/generation-status")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["isGenerating"], false);
    }
}
