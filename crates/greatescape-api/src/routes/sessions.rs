//! Routes for play sessions.
//!
//! Every command responds with what the engine returned, the events it
//! produced and the refreshed session view, so the client can render the
//! new state without a second request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use greatescape_core::repository::ScoreEntry;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use greatescape_session::application::command_handlers::{self, SessionCommandResult};
use greatescape_session::application::query_handlers::{self, SessionView};
use greatescape_session::domain::commands;
use greatescape_session::domain::engine::InteractionOutcome;
use greatescape_session::domain::events::SessionEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Room to bind straight away.
    #[serde(default)]
    pub room_id: Option<String>,
}

/// Request body for POST /{session_id}/bind-room.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindRoomRequest {
    /// The room to bind.
    pub room_id: String,
}

/// Request body for POST /{session_id}/interact.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractRequest {
    /// The hotspot clicked.
    pub hotspot_id: String,
}

/// Request body for POST /{session_id}/answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The chosen option.
    pub answer: String,
}

/// Request body for POST /{session_id}/score.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    /// Display name; blank becomes `Anonymous`.
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Response body returned after a session command is handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse<T> {
    /// What the engine returned.
    pub outcome: T,
    /// Events produced, in order.
    pub events: Vec<SessionEvent>,
    /// The session after the command.
    pub session: SessionView,
}

fn respond<T>(result: SessionCommandResult<T>) -> Json<CommandResponse<T>> {
    Json(CommandResponse {
        outcome: result.outcome,
        events: result.events,
        session: result.session,
    })
}

/// POST /
#[instrument(skip(state, request), fields(room_id = ?request.room_id))]
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<CommandResponse<()>>, ApiError> {
    let command = commands::CreateSession {
        correlation_id: Uuid::new_v4(),
        room_id: request.room_id,
    };

    info!(correlation_id = %command.correlation_id, "handling create_session command");

    let result = command_handlers::handle_create_session(
        &command,
        state.clock.as_ref(),
        &state.catalog,
        &state.sessions,
    )?;

    Ok(respond(result))
}

/// GET /{session_id}
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let view = query_handlers::get_session_by_id(session_id, state.clock.as_ref(), &state.sessions)?;
    Ok(Json(view))
}

/// POST /{session_id}/bind-room
#[instrument(skip(state, request), fields(room_id = %request.room_id))]
async fn bind_room(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<BindRoomRequest>,
) -> Result<Json<CommandResponse<bool>>, ApiError> {
    let command = commands::BindRoom {
        correlation_id: Uuid::new_v4(),
        session_id,
        room_id: request.room_id,
    };

    info!(correlation_id = %command.correlation_id, "handling bind_room command");

    let result = command_handlers::handle_bind_room(
        &command,
        state.clock.as_ref(),
        &state.catalog,
        &state.sessions,
    )?;

    Ok(respond(result))
}

/// POST /{session_id}/start-timer
#[instrument(skip(state))]
async fn start_timer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CommandResponse<bool>>, ApiError> {
    let command = commands::StartTimer {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling start_timer command");

    let result =
        command_handlers::handle_start_timer(&command, state.clock.as_ref(), &state.sessions)?;

    Ok(respond(result))
}

/// POST /{session_id}/interact
#[instrument(skip(state, request), fields(hotspot_id = %request.hotspot_id))]
async fn interact(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<InteractRequest>,
) -> Result<Json<CommandResponse<InteractionOutcome>>, ApiError> {
    let command = commands::Interact {
        correlation_id: Uuid::new_v4(),
        session_id,
        hotspot_id: request.hotspot_id,
    };

    info!(correlation_id = %command.correlation_id, "handling interact command");

    let result =
        command_handlers::handle_interact(&command, state.clock.as_ref(), &state.sessions)?;

    Ok(respond(result))
}

/// POST /{session_id}/hint
#[instrument(skip(state))]
async fn use_hint(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CommandResponse<String>>, ApiError> {
    let command = commands::UseHint {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling use_hint command");

    let result =
        command_handlers::handle_use_hint(&command, state.clock.as_ref(), &state.sessions)?;

    Ok(respond(result))
}

/// POST /{session_id}/answer
#[instrument(skip(state, request))]
async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<CommandResponse<bool>>, ApiError> {
    let command = commands::SubmitAnswer {
        correlation_id: Uuid::new_v4(),
        session_id,
        answer: request.answer,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_answer command");

    let result =
        command_handlers::handle_submit_answer(&command, state.clock.as_ref(), &state.sessions)?;

    Ok(respond(result))
}

/// POST /{session_id}/reset
#[instrument(skip(state))]
async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CommandResponse<()>>, ApiError> {
    let command = commands::ResetSession {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling reset command");

    let result = command_handlers::handle_reset(&command, state.clock.as_ref(), &state.sessions)?;

    Ok(respond(result))
}

/// POST /{session_id}/score
#[instrument(skip(state, request))]
async fn submit_score(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreEntry>, ApiError> {
    let command = commands::SubmitScore {
        correlation_id: Uuid::new_v4(),
        session_id,
        nickname: request.nickname,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_score command");

    let entry = command_handlers::handle_submit_score(
        &command,
        state.clock.as_ref(),
        &state.sessions,
        state.leaderboard.as_ref(),
    )
    .await?;

    Ok(Json(entry))
}

/// DELETE /{session_id}
#[instrument(skip(state))]
async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::CloseSession {
        correlation_id: Uuid::new_v4(),
        session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling close_session command");

    command_handlers::handle_close_session(&command, &state.sessions)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{session_id}", get(get_session).delete(close_session))
        .route("/{session_id}/bind-room", post(bind_room))
        .route("/{session_id}/start-timer", post(start_timer))
        .route("/{session_id}/interact", post(interact))
        .route("/{session_id}/hint", post(use_hint))
        .route("/{session_id}/answer", post(submit_answer))
        .route("/{session_id}/reset", post(reset))
        .route("/{session_id}/score", post(submit_score))
}
