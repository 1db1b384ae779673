//! Command handlers for the Session context.
//!
//! Each handler resolves the session, runs one engine operation and stamps
//! the events it produced with metadata, which the caller forwards to the
//! presentation layer.

use std::sync::Arc;

use greatescape_core::clock::Clock;
use greatescape_core::command::Command;
use greatescape_core::error::DomainError;
use greatescape_core::event::EventMetadata;
use greatescape_core::repository::{LeaderboardRepository, ScoreEntry, normalize_nickname};
use greatescape_room::{RoomCatalog, RoomDefinition};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::query_handlers::{SessionView, session_view};
use crate::application::registry::{SessionRecord, SessionRegistry};
use crate::domain::commands::{
    BindRoom, CloseSession, CreateSession, Interact, ResetSession, StartTimer, SubmitAnswer, SubmitScore,
    UseHint,
};
use crate::domain::engine::InteractionOutcome;
use crate::domain::events::SessionEvent;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct SessionCommandResult<T> {
    /// The session the command ran against.
    pub session_id: Uuid,
    /// What the operation returned.
    pub outcome: T,
    /// Events produced, in order.
    pub events: Vec<SessionEvent>,
    /// The session as the command left it.
    pub session: SessionView,
}

fn stamp(
    record: &mut SessionRecord,
    session_id: Uuid,
    correlation_id: Uuid,
    clock: &dyn Clock,
) -> Vec<SessionEvent> {
    let kinds = record.engine.take_events();
    let first = record.engine.version() - i64::try_from(kinds.len()).unwrap_or(0) + 1;
    let occurred_at = clock.now();
    (first..)
        .zip(kinds)
        .map(|(sequence_number, kind)| SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id,
                sequence_number,
                correlation_id,
                occurred_at,
            },
            kind,
        })
        .collect()
}

fn run<C: Command, T>(
    command: &C,
    session_id: Uuid,
    clock: &dyn Clock,
    registry: &SessionRegistry,
    operation: impl FnOnce(&mut SessionRecord) -> T,
) -> Result<SessionCommandResult<T>, DomainError> {
    let correlation_id = command.correlation_id();
    let progress_policy = registry.policies().progress;
    debug!(
        command_type = command.command_type(),
        target_session = ?command.session_id(),
        %session_id,
        "applying session command"
    );
    registry.with_session(session_id, clock, |record| {
        let outcome = operation(record);
        let events = stamp(record, session_id, correlation_id, clock);
        record.track_timer(clock);
        SessionCommandResult {
            session_id,
            outcome,
            events,
            session: session_view(session_id, record, progress_policy),
        }
    })
}

fn find_room(catalog: &RoomCatalog, room_id: &str) -> Result<Arc<RoomDefinition>, DomainError> {
    catalog
        .get(room_id)
        .ok_or_else(|| DomainError::RoomNotFound(room_id.to_owned()))
}

/// Handles the `CreateSession` command: opens a session and binds the
/// requested room, if any.
///
/// This is a creation command; the handler generates the `session_id`.
///
/// # Errors
///
/// Returns `DomainError::RoomNotFound` if the requested room does not exist;
/// no session is opened in that case.
pub fn handle_create_session(
    command: &CreateSession,
    clock: &dyn Clock,
    catalog: &RoomCatalog,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<()>, DomainError> {
    let room = command
        .room_id
        .as_deref()
        .map(|room_id| find_room(catalog, room_id))
        .transpose()?;
    let session_id = registry.open(clock);
    run(command, session_id, clock, registry, |record| {
        if let Some(room) = room {
            record.engine.bind_room(room);
        }
    })
}

/// Handles the `BindRoom` command. Rebinding the bound room keeps progress.
///
/// # Errors
///
/// Returns `DomainError::RoomNotFound` or `DomainError::SessionNotFound`.
pub fn handle_bind_room(
    command: &BindRoom,
    clock: &dyn Clock,
    catalog: &RoomCatalog,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<bool>, DomainError> {
    let room = find_room(catalog, &command.room_id)?;
    run(command, command.session_id, clock, registry, |record| {
        record.engine.bind_room(room)
    })
}

/// Handles the `StartTimer` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
pub fn handle_start_timer(
    command: &StartTimer,
    clock: &dyn Clock,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<bool>, DomainError> {
    run(command, command.session_id, clock, registry, |record| {
        record.engine.start_timer()
    })
}

/// Handles the `Interact` command: routes the click through the hotspot
/// gate and applies its decision.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
pub fn handle_interact(
    command: &Interact,
    clock: &dyn Clock,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<InteractionOutcome>, DomainError> {
    let exit_gate = registry.policies().exit_gate;
    run(command, command.session_id, clock, registry, |record| {
        record.engine.interact(&command.hotspot_id, exit_gate)
    })
}

/// Handles the `UseHint` command, returning the hint now showing.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
pub fn handle_use_hint(
    command: &UseHint,
    clock: &dyn Clock,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<String>, DomainError> {
    run(command, command.session_id, clock, registry, |record| {
        record.engine.use_hint()
    })
}

/// Handles the `SubmitAnswer` command, returning whether it was correct.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
pub fn handle_submit_answer(
    command: &SubmitAnswer,
    clock: &dyn Clock,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<bool>, DomainError> {
    run(command, command.session_id, clock, registry, |record| {
        record.engine.submit_answer(&command.answer)
    })
}

/// Handles the `ResetSession` command.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist.
pub fn handle_reset(
    command: &ResetSession,
    clock: &dyn Clock,
    registry: &SessionRegistry,
) -> Result<SessionCommandResult<()>, DomainError> {
    run(command, command.session_id, clock, registry, |record| {
        record.engine.reset();
    })
}

/// Handles the `CloseSession` command. The session's id is unknown from
/// then on.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no session has the id.
pub fn handle_close_session(
    command: &CloseSession,
    registry: &SessionRegistry,
) -> Result<(), DomainError> {
    registry.close(command.session_id)?;
    info!(
        correlation_id = %command.correlation_id(),
        session_id = %command.session_id,
        "session closed"
    );
    Ok(())
}

/// Handles the `SubmitScore` command: records the escape time of an escaped
/// session on the leaderboard, once.
///
/// # Errors
///
/// Returns `DomainError::Conflict` if the session has not escaped or already
/// submitted, and the repository's error if recording fails (the session may
/// then submit again).
pub async fn handle_submit_score(
    command: &SubmitScore,
    clock: &dyn Clock,
    registry: &SessionRegistry,
    leaderboard: &dyn LeaderboardRepository,
) -> Result<ScoreEntry, DomainError> {
    let entry = registry.with_session(command.session_id, clock, |record| {
        let Some(state) = record.engine.state().filter(|state| state.escaped()) else {
            return Err(DomainError::Conflict(
                "only an escaped session can submit a score".to_owned(),
            ));
        };
        if record.score_submitted {
            return Err(DomainError::Conflict(
                "this session already submitted a score".to_owned(),
            ));
        }
        let entry = ScoreEntry {
            id: Uuid::now_v7(),
            nickname: normalize_nickname(command.nickname.as_deref()),
            elapsed_seconds: state.elapsed_seconds(),
            room_id: state.room().id().to_owned(),
            recorded_at: clock.now(),
        };
        record.score_submitted = true;
        Ok(entry)
    })??;

    if let Err(err) = leaderboard.record_score(&entry).await {
        warn!(
            correlation_id = %command.correlation_id(),
            session_id = %command.session_id,
            error = %err,
            "score submission failed"
        );
        registry.with_session(command.session_id, clock, |record| {
            record.score_submitted = false;
        })?;
        return Err(err);
    }

    info!(
        correlation_id = %command.correlation_id(),
        session_id = %command.session_id,
        nickname = %entry.nickname,
        elapsed_seconds = entry.elapsed_seconds,
        "score recorded"
    );
    Ok(entry)
}
