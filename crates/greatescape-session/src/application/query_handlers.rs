//! Query handlers for the Session context.

use greatescape_core::clock::Clock;
use greatescape_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use crate::application::registry::{SessionRecord, SessionRegistry};
use crate::domain::engine::Progress;
use crate::domain::gate::ProgressPolicy;
use crate::domain::state::AnswerState;

/// Read-only view of a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// The bound room, if any.
    pub room_id: Option<String>,
    /// Collected hotspot ids, in discovery order.
    pub collected_hotspot_ids: Vec<String>,
    /// Clues found, in discovery order.
    pub found_clues: Vec<String>,
    /// Hints disclosed.
    pub hints_used: u32,
    /// Hints left before the ceiling.
    pub hints_remaining: u32,
    /// The hint currently showing.
    pub current_hint: String,
    /// Seconds on the clock.
    pub elapsed_seconds: u64,
    /// Whether the timer is running.
    pub timer_running: bool,
    /// Outcome of the last quiz submission.
    pub last_answer: AnswerState,
    /// Same, as an optional boolean.
    pub last_answer_correct: Option<bool>,
    /// Whether the player has left the room.
    pub escaped: bool,
    /// Exploration progress under the configured policy.
    pub progress: Progress,
    /// Whether the quiz panel should accept an answer.
    pub can_submit_answer: bool,
    /// Whether this escape is already on the leaderboard.
    pub score_submitted: bool,
    /// Events recorded over the session's lifetime.
    pub version: i64,
}

/// Retrieves a session by id, with its clock brought up to date.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no session has the id.
pub fn get_session_by_id(
    session_id: Uuid,
    clock: &dyn Clock,
    registry: &SessionRegistry,
) -> Result<SessionView, DomainError> {
    let progress_policy = registry.policies().progress;
    registry.with_session(session_id, clock, |record| {
        session_view(session_id, record, progress_policy)
    })
}

/// Projects a session record, read under the registry lock.
pub(crate) fn session_view(
    session_id: Uuid,
    record: &SessionRecord,
    progress_policy: ProgressPolicy,
) -> SessionView {
    let engine = &record.engine;
    let state = engine.state();
    let last_answer = state.map(|s| s.last_answer()).unwrap_or_default();
    SessionView {
        session_id,
        room_id: state.map(|s| s.room().id().to_owned()),
        collected_hotspot_ids: state
            .map(|s| s.collected_hotspot_ids().to_vec())
            .unwrap_or_default(),
        found_clues: state.map(|s| s.found_clues().to_vec()).unwrap_or_default(),
        hints_used: state.map_or(0, |s| s.hints_used()),
        hints_remaining: engine.hints_remaining(),
        current_hint: engine.current_hint(),
        elapsed_seconds: state.map_or(0, |s| s.elapsed_seconds()),
        timer_running: state.is_some_and(|s| s.timer_running()),
        last_answer,
        last_answer_correct: last_answer.as_option(),
        escaped: state.is_some_and(|s| s.escaped()),
        progress: engine.progress(progress_policy),
        can_submit_answer: engine.can_submit_answer(),
        score_submitted: record.score_submitted,
        version: engine.version(),
    }
}
