//! Domain events for the Session context.

use greatescape_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Emitted when a room is bound and progress starts from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBound {
    /// The bound room.
    pub room_id: String,
}

/// Emitted when the timer starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStarted {
    /// The room being timed.
    pub room_id: String,
}

/// Emitted when a hotspot is collected for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueCollected {
    /// The collected hotspot.
    pub hotspot_id: String,
    /// The clue it revealed, if any.
    pub clue: Option<String>,
}

/// Emitted when a misleading hotspot is inspected for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisleadingInspected {
    /// The inspected hotspot.
    pub hotspot_id: String,
}

/// Emitted when another hint is disclosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintDisclosed {
    /// Hints used after this disclosure.
    pub hints_used: u32,
    /// The disclosed text.
    pub hint: String,
}

/// Emitted for every quiz submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmitted {
    /// The submitted answer, verbatim.
    pub answer: String,
    /// Whether it matched the answer key.
    pub correct: bool,
}

/// Emitted when the player leaves through an exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escaped {
    /// The escaped room.
    pub room_id: String,
    /// Final time on the clock.
    pub elapsed_seconds: u64,
}

/// Emitted when the session is cleared back to unbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReset {
    /// The room that was bound, if any.
    pub room_id: Option<String>,
}

/// Event type identifier for [`RoomBound`].
pub const ROOM_BOUND_EVENT_TYPE: &str = "session.room_bound";

/// Event type identifier for [`TimerStarted`].
pub const TIMER_STARTED_EVENT_TYPE: &str = "session.timer_started";

/// Event type identifier for [`ClueCollected`].
pub const CLUE_COLLECTED_EVENT_TYPE: &str = "session.clue_collected";

/// Event type identifier for [`MisleadingInspected`].
pub const MISLEADING_INSPECTED_EVENT_TYPE: &str = "session.misleading_inspected";

/// Event type identifier for [`HintDisclosed`].
pub const HINT_DISCLOSED_EVENT_TYPE: &str = "session.hint_disclosed";

/// Event type identifier for [`AnswerSubmitted`].
pub const ANSWER_SUBMITTED_EVENT_TYPE: &str = "session.answer_submitted";

/// Event type identifier for [`Escaped`].
pub const ESCAPED_EVENT_TYPE: &str = "session.escaped";

/// Event type identifier for [`SessionReset`].
pub const SESSION_RESET_EVENT_TYPE: &str = "session.reset";

/// Event payload variants for the Session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// A room was bound.
    RoomBound(RoomBound),
    /// The timer started.
    TimerStarted(TimerStarted),
    /// A hotspot was collected.
    ClueCollected(ClueCollected),
    /// A misleading hotspot was inspected.
    MisleadingInspected(MisleadingInspected),
    /// A hint was disclosed.
    HintDisclosed(HintDisclosed),
    /// An answer was submitted.
    AnswerSubmitted(AnswerSubmitted),
    /// The player escaped.
    Escaped(Escaped),
    /// The session was reset.
    SessionReset(SessionReset),
}

impl SessionEventKind {
    /// The event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RoomBound(_) => ROOM_BOUND_EVENT_TYPE,
            Self::TimerStarted(_) => TIMER_STARTED_EVENT_TYPE,
            Self::ClueCollected(_) => CLUE_COLLECTED_EVENT_TYPE,
            Self::MisleadingInspected(_) => MISLEADING_INSPECTED_EVENT_TYPE,
            Self::HintDisclosed(_) => HINT_DISCLOSED_EVENT_TYPE,
            Self::AnswerSubmitted(_) => ANSWER_SUBMITTED_EVENT_TYPE,
            Self::Escaped(_) => ESCAPED_EVENT_TYPE,
            Self::SessionReset(_) => SESSION_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Session context.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greatescape_test_support::fixed_time;
    use uuid::Uuid;

    fn envelope(kind: SessionEventKind) -> SessionEvent {
        SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: Uuid::new_v4(),
                sequence_number: 1,
                correlation_id: Uuid::new_v4(),
                occurred_at: fixed_time(),
            },
            kind,
        }
    }

    #[test]
    fn test_event_type_follows_payload() {
        let event = envelope(SessionEventKind::Escaped(Escaped {
            room_id: "clockwork-vault".to_owned(),
            elapsed_seconds: 75,
        }));

        assert_eq!(event.event_type(), "session.escaped");
        assert_eq!(event.metadata().event_type, event.event_type());
    }

    #[test]
    fn test_to_payload_serializes_the_variant() {
        let event = envelope(SessionEventKind::ClueCollected(ClueCollected {
            hotspot_id: "clock".to_owned(),
            clue: Some("The hands point at four.".to_owned()),
        }));

        let payload = event.to_payload();

        assert_eq!(payload["ClueCollected"]["hotspot_id"], "clock");
        assert_eq!(payload["ClueCollected"]["clue"], "The hands point at four.");
    }
}
