//! Commands for the Session context.

use greatescape_core::command::Command;
use uuid::Uuid;

/// Command to open a new session, optionally bound to a room.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Room to bind straight away.
    pub room_id: Option<String>,
}

impl Command for CreateSession {
    fn command_type(&self) -> &'static str {
        "session.create_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to bind a room to a session.
#[derive(Debug, Clone)]
pub struct BindRoom {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
    /// The room to bind.
    pub room_id: String,
}

impl Command for BindRoom {
    fn command_type(&self) -> &'static str {
        "session.bind_room"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to start the session timer.
#[derive(Debug, Clone)]
pub struct StartTimer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
}

impl Command for StartTimer {
    fn command_type(&self) -> &'static str {
        "session.start_timer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to interact with a hotspot.
#[derive(Debug, Clone)]
pub struct Interact {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
    /// The clicked hotspot.
    pub hotspot_id: String,
}

impl Command for Interact {
    fn command_type(&self) -> &'static str {
        "session.interact"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to disclose the next hint.
#[derive(Debug, Clone)]
pub struct UseHint {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
}

impl Command for UseHint {
    fn command_type(&self) -> &'static str {
        "session.use_hint"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to answer the room's quiz.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
    /// The answer, compared verbatim.
    pub answer: String,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "session.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to clear a session back to unbound.
#[derive(Debug, Clone)]
pub struct ResetSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
}

impl Command for ResetSession {
    fn command_type(&self) -> &'static str {
        "session.reset"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to put an escaped session on the leaderboard.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
    /// Display name; blank becomes `Anonymous`.
    pub nickname: Option<String>,
}

impl Command for SubmitScore {
    fn command_type(&self) -> &'static str {
        "session.submit_score"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}

/// Command to close a session and free it.
#[derive(Debug, Clone)]
pub struct CloseSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target session.
    pub session_id: Uuid,
}

impl Command for CloseSession {
    fn command_type(&self) -> &'static str {
        "session.close_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Option<Uuid> {
        Some(self.session_id)
    }
}
