//! Per-room session state.

use std::sync::Arc;

use greatescape_room::RoomDefinition;
use serde::Serialize;

/// Outcome of the most recent quiz submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerState {
    /// Nothing submitted yet.
    #[default]
    Unknown,
    /// Last submission was wrong.
    Incorrect,
    /// Last submission matched the answer key.
    Correct,
}

impl AnswerState {
    /// The tri-state as an optional boolean.
    #[must_use]
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Incorrect => Some(false),
            Self::Correct => Some(true),
        }
    }
}

impl From<bool> for AnswerState {
    fn from(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }
}

/// Progress of one player through one bound room. Replaced wholesale when
/// a different room is bound.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) room: Arc<RoomDefinition>,
    pub(crate) collected: Vec<String>,
    pub(crate) inspected: Vec<String>,
    pub(crate) found_clues: Vec<String>,
    pub(crate) hints_used: u32,
    pub(crate) elapsed_seconds: u64,
    pub(crate) timer_running: bool,
    pub(crate) last_answer: AnswerState,
    pub(crate) escaped: bool,
}

impl SessionState {
    pub(crate) fn new(room: Arc<RoomDefinition>) -> Self {
        Self {
            room,
            collected: Vec::new(),
            inspected: Vec::new(),
            found_clues: Vec::new(),
            hints_used: 0,
            elapsed_seconds: 0,
            timer_running: false,
            last_answer: AnswerState::Unknown,
            escaped: false,
        }
    }

    /// The bound room.
    #[must_use]
    pub fn room(&self) -> &Arc<RoomDefinition> {
        &self.room
    }

    /// Collected hotspot ids, in discovery order.
    #[must_use]
    pub fn collected_hotspot_ids(&self) -> &[String] {
        &self.collected
    }

    /// Misleading hotspots the player has looked at.
    #[must_use]
    pub fn inspected_hotspot_ids(&self) -> &[String] {
        &self.inspected
    }

    /// Clues found so far, in discovery order.
    #[must_use]
    pub fn found_clues(&self) -> &[String] {
        &self.found_clues
    }

    /// Hints disclosed so far.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Seconds on the clock.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether the timer is running.
    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// Outcome of the last quiz submission.
    #[must_use]
    pub fn last_answer(&self) -> AnswerState {
        self.last_answer
    }

    /// Whether the player has left the room.
    #[must_use]
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Whether `hotspot_id` has been collected.
    #[must_use]
    pub fn has_collected(&self, hotspot_id: &str) -> bool {
        self.collected.iter().any(|id| id == hotspot_id)
    }
}
