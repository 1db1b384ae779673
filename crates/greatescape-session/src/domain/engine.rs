//! Session engine.
//!
//! Owns the progress of one player through one room. Every mutator is a
//! no-op when no room is bound, and every mutator except [`reset`] and
//! [`bind_room`] is a no-op once the player has escaped. Unknown hotspot ids
//! are ignored rather than reported; gameplay state never fails.
//!
//! State transitions are recorded in an outbox that the application layer
//! drains and stamps with metadata.
//!
//! [`reset`]: SessionEngine::reset
//! [`bind_room`]: SessionEngine::bind_room

use std::sync::Arc;

use greatescape_room::RoomDefinition;
use serde::Serialize;
use tracing::debug;

use super::events::{
    AnswerSubmitted, ClueCollected, Escaped, HintDisclosed, MisleadingInspected, RoomBound,
    SessionEventKind, SessionReset, TimerStarted,
};
use super::gate::{ExitGatePolicy, Interaction, ProgressPolicy, classify};
use super::state::{AnswerState, SessionState};

/// Most hints a player can disclose in one room.
pub const HINT_CEILING: u32 = 3;

/// Hint read before any hint has been used.
pub const EXPLORE_HINT: &str =
    "Start exploring! Click on objects around the room to search for clues.";

/// Hint read for a room that ships without hints.
pub const NO_HINTS_AVAILABLE: &str =
    "There are no hints for this room. Trust your instincts and examine everything.";

/// Hint read once the player has escaped.
pub const ESCAPED_HINT: &str = "You've escaped! Well done!";

/// Useful hotspots discovered out of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Hotspots discovered so far.
    pub discovered: usize,
    /// Hotspots that count toward progress.
    pub total: usize,
}

/// What an interaction did, for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum InteractionOutcome {
    /// Locked: the dependency has not been collected.
    Blocked {
        /// The clicked hotspot.
        hotspot_id: String,
        /// What must be collected first.
        required: String,
    },
    /// Flavour text only.
    Misleading {
        /// The clicked hotspot.
        hotspot_id: String,
        /// Text to show.
        description: String,
    },
    /// Already collected; its content is shown again.
    Revisited {
        /// The clicked hotspot.
        hotspot_id: String,
        /// The clue it holds.
        clue: Option<String>,
        /// Text to show.
        description: String,
    },
    /// Collected for the first time.
    Collected {
        /// The clicked hotspot.
        hotspot_id: String,
        /// The clue it revealed.
        clue: Option<String>,
        /// Text to show.
        description: String,
    },
    /// The player left the room.
    Escaped {
        /// Final time on the clock.
        elapsed_seconds: u64,
    },
    /// Nothing happened: no room, unknown hotspot, or already escaped.
    Ignored,
}

/// Runtime progress for one session.
#[derive(Debug, Default)]
pub struct SessionEngine {
    state: Option<SessionState>,
    version: i64,
    pending: Vec<SessionEventKind>,
}

impl SessionEngine {
    /// Creates an engine with no room bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, or `None` when unbound.
    #[must_use]
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Number of events recorded over the engine's lifetime.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Drains events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEventKind> {
        std::mem::take(&mut self.pending)
    }

    fn record(&mut self, kind: SessionEventKind) {
        debug!(event_type = kind.event_type(), "session event recorded");
        self.version += 1;
        self.pending.push(kind);
    }

    /// State that accepts gameplay mutations: bound and not escaped.
    fn active(&mut self) -> Option<&mut SessionState> {
        self.state.as_mut().filter(|state| !state.escaped)
    }

    /// Binds `room`, replacing all progress. Binding the room that is
    /// already bound does nothing. Returns whether a new state was created.
    pub fn bind_room(&mut self, room: Arc<RoomDefinition>) -> bool {
        if self
            .state
            .as_ref()
            .is_some_and(|state| state.room.id() == room.id())
        {
            return false;
        }
        let room_id = room.id().to_owned();
        self.state = Some(SessionState::new(room));
        self.record(SessionEventKind::RoomBound(RoomBound { room_id }));
        true
    }

    /// Starts the timer once per binding. Returns whether it started now.
    pub fn start_timer(&mut self) -> bool {
        let Some(state) = self.active() else {
            return false;
        };
        if state.timer_running {
            return false;
        }
        state.timer_running = true;
        let room_id = state.room.id().to_owned();
        self.record(SessionEventKind::TimerStarted(TimerStarted { room_id }));
        true
    }

    /// Advances the clock to `elapsed_seconds`. Ignored unless the timer is
    /// running, and never moves the clock backwards.
    pub fn tick(&mut self, elapsed_seconds: u64) -> bool {
        match self.active() {
            Some(state) if state.timer_running && elapsed_seconds > state.elapsed_seconds => {
                state.elapsed_seconds = elapsed_seconds;
                true
            }
            _ => false,
        }
    }

    /// Records the first collection of `hotspot_id`, appending `clue` when
    /// present. Repeat collections and unknown ids change nothing.
    pub fn collect(&mut self, hotspot_id: &str, clue: Option<&str>) -> bool {
        let Some(state) = self.active() else {
            return false;
        };
        if state.room.hotspot(hotspot_id).is_none() || state.has_collected(hotspot_id) {
            return false;
        }
        state.collected.push(hotspot_id.to_owned());
        if let Some(clue) = clue {
            state.found_clues.push(clue.to_owned());
        }
        self.record(SessionEventKind::ClueCollected(ClueCollected {
            hotspot_id: hotspot_id.to_owned(),
            clue: clue.map(str::to_owned),
        }));
        true
    }

    /// Marks a misleading hotspot as looked at. Contributes no clue.
    pub fn mark_inspected(&mut self, hotspot_id: &str) -> bool {
        let Some(state) = self.active() else {
            return false;
        };
        let misleading = state
            .room
            .hotspot(hotspot_id)
            .is_some_and(|hotspot| hotspot.is_misleading);
        if !misleading || state.inspected.iter().any(|id| id == hotspot_id) {
            return false;
        }
        state.inspected.push(hotspot_id.to_owned());
        self.record(SessionEventKind::MisleadingInspected(MisleadingInspected {
            hotspot_id: hotspot_id.to_owned(),
        }));
        true
    }

    /// Discloses the next hint, up to [`HINT_CEILING`], and returns the hint
    /// now showing.
    pub fn use_hint(&mut self) -> String {
        if let Some(state) = self.active() {
            if state.hints_used < HINT_CEILING {
                state.hints_used += 1;
                let hints_used = state.hints_used;
                let hint = self.current_hint();
                self.record(SessionEventKind::HintDisclosed(HintDisclosed { hints_used, hint }));
            }
        }
        self.current_hint()
    }

    /// The hint currently showing. Hint `n` (1-based) is the `n`th room
    /// hint, clamped to the last one.
    #[must_use]
    pub fn current_hint(&self) -> String {
        let Some(state) = &self.state else {
            return EXPLORE_HINT.to_owned();
        };
        if state.escaped {
            return ESCAPED_HINT.to_owned();
        }
        if state.hints_used == 0 {
            return EXPLORE_HINT.to_owned();
        }
        let hints = state.room.hints();
        let index = usize::try_from(state.hints_used - 1).unwrap_or(usize::MAX);
        hints
            .get(index.min(hints.len().saturating_sub(1)))
            .cloned()
            .unwrap_or_else(|| NO_HINTS_AVAILABLE.to_owned())
    }

    /// Hints still available before the ceiling.
    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        HINT_CEILING - self.state.as_ref().map_or(0, |state| state.hints_used)
    }

    /// Checks `answer` against the answer key by exact string equality.
    /// After escape the last outcome is returned unchanged.
    pub fn submit_answer(&mut self, answer: &str) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if state.escaped {
            return state.last_answer == AnswerState::Correct;
        }
        let correct = state.room.quiz().is_correct(answer);
        state.last_answer = AnswerState::from(correct);
        self.record(SessionEventKind::AnswerSubmitted(AnswerSubmitted {
            answer: answer.to_owned(),
            correct,
        }));
        correct
    }

    /// Whether at least one clue has been found.
    #[must_use]
    pub fn can_submit_answer(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| !state.escaped && !state.found_clues.is_empty())
    }

    /// Leaves the room. Terminal until [`reset`](Self::reset).
    pub fn escape(&mut self) -> bool {
        let Some(state) = self.active() else {
            return false;
        };
        state.escaped = true;
        state.timer_running = false;
        let event = Escaped {
            room_id: state.room.id().to_owned(),
            elapsed_seconds: state.elapsed_seconds,
        };
        self.record(SessionEventKind::Escaped(event));
        true
    }

    /// Clears everything back to unbound.
    pub fn reset(&mut self) {
        let room_id = self.state.take().map(|state| state.room.id().to_owned());
        self.record(SessionEventKind::SessionReset(SessionReset { room_id }));
    }

    /// Interacts with a hotspot: starts the timer, asks the gate what the
    /// click does and applies it.
    pub fn interact(
        &mut self,
        hotspot_id: &str,
        exit_policy: ExitGatePolicy,
    ) -> InteractionOutcome {
        let Some(state) = self.state.as_ref().filter(|state| !state.escaped) else {
            return InteractionOutcome::Ignored;
        };
        let Some(hotspot) = state.room.hotspot(hotspot_id).cloned() else {
            return InteractionOutcome::Ignored;
        };
        let decision = classify(&hotspot, &state.collected, exit_policy);
        self.start_timer();

        match decision {
            Interaction::Blocked { required } => InteractionOutcome::Blocked {
                hotspot_id: hotspot.id,
                required,
            },
            Interaction::Misleading => {
                self.mark_inspected(&hotspot.id);
                InteractionOutcome::Misleading {
                    hotspot_id: hotspot.id,
                    description: hotspot.description,
                }
            }
            Interaction::Revisit => InteractionOutcome::Revisited {
                hotspot_id: hotspot.id,
                clue: hotspot.clue,
                description: hotspot.description,
            },
            Interaction::Collect { clue } => {
                self.collect(&hotspot.id, clue.as_deref());
                InteractionOutcome::Collected {
                    hotspot_id: hotspot.id,
                    clue,
                    description: hotspot.description,
                }
            }
            Interaction::Exit => {
                self.escape();
                InteractionOutcome::Escaped {
                    elapsed_seconds: self.state.as_ref().map_or(0, SessionState::elapsed_seconds),
                }
            }
        }
    }

    /// Useful hotspots discovered so far.
    #[must_use]
    pub fn progress(&self, policy: ProgressPolicy) -> Progress {
        let Some(state) = &self.state else {
            return Progress::default();
        };
        let counted = state.room.hotspots().iter().filter(|hotspot| match policy {
            ProgressPolicy::ExcludeMisleading => hotspot.is_useful(),
            ProgressPolicy::IncludeMisleading => hotspot.is_useful() || hotspot.is_misleading,
        });
        let mut progress = Progress::default();
        for hotspot in counted {
            progress.total += 1;
            let found = if hotspot.is_misleading {
                state.inspected.contains(&hotspot.id)
            } else {
                state.has_collected(&hotspot.id)
            };
            if found {
                progress.discovered += 1;
            }
        }
        progress
    }
}
