//! In-memory registry of live sessions.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use greatescape_core::clock::Clock;
use greatescape_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::engine::SessionEngine;
use crate::domain::gate::{ExitGatePolicy, ProgressPolicy};

/// How long a session may sit untouched before it is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

/// Gameplay rules that vary by deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPolicies {
    /// Whether exits honour their `required` dependency.
    pub exit_gate: ExitGatePolicy,
    /// Which hotspots count toward progress.
    pub progress: ProgressPolicy,
}

/// One live session.
#[derive(Debug)]
pub struct SessionRecord {
    pub(crate) engine: SessionEngine,
    pub(crate) timer_started_at: Option<DateTime<Utc>>,
    pub(crate) score_submitted: bool,
    last_active: DateTime<Utc>,
}

impl SessionRecord {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            engine: SessionEngine::new(),
            timer_started_at: None,
            score_submitted: false,
            last_active: now,
        }
    }

    /// Derives elapsed time from the wall clock. Escaped or stopped
    /// sessions ignore the tick.
    fn sync_timer(&mut self, clock: &dyn Clock) {
        if let Some(started_at) = self.timer_started_at {
            self.engine.tick(clock.seconds_since(started_at));
        }
    }

    /// Tracks when the running timer started; a fresh binding clears it.
    pub(crate) fn track_timer(&mut self, clock: &dyn Clock) {
        match self.engine.state() {
            Some(state) if state.timer_running() => {
                self.timer_started_at.get_or_insert_with(|| clock.now());
            }
            Some(state) if state.escaped() => {}
            _ => {
                self.timer_started_at = None;
                self.score_submitted = false;
            }
        }
    }
}

/// Holds every live session, keyed by id. Each call locks the whole
/// registry, so mutators on one session never interleave.
///
/// Sessions idle for longer than the idle timeout are swept whenever a new
/// session is opened, and treated as gone by every other call.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionRecord>>,
    policies: SessionPolicies,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionPolicies::default())
    }
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(policies: SessionPolicies) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            policies,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Replaces the idle timeout.
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// The rules sessions are played under.
    #[must_use]
    pub fn policies(&self) -> SessionPolicies {
        self.policies
    }

    /// Opens an unbound session and returns its id, first dropping any
    /// session that has gone idle.
    pub fn open(&self, clock: &dyn Clock) -> Uuid {
        let session_id = Uuid::now_v7();
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, record| !self.is_idle(record, clock));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "dropped idle sessions");
        }
        sessions.insert(session_id, SessionRecord::new(clock.now()));
        session_id
    }

    /// Removes a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no session has the id.
    pub fn close(&self, session_id: Uuid) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id)
            .map(|_| ())
            .ok_or(DomainError::SessionNotFound(session_id))
    }

    /// Runs `f` against a session with its clock brought up to date.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no session has the id.
    pub fn with_session<R>(
        &self,
        session_id: Uuid,
        clock: &dyn Clock,
        f: impl FnOnce(&mut SessionRecord) -> R,
    ) -> Result<R, DomainError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if sessions
            .get(&session_id)
            .is_some_and(|record| self.is_idle(record, clock))
        {
            sessions.remove(&session_id);
        }
        let record = sessions
            .get_mut(&session_id)
            .ok_or(DomainError::SessionNotFound(session_id))?;
        record.sync_timer(clock);
        let result = f(record);
        record.track_timer(clock);
        record.last_active = clock.now();
        Ok(result)
    }

    fn is_idle(&self, record: &SessionRecord, clock: &dyn Clock) -> bool {
        clock.seconds_since(record.last_active) >= self.idle_timeout.as_secs()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether there are no live sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
