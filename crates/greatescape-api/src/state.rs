//! Shared application state.

use std::sync::Arc;

use greatescape_content::application::orchestrator::ContentOrchestrator;
use greatescape_content::domain::assets::AssetStore;
use greatescape_core::clock::Clock;
use greatescape_core::repository::LeaderboardRepository;
use greatescape_room::RoomCatalog;
use greatescape_session::application::registry::SessionRegistry;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for deterministic time.
    pub clock: Arc<dyn Clock>,
    /// Built-in and generated rooms.
    pub catalog: Arc<RoomCatalog>,
    /// Room synthesis and visual upgrades.
    pub orchestrator: Arc<ContentOrchestrator>,
    /// Generated artwork, served under `/api/v1/assets`.
    pub assets: Arc<dyn AssetStore>,
    /// Live play sessions.
    pub sessions: Arc<SessionRegistry>,
    /// Escape times.
    pub leaderboard: Arc<dyn LeaderboardRepository>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .field("orchestrator", &self.orchestrator)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        catalog: Arc<RoomCatalog>,
        orchestrator: Arc<ContentOrchestrator>,
        assets: Arc<dyn AssetStore>,
        sessions: Arc<SessionRegistry>,
        leaderboard: Arc<dyn LeaderboardRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            orchestrator,
            assets,
            sessions,
            leaderboard,
        }
    }
}
