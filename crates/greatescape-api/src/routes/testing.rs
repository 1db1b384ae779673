//! Application state over test doubles, shared by the route unit tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use greatescape_content::application::orchestrator::{ContentOrchestrator, OrchestratorConfig};
use greatescape_content::domain::assets::AssetStore;
use greatescape_content::infrastructure::asset_store::InMemoryAssetStore;
use greatescape_core::provider::{ImageGenerationProvider, TextGenerationProvider};
use greatescape_core::repository::LeaderboardRepository;
use greatescape_leaderboard::in_memory::InMemoryLeaderboard;
use greatescape_room::RoomCatalog;
use greatescape_session::application::registry::SessionRegistry;
use greatescape_test_support::{
    FixedClock, MockRng, ScriptedTextProvider, StaticImageProvider, fixed_time, gated_room,
    gated_room_json,
};
use serde_json::Value;

use crate::state::AppState;

pub(crate) fn app_state_with(
    text: Arc<dyn TextGenerationProvider>,
    images: Arc<dyn ImageGenerationProvider>,
    leaderboard: Arc<dyn LeaderboardRepository>,
) -> AppState {
    let catalog = RoomCatalog::builtin().unwrap();
    catalog.insert(gated_room());
    let assets: Arc<dyn AssetStore> = Arc::new(InMemoryAssetStore::default());
    let orchestrator = ContentOrchestrator::new(
        text,
        images,
        Arc::clone(&assets),
        Box::new(MockRng),
        OrchestratorConfig::default(),
    );
    AppState::new(
        Arc::new(FixedClock(fixed_time())),
        Arc::new(catalog),
        Arc::new(orchestrator),
        assets,
        Arc::new(SessionRegistry::default()),
        leaderboard,
    )
}

pub(crate) fn test_app_state() -> AppState {
    app_state_with(
        Arc::new(ScriptedTextProvider::new(gated_room_json())),
        Arc::new(StaticImageProvider::new()),
        Arc::new(InMemoryLeaderboard::new()),
    )
}

pub(crate) fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn json_body(response: Response<Body>) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
