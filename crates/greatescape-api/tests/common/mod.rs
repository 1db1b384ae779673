//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use greatescape_api::state::AppState;
use greatescape_content::application::orchestrator::{ContentOrchestrator, OrchestratorConfig};
use greatescape_content::domain::assets::AssetStore;
use greatescape_content::infrastructure::asset_store::InMemoryAssetStore;
use greatescape_core::clock::Clock;
use greatescape_core::provider::{ImageGenerationProvider, TextGenerationProvider};
use greatescape_leaderboard::in_memory::InMemoryLeaderboard;
use greatescape_room::RoomCatalog;
use greatescape_session::application::registry::{SessionPolicies, SessionRegistry};
use greatescape_test_support::{
    MockRng, ScriptedTextProvider, StaticImageProvider, SteppingClock, fixed_time,
    gated_room_json,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// A running app plus the handles tests need to steer it.
pub struct TestApp {
    /// The state the router was built over.
    pub state: AppState,
    /// The clock behind `state`; advance it to simulate play time.
    pub clock: Arc<SteppingClock>,
}

impl TestApp {
    /// A fresh router over the shared state.
    pub fn router(&self) -> Router {
        greatescape_api::app(self.state.clone())
    }
}

/// Build the full app over the built-in catalog, scripted providers and an
/// in-memory leaderboard.
pub fn build_test_app() -> TestApp {
    build_test_app_with(
        Arc::new(ScriptedTextProvider::new(gated_room_json())),
        Arc::new(StaticImageProvider::new()),
        SessionPolicies::default(),
    )
}

/// Build the full app with custom providers and session policies.
pub fn build_test_app_with(
    text: Arc<dyn TextGenerationProvider>,
    images: Arc<dyn ImageGenerationProvider>,
    policies: SessionPolicies,
) -> TestApp {
    let clock = Arc::new(SteppingClock::new(fixed_time()));
    let assets: Arc<dyn AssetStore> = Arc::new(InMemoryAssetStore::default());
    let orchestrator = ContentOrchestrator::new(
        text,
        images,
        Arc::clone(&assets),
        Box::new(MockRng),
        OrchestratorConfig::default(),
    );
    let state = AppState::new(
        Arc::clone(&clock) as Arc<dyn Clock>,
        Arc::new(RoomCatalog::builtin().unwrap()),
        Arc::new(orchestrator),
        assets,
        Arc::new(SessionRegistry::new(policies)),
        Arc::new(InMemoryLeaderboard::new()),
    );
    TestApp { state, clock }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
