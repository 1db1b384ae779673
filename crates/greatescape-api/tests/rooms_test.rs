//! Integration tests for the room catalog, generation and assets.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use greatescape_session::application::registry::SessionPolicies;
use greatescape_test_support::{FailingImageProvider, ScriptedTextProvider, gated_room_json};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_list_rooms_returns_builtin_catalog() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app.router(), "/api/v1/rooms").await;

    assert_eq!(status, StatusCode::OK);
    let rooms = json.as_array().unwrap();
    assert_eq!(rooms.len(), 4);
    let chamber = rooms
        .iter()
        .find(|room| room["id"] == "geometric-chamber")
        .unwrap();
    assert_eq!(chamber["mode"], "3d");
}

#[tokio::test]
async fn test_get_room_hides_answer_key() {
    let app = common::build_test_app();

    let (status, json) =
        common::get_json(app.router(), "/api/v1/rooms/victorian-study").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "The Victorian Study");
    assert_eq!(json["quiz"]["options"].as_array().unwrap().len(), 4);
    assert!(json["quiz"].get("correctAnswer").is_none());
    assert!(json["hotspots"][0].get("clue").is_none());
}

#[tokio::test]
async fn test_generated_room_background_is_served_as_asset() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, room) = common::post_json(
        app.router(),
        "/api/v1/rooms/generate",
        &json!({ "theme": "Clockwork Vault", "mode": "360" }),
    )
    .await;
    let url = room["background"]["url"].as_str().unwrap().to_owned();
    let request = Request::builder()
        .method("GET")
        .uri(&url)
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["mode"], "360");
    assert_eq!(room["background"]["kind"], "generated");
    assert!(url.starts_with("/api/v1/assets/"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"\x89PNG"));

    let (_, listed) = common::get_json(app.router(), "/api/v1/rooms").await;
    assert_eq!(listed.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_generated_room_degrades_when_images_fail() {
    let app = common::build_test_app_with(
        Arc::new(ScriptedTextProvider::new(gated_room_json())),
        Arc::new(FailingImageProvider),
        SessionPolicies::default(),
    );

    let (status, room) = common::post_json(
        app.router(),
        "/api/v1/rooms/generate",
        &json!({ "theme": "Clockwork Vault", "mode": "flat" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["visuallyUpgraded"], false);
    assert_eq!(room["background"]["kind"], "placeholder");
    assert_eq!(room["background"]["pattern"], "grating");
}

#[tokio::test]
async fn test_upgrade_unknown_room_returns_404() {
    let app = common::build_test_app();

    let (status, json) =
        common::post_json(app.router(), "/api/v1/rooms/attic/upgrade", &json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "room_not_found");
}
