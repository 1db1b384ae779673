//! Serves generated artwork held by the asset store.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::ErrorBody;
use crate::state::AppState;

/// GET /{asset_id}
async fn get_asset(State(state): State<AppState>, Path(asset_id): Path<Uuid>) -> Response {
    match state.assets.load(asset_id) {
        Some(image) => (
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, "private, max-age=3600".to_owned()),
            ],
            image.bytes,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "asset_not_found",
                message: format!("asset not found: {asset_id}"),
            }),
        )
            .into_response(),
    }
}

/// Returns the router for assets.
pub fn router() -> Router<AppState> {
    Router::new().route("/{asset_id}", get(get_asset))
}

#[cfg(test)]
mod tests {
    use super::*;

    use greatescape_content::infrastructure::asset_store::ASSET_PATH_PREFIX;
    use greatescape_core::provider::GeneratedImage;
    use greatescape_test_support::StaticImageProvider;
    use tower::ServiceExt;

    use crate::routes::testing::{get, json_body, test_app_state};

    #[tokio::test]
    async fn test_get_asset_returns_stored_bytes() {
        // Arrange
        let state = test_app_state();
        let url = state.assets.store(GeneratedImage {
            content_type: "image/png".to_owned(),
            bytes: StaticImageProvider::BYTES.to_vec(),
        });
        let asset_id = url.strip_prefix(ASSET_PATH_PREFIX).unwrap().to_owned();
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(get(&format!("/{asset_id}"))).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], StaticImageProvider::BYTES);
    }

    #[tokio::test]
    async fn test_get_asset_returns_404_for_unknown_asset() {
        let app = router().with_state(test_app_state());

        let response = app
            .oneshot(get(&format!("/{}", Uuid::new_v4())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["error"], "asset_not_found");
    }
}
