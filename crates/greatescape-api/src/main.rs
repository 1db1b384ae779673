//! The Great Escape API server entry point.

use std::sync::Arc;

use greatescape_api::config::AppConfig;
use greatescape_api::error::AppError;
use greatescape_api::state::AppState;
use greatescape_content::application::orchestrator::{ContentOrchestrator, OrchestratorConfig};
use greatescape_content::domain::assets::AssetStore;
use greatescape_content::infrastructure::asset_store::InMemoryAssetStore;
use greatescape_content::infrastructure::gemini::GeminiTextProvider;
use greatescape_content::infrastructure::hugging_face::HuggingFaceImageProvider;
use greatescape_content::infrastructure::unavailable::UnconfiguredProvider;
use greatescape_core::clock::SystemClock;
use greatescape_core::provider::{ImageGenerationProvider, TextGenerationProvider};
use greatescape_core::repository::LeaderboardRepository;
use greatescape_core::rng::StdRngSource;
use greatescape_leaderboard::in_memory::InMemoryLeaderboard;
use greatescape_leaderboard::pg_leaderboard_repository::PgLeaderboardRepository;
use greatescape_room::RoomCatalog;
use greatescape_session::application::registry::{SessionPolicies, SessionRegistry};
use greatescape_session::domain::gate::{ExitGatePolicy, ProgressPolicy};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting The Great Escape API server");

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr()?;

    let client = reqwest::Client::builder()
        .timeout(config.provider_timeout)
        .build()?;

    let text: Arc<dyn TextGenerationProvider> = match &config.gemini_api_key {
        Some(api_key) => Arc::new(GeminiTextProvider::new(
            client.clone(),
            api_key.clone(),
            config.gemini_model.clone(),
        )),
        None => {
            warn!("GEMINI_API_KEY is not set; room generation is unavailable");
            Arc::new(UnconfiguredProvider::new("GEMINI_API_KEY"))
        }
    };
    let images: Arc<dyn ImageGenerationProvider> = match &config.hf_token {
        Some(token) => Arc::new(HuggingFaceImageProvider::new(
            client,
            token.clone(),
            config.hf_image_model.clone(),
        )),
        None => {
            warn!("HF_TOKEN is not set; rooms will use fallback artwork");
            Arc::new(UnconfiguredProvider::new("HF_TOKEN"))
        }
    };

    let assets: Arc<dyn AssetStore> = Arc::new(InMemoryAssetStore::default());
    let orchestrator = ContentOrchestrator::new(
        text,
        images,
        Arc::clone(&assets),
        Box::new(StdRngSource::from_os()),
        OrchestratorConfig {
            item_thumbnails: config.item_thumbnails,
            fallback_background_url: None,
        },
    );

    let catalog = RoomCatalog::builtin()?;
    info!(rooms = catalog.len(), "room catalog loaded");

    let leaderboard: Arc<dyn LeaderboardRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;
            let repository = PgLeaderboardRepository::new(pool);
            repository.ensure_schema().await?;
            info!("leaderboard backed by PostgreSQL");
            Arc::new(repository)
        }
        None => {
            info!("DATABASE_URL is not set; leaderboard kept in memory");
            Arc::new(InMemoryLeaderboard::new())
        }
    };

    let policies = SessionPolicies {
        exit_gate: if config.exit_honors_required {
            ExitGatePolicy::HonorRequired
        } else {
            ExitGatePolicy::Bypass
        },
        progress: if config.count_misleading_progress {
            ProgressPolicy::IncludeMisleading
        } else {
            ProgressPolicy::ExcludeMisleading
        },
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(catalog),
        Arc::new(orchestrator),
        assets,
        Arc::new(SessionRegistry::new(policies).with_idle_timeout(config.session_idle_timeout)),
        leaderboard,
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = greatescape_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
