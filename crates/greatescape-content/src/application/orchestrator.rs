//! Two-stage room synthesis.
//!
//! Stage 1 asks the text provider for room metadata and is fatal on
//! failure. Stage 2 asks the image provider for artwork and never fails:
//! missing artwork is replaced by a fallback URL or a placeholder visual.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::join_all;
use greatescape_core::provider::{ImageGenerationProvider, TextGenerationProvider};
use greatescape_core::rng::DeterministicRng;
use greatescape_room::{
    HotspotCandidate, RoomCandidate, RoomDefinition, RoomMode, VisualRef, validate,
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::tracker::GenerationTracker;
use crate::domain::assets::AssetStore;
use crate::domain::error::ContentGenerationError;
use crate::domain::placeholder::build_placeholder;
use crate::domain::prompts::{
    AssetType, NEGATIVE_PROMPT, SynthesisMode, room_metadata_prompt, strip_code_fences,
    visual_prompt,
};

/// Id of the exit hotspot appended to generated rooms that lack one.
pub const GENERATED_EXIT_ID: &str = "exit-door";

/// Orchestrator settings.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Request a thumbnail for every hotspot during stage 2.
    pub item_thumbnails: bool,
    /// Static background used when artwork cannot be generated. When unset,
    /// a placeholder visual is built instead.
    pub fallback_background_url: Option<String>,
}

/// Synthesizes rooms from themes and upgrades static rooms with artwork.
pub struct ContentOrchestrator {
    text: Arc<dyn TextGenerationProvider>,
    images: Arc<dyn ImageGenerationProvider>,
    assets: Arc<dyn AssetStore>,
    rng: Mutex<Box<dyn DeterministicRng>>,
    tracker: Arc<GenerationTracker>,
    config: OrchestratorConfig,
}

impl std::fmt::Debug for ContentOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentOrchestrator")
            .field("config", &self.config)
            .field("generating", &self.is_generating())
            .finish_non_exhaustive()
    }
}

impl ContentOrchestrator {
    /// Creates an orchestrator over the given providers.
    pub fn new(
        text: Arc<dyn TextGenerationProvider>,
        images: Arc<dyn ImageGenerationProvider>,
        assets: Arc<dyn AssetStore>,
        rng: Box<dyn DeterministicRng>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            text,
            images,
            assets,
            rng: Mutex::new(rng),
            tracker: Arc::new(GenerationTracker::new()),
            config,
        }
    }

    /// Whether any synthesis or upgrade is in flight.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.tracker.is_generating()
    }

    /// Observes the generating flag.
    #[must_use]
    pub fn subscribe_generating(&self) -> watch::Receiver<bool> {
        self.tracker.subscribe()
    }

    /// Builds a new room for `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentGenerationError`] if the theme is blank or the
    /// metadata stage fails. Artwork failures never surface here.
    #[instrument(skip(self))]
    pub async fn synthesize(
        &self,
        theme: &str,
        mode: SynthesisMode,
    ) -> Result<RoomDefinition, ContentGenerationError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(ContentGenerationError::EmptyTheme);
        }
        let _guard = self.tracker.begin();

        let room = self.generate_metadata(theme, mode).await?;
        info!(room_id = %room.id(), hotspots = room.hotspots().len(), "room metadata generated");

        let room = self
            .generate_visuals(&room, theme, mode.background_asset())
            .await
            .unwrap_or_else(|| self.degraded(&room));
        Ok(room)
    }

    /// Replaces the artwork of an existing room. Non-visual fields are never
    /// touched; if the background cannot be generated the room is returned
    /// unchanged.
    #[instrument(skip(self, room), fields(room_id = %room.id()))]
    pub async fn upgrade_static_room(&self, room: &RoomDefinition) -> RoomDefinition {
        let _guard = self.tracker.begin();

        let description = room
            .listing()
            .map_or(room.objective(), |listing| listing.description.as_str());
        let prompt = format!("{}: {}", room.name(), description);
        let asset_type = match room.mode() {
            RoomMode::Panorama => AssetType::Panorama,
            RoomMode::Flat | RoomMode::Scene3d => AssetType::Room,
        };

        match self.generate_visuals(room, &prompt, asset_type).await {
            Some(upgraded) => upgraded,
            None => {
                warn!("visual upgrade failed; keeping existing artwork");
                room.clone()
            }
        }
    }

    /// Releases the artwork of rooms that left the catalog, except artwork
    /// `kept` still shows. Returns how many images were dropped.
    pub fn release_assets(
        &self,
        released: &[Arc<RoomDefinition>],
        kept: &RoomDefinition,
    ) -> usize {
        let in_use: HashSet<&str> = kept.generated_urls().collect();
        let dropped = released
            .iter()
            .flat_map(|room| room.generated_urls())
            .filter(|url| !in_use.contains(url))
            .filter(|url| self.assets.release(url))
            .count();
        if dropped > 0 {
            debug!(dropped, "released artwork of replaced rooms");
        }
        dropped
    }

    /// Requests one image and stores it. `None` means the caller should
    /// fall back.
    pub async fn generate_visual(
        &self,
        description: &str,
        asset_type: AssetType,
    ) -> Option<VisualRef> {
        let prompt = visual_prompt(description, asset_type);
        match self.images.render(&prompt, NEGATIVE_PROMPT).await {
            Ok(image) => {
                let url = self.assets.store(image);
                debug!(asset_type = asset_type.as_str(), url = %url, "visual generated");
                Some(VisualRef::Generated { url })
            }
            Err(err) => {
                warn!(asset_type = asset_type.as_str(), error = %err, "visual generation failed");
                None
            }
        }
    }

    async fn generate_metadata(
        &self,
        theme: &str,
        mode: SynthesisMode,
    ) -> Result<RoomDefinition, ContentGenerationError> {
        let completion = self.text.complete(&room_metadata_prompt(theme)).await?;
        let mut candidate = RoomCandidate::from_json(strip_code_fences(&completion))
            .map_err(|err| ContentGenerationError::MalformedResponse(err.to_string()))?;

        candidate.id = Some(format!("ai-{}", Uuid::new_v4()));
        candidate.mode = Some(mode.room_mode());
        ensure_exit(&mut candidate, mode);

        Ok(validate(candidate)?)
    }

    /// Stage 2. Returns `None` when the background could not be generated;
    /// thumbnail failures only leave that hotspot without one.
    async fn generate_visuals(
        &self,
        room: &RoomDefinition,
        description: &str,
        background_type: AssetType,
    ) -> Option<RoomDefinition> {
        let background = self.generate_visual(description, background_type).await?;
        let thumbnails = if self.config.item_thumbnails {
            self.generate_thumbnails(room).await
        } else {
            HashMap::new()
        };
        Some(room.with_visuals(background, thumbnails, true))
    }

    async fn generate_thumbnails(&self, room: &RoomDefinition) -> HashMap<String, VisualRef> {
        let requests = room
            .hotspots()
            .iter()
            .filter(|hotspot| !hotspot.is_exit)
            .map(|hotspot| async move {
                let description = format!("{}: {}", hotspot.label, hotspot.description);
                let visual = self.generate_visual(&description, AssetType::Item).await;
                (hotspot.id.clone(), visual)
            });

        join_all(requests)
            .await
            .into_iter()
            .filter_map(|(id, visual)| visual.map(|visual| (id, visual)))
            .collect()
    }

    fn degraded(&self, room: &RoomDefinition) -> RoomDefinition {
        let background = match &self.config.fallback_background_url {
            Some(url) => VisualRef::Fallback { url: url.clone() },
            None => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                VisualRef::Placeholder(build_placeholder(
                    room.name(),
                    room.atmosphere(),
                    rng.as_mut(),
                ))
            }
        };
        warn!(room_id = %room.id(), "using fallback visuals");
        room.with_visuals(background, HashMap::new(), false)
    }
}

/// Appends an exit door when the generated hotspots have none, so every
/// synthesized room can be escaped.
fn ensure_exit(candidate: &mut RoomCandidate, mode: SynthesisMode) {
    if candidate.hotspots.iter().any(|h| h.is_exit) {
        return;
    }
    let mut id = GENERATED_EXIT_ID.to_owned();
    while candidate.hotspots.iter().any(|h| h.id == id) {
        id.push('-');
    }
    let mut exit = HotspotCandidate {
        id,
        label: "Exit Door".to_owned(),
        icon: Some("🚪".to_owned()),
        description: "The way out.".to_owned(),
        is_exit: true,
        ..HotspotCandidate::default()
    };
    match mode {
        SynthesisMode::Panorama => exit.position = Some([9.0, 0.0, 3.0]),
        SynthesisMode::Flat => {
            exit.x = Some(92.0);
            exit.y = Some(50.0);
        }
    }
    candidate.hotspots.push(exit);
}
