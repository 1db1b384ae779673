//! In-memory asset store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use greatescape_core::provider::GeneratedImage;
use tracing::debug;
use uuid::Uuid;

use crate::domain::assets::AssetStore;

/// Path prefix under which stored assets are served.
pub const ASSET_PATH_PREFIX: &str = "/api/v1/assets/";

/// Keeps generated images in memory until they are released. Handles stay
/// valid only while the image is held, like browser object URLs; the rooms
/// that reference them decide when that ends.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    images: Mutex<HashMap<Uuid, GeneratedImage>>,
}

impl InMemoryAssetStore {
    /// Number of images currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The asset id inside a handle produced by this store.
fn asset_id_of(url: &str) -> Option<Uuid> {
    url.strip_prefix(ASSET_PATH_PREFIX)?.parse().ok()
}

impl AssetStore for InMemoryAssetStore {
    fn store(&self, image: GeneratedImage) -> String {
        let asset_id = Uuid::new_v4();
        self.images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(asset_id, image);
        format!("{ASSET_PATH_PREFIX}{asset_id}")
    }

    fn load(&self, asset_id: Uuid) -> Option<GeneratedImage> {
        self.images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&asset_id)
            .cloned()
    }

    fn release(&self, url: &str) -> bool {
        let Some(asset_id) = asset_id_of(url) else {
            return false;
        };
        let released = self
            .images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&asset_id)
            .is_some();
        if released {
            debug!(%asset_id, "released asset");
        }
        released
    }
}
