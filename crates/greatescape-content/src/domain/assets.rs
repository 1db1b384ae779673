//! Storage seam for generated artwork.

use greatescape_core::provider::GeneratedImage;
use uuid::Uuid;

/// Holds generated images and hands out displayable resource handles.
pub trait AssetStore: Send + Sync {
    /// Stores an image and returns the URL it can be fetched from.
    fn store(&self, image: GeneratedImage) -> String;

    /// Returns a stored image, if it is still held.
    fn load(&self, asset_id: Uuid) -> Option<GeneratedImage>;

    /// Drops the image behind a URL returned by [`AssetStore::store`].
    /// Returns whether an image was held for it.
    fn release(&self, url: &str) -> bool;
}
