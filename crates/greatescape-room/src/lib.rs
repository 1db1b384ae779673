//! The Great Escape: Room Definition bounded context.
//!
//! Owns the canonical, validated shape of a playable room (hotspots, quiz,
//! hints, atmosphere) and the catalog of rooms the game can bind to.

pub mod catalog;
pub mod domain;

pub use catalog::{CatalogError, Published, RoomCatalog};
pub use domain::candidate::{HotspotCandidate, RoomCandidate};
pub use domain::definition::{
    Atmosphere, FloatingIcon, Hotspot, Palette, PlaceholderVisual, Placement, Quiz, RoomDefinition,
    RoomListing, RoomMode, VisualRef,
};
pub use domain::validation::{QUIZ_OPTION_COUNT, ValidationError, validate};
