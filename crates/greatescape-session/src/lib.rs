//! The Great Escape: Session Engine bounded context.
//!
//! Tracks one player's progress through one bound room: collected hotspots,
//! found clues, disclosed hints, elapsed time and the quiz outcome. The
//! hotspot interaction gate decides what a click on a hotspot does.

pub mod application;
pub mod domain;
