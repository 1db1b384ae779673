//! Shared test doubles and fixtures for The Great Escape.

mod clock;
mod provider;
mod repository;
mod rng;
mod rooms;

pub use clock::{FixedClock, SteppingClock};
pub use provider::{
    FailingImageProvider, FailingTextProvider, ScriptedTextProvider, StaticImageProvider,
};
pub use repository::{FailingLeaderboard, RecordingLeaderboard};
pub use rng::{MockRng, SequenceRng};
pub use rooms::{fixed_time, gated_room, gated_room_json, no_hint_room};
