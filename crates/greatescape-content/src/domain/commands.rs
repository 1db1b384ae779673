//! Commands for the Content Orchestration context.

use greatescape_core::command::Command;
use uuid::Uuid;

use crate::domain::prompts::SynthesisMode;

/// Command to synthesize a new room from a free-text theme.
#[derive(Debug, Clone)]
pub struct SynthesizeRoom {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Free-text theme, e.g. "Underwater Bioshock Lab".
    pub theme: String,
    /// Panoramic or flat presentation.
    pub mode: SynthesisMode,
}

impl Command for SynthesizeRoom {
    fn command_type(&self) -> &'static str {
        "content.synthesize_room"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace a stored room's artwork with generated artwork.
#[derive(Debug, Clone)]
pub struct UpgradeRoomVisuals {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The room to upgrade.
    pub room_id: String,
}

impl Command for UpgradeRoomVisuals {
    fn command_type(&self) -> &'static str {
        "content.upgrade_room_visuals"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
