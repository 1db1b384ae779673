//! Command handlers for the Content Orchestration context.
//!
//! Each handler runs the orchestrator and publishes the resulting room to
//! the catalog, where sessions can bind to it. Artwork of any room the
//! catalog lets go of is released with it.

use std::sync::Arc;

use greatescape_core::command::Command;
use greatescape_core::error::DomainError;
use greatescape_room::{RoomCatalog, RoomDefinition};
use tracing::{info, warn};

use crate::application::orchestrator::ContentOrchestrator;
use crate::domain::commands::{SynthesizeRoom, UpgradeRoomVisuals};

/// Handles the `SynthesizeRoom` command: generates a room for the theme and
/// stores it in the catalog.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank theme and
/// `DomainError::ContentGeneration` when room metadata cannot be generated.
pub async fn handle_synthesize_room(
    command: &SynthesizeRoom,
    orchestrator: &ContentOrchestrator,
    catalog: &RoomCatalog,
) -> Result<Arc<RoomDefinition>, DomainError> {
    let room = orchestrator
        .synthesize(&command.theme, command.mode)
        .await
        .map_err(|err| {
            warn!(
                correlation_id = %command.correlation_id(),
                command = command.command_type(),
                error = %err,
                "room synthesis failed"
            );
            DomainError::from(err)
        })?;
    let room = publish(orchestrator, catalog, room);
    info!(
        correlation_id = %command.correlation_id(),
        room_id = %room.id(),
        visually_upgraded = room.visually_upgraded(),
        "room synthesized"
    );
    Ok(room)
}

/// Handles the `UpgradeRoomVisuals` command: replaces a stored room's
/// artwork. A failed upgrade leaves the stored room untouched and is not an
/// error.
///
/// # Errors
///
/// Returns `DomainError::RoomNotFound` if the room is not in the catalog.
pub async fn handle_upgrade_room_visuals(
    command: &UpgradeRoomVisuals,
    orchestrator: &ContentOrchestrator,
    catalog: &RoomCatalog,
) -> Result<Arc<RoomDefinition>, DomainError> {
    let current = catalog
        .get(&command.room_id)
        .ok_or_else(|| DomainError::RoomNotFound(command.room_id.clone()))?;

    let upgraded = orchestrator.upgrade_static_room(&current).await;
    if upgraded == *current {
        return Ok(current);
    }
    info!(
        correlation_id = %command.correlation_id(),
        room_id = %upgraded.id(),
        "room visuals upgraded"
    );
    Ok(publish(orchestrator, catalog, upgraded))
}

fn publish(
    orchestrator: &ContentOrchestrator,
    catalog: &RoomCatalog,
    room: RoomDefinition,
) -> Arc<RoomDefinition> {
    let published = catalog.publish(room);
    orchestrator.release_assets(&published.released, &published.room);
    published.room
}
