//! Query handlers for the Content Orchestration context.
//!
//! Views never include the quiz answer key or unrevealed clues; those stay
//! with the session engine.

use greatescape_core::error::DomainError;
use greatescape_room::{
    Atmosphere, Placement, RoomCatalog, RoomDefinition, RoomListing, RoomMode, VisualRef,
};
use serde::Serialize;

/// Room selector entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryView {
    /// Room identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Narrative objective.
    pub objective: String,
    /// Mood.
    pub atmosphere: Atmosphere,
    /// Presentation mode.
    pub mode: RoomMode,
    /// Selector card metadata, for catalog rooms.
    pub listing: Option<RoomListing>,
    /// Background artwork.
    pub background: Option<VisualRef>,
    /// Whether the artwork was generated.
    pub visually_upgraded: bool,
}

/// A hotspot as shown before interaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotView {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub collectible: bool,
    pub is_exit: bool,
    pub required: Option<String>,
    pub glow_color: Option<String>,
    pub placement: Placement,
    pub thumbnail: Option<VisualRef>,
}

/// The quiz without its answer key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub question: String,
    pub options: Vec<String>,
}

/// Full playable view of a room.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    #[serde(flatten)]
    pub summary: RoomSummaryView,
    pub ambient_color: String,
    pub quiz: QuizView,
    pub hint_count: usize,
    pub hotspots: Vec<HotspotView>,
}

fn summary(room: &RoomDefinition) -> RoomSummaryView {
    RoomSummaryView {
        id: room.id().to_owned(),
        name: room.name().to_owned(),
        objective: room.objective().to_owned(),
        atmosphere: room.atmosphere(),
        mode: room.mode(),
        listing: room.listing().cloned(),
        background: room.background().cloned(),
        visually_upgraded: room.visually_upgraded(),
    }
}

/// Lists every room in the catalog, ordered by id.
#[must_use]
pub fn list_rooms(catalog: &RoomCatalog) -> Vec<RoomSummaryView> {
    catalog.list().iter().map(|room| summary(room)).collect()
}

/// Builds the playable view of a room.
#[must_use]
pub fn room_view(room: &RoomDefinition) -> RoomView {
    RoomView {
        summary: summary(room),
        ambient_color: room.ambient_color().to_owned(),
        quiz: QuizView {
            question: room.quiz().question.clone(),
            options: room.quiz().options.clone(),
        },
        hint_count: room.hints().len(),
        hotspots: room
            .hotspots()
            .iter()
            .map(|h| HotspotView {
                id: h.id.clone(),
                label: h.label.clone(),
                icon: h.icon.clone(),
                description: h.description.clone(),
                collectible: h.collectible,
                is_exit: h.is_exit,
                required: h.required.clone(),
                glow_color: h.glow_color.clone(),
                placement: h.placement.clone(),
                thumbnail: h.thumbnail.clone(),
            })
            .collect(),
    }
}

/// Retrieves the playable view of a room.
///
/// # Errors
///
/// Returns `DomainError::RoomNotFound` if the room is not in the catalog.
pub fn get_room_by_id(catalog: &RoomCatalog, room_id: &str) -> Result<RoomView, DomainError> {
    let room = catalog
        .get(room_id)
        .ok_or_else(|| DomainError::RoomNotFound(room_id.to_owned()))?;
    Ok(room_view(&room))
}

#[cfg(test)]
mod tests {
    use super::*;
    use greatescape_test_support::gated_room;

    #[test]
    fn test_list_rooms_returns_builtin_catalog() {
        let catalog = RoomCatalog::builtin().unwrap();

        let rooms = list_rooms(&catalog);

        assert_eq!(rooms.len(), 4);
        assert!(rooms.iter().all(|r| r.listing.is_some()));
    }

    #[test]
    fn test_get_room_by_id_hides_answer_and_clues() {
        // Arrange
        let catalog = RoomCatalog::new();
        catalog.insert(gated_room());

        // Act
        let view = get_room_by_id(&catalog, "clockwork-vault").unwrap();

        // Assert
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "clockwork-vault");
        assert_eq!(json["hintCount"], 3);
        assert!(json["quiz"].get("correctAnswer").is_none());
        assert!(json["hotspots"][0].get("clue").is_none());
        assert_eq!(json["hotspots"][1]["required"], "clock");
    }

    #[test]
    fn test_get_room_by_id_returns_not_found() {
        let catalog = RoomCatalog::new();

        let result = get_room_by_id(&catalog, "nowhere");

        assert!(matches!(result, Err(DomainError::RoomNotFound(_))));
    }
}
