//! Unvalidated room input.
//!
//! The same camelCase schema is used by the built-in YAML catalog and by the
//! JSON a text-generation provider returns. Historical room shapes (flat
//! hotspots with `x, y`, spatial hotspots with `position`, generated rooms
//! without ids) all deserialize into these types and are then normalised by
//! [`validate`](super::validation::validate).

use serde::Deserialize;

use super::definition::{Placement, Quiz, RoomListing, RoomMode};

/// A room as authored or generated, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCandidate {
    /// Room identifier. Generated rooms receive one from the orchestrator.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Narrative objective.
    #[serde(default)]
    pub objective: String,
    /// Free-form atmosphere label.
    #[serde(default)]
    pub atmosphere: Option<String>,
    /// Ambient colour.
    #[serde(default)]
    pub ambient_color: Option<String>,
    /// Presentation mode; inferred from hotspot placement when absent.
    #[serde(default)]
    pub mode: Option<RoomMode>,
    /// Static background image URL.
    #[serde(default)]
    pub background: Option<String>,
    /// Question and answer key.
    #[serde(default)]
    pub quiz: Option<Quiz>,
    /// Hints, vague to specific.
    #[serde(default)]
    pub hints: Vec<String>,
    /// Interactive objects.
    #[serde(default)]
    pub hotspots: Vec<HotspotCandidate>,
    /// Selector metadata.
    #[serde(default)]
    pub listing: Option<RoomListing>,
}

/// A hotspot as authored or generated, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotCandidate {
    /// Identifier, unique within the room.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub label: String,
    /// Emoji or sprite key.
    #[serde(default)]
    pub icon: Option<String>,
    /// Clue text.
    #[serde(default)]
    pub clue: Option<String>,
    /// Flavour text.
    #[serde(default)]
    pub description: String,
    /// Whether it is picked up.
    #[serde(default)]
    pub collectible: bool,
    /// Exit marker.
    #[serde(default)]
    pub is_exit: bool,
    /// Red-herring marker.
    #[serde(default)]
    pub is_misleading: bool,
    /// Prerequisite hotspot id.
    #[serde(default)]
    pub required: Option<String>,
    /// Highlight colour.
    #[serde(default)]
    pub glow_color: Option<String>,
    /// Spatial coordinates (3D and panoramic rooms).
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    /// Flat horizontal offset (2D rooms).
    #[serde(default)]
    pub x: Option<f32>,
    /// Flat vertical offset (2D rooms).
    #[serde(default)]
    pub y: Option<f32>,
}

impl HotspotCandidate {
    /// Resolves whichever placement fields are present.
    #[must_use]
    pub fn placement(&self) -> Placement {
        match (self.position, self.x, self.y) {
            (Some(position), _, _) => Placement::Spatial { position },
            (None, Some(x), Some(y)) => Placement::Flat { x, y },
            _ => Placement::Unplaced,
        }
    }
}

impl RoomCandidate {
    /// Parses a candidate from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a room object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_schema_parses_with_spatial_positions() {
        let json = r##"{
            "name": "Sunken Lab",
            "objective": "Drain the tanks",
            "ambientColor": "#0af",
            "atmosphere": "neon",
            "quiz": {"question": "Q?", "correctAnswer": "B", "options": ["A","B","C","D"]},
            "hotspots": [{
                "id": "valve", "label": "Valve", "icon": "🔧", "clue": "Turn left",
                "description": "Rusty", "collectible": true, "glowColor": "#fff",
                "position": [1.0, -2.5, 3.0]
            }],
            "hints": ["a", "b", "c"]
        }"##;

        let candidate = RoomCandidate::from_json(json).unwrap();

        assert!(candidate.id.is_none());
        assert_eq!(candidate.hotspots.len(), 1);
        assert_eq!(
            candidate.hotspots[0].placement(),
            Placement::Spatial {
                position: [1.0, -2.5, 3.0]
            }
        );
        assert_eq!(candidate.quiz.unwrap().correct_answer, "B");
    }

    #[test]
    fn test_flat_hotspot_resolves_flat_placement() {
        let hotspot = HotspotCandidate {
            x: Some(12.0),
            y: Some(40.0),
            ..HotspotCandidate::default()
        };

        assert_eq!(hotspot.placement(), Placement::Flat { x: 12.0, y: 40.0 });
    }

    #[test]
    fn test_hotspot_without_coordinates_is_unplaced() {
        let hotspot = HotspotCandidate {
            x: Some(12.0),
            ..HotspotCandidate::default()
        };

        assert_eq!(hotspot.placement(), Placement::Unplaced);
    }
}
