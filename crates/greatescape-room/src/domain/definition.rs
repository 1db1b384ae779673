//! Validated room definition types.
//!
//! A [`RoomDefinition`] can only be obtained through
//! [`validate`](super::validation::validate), so every instance upholds the
//! room invariants: at least one hotspot, unique hotspot ids, a four-option
//! quiz containing its answer exactly once, and an acyclic `required` graph.
//! Once produced it is immutable apart from its visual assets.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mood of a room; drives placeholder palettes on the presentation side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Atmosphere {
    /// Candle-lit, gothic.
    #[default]
    Dark,
    /// Electric, laboratory or cyberpunk.
    Neon,
    /// Torch-lit, sandstone.
    Warm,
    /// Starfield.
    Space,
    /// Soft domestic light.
    Cozy,
    /// Steel and rust.
    Industrial,
    /// High-pressure, alarm-lit.
    Tense,
    /// Fog and shadow.
    Mysterious,
}

impl Atmosphere {
    /// Every atmosphere, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Dark,
        Self::Neon,
        Self::Warm,
        Self::Space,
        Self::Cozy,
        Self::Industrial,
        Self::Tense,
        Self::Mysterious,
    ];

    /// The lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Neon => "neon",
            Self::Warm => "warm",
            Self::Space => "space",
            Self::Cozy => "cozy",
            Self::Industrial => "industrial",
            Self::Tense => "tense",
            Self::Mysterious => "mysterious",
        }
    }

    /// Parses a free-form label leniently: case and surrounding whitespace
    /// are ignored, and the first recognised word of a compound label such
    /// as `"dark/neon"` wins. Unknown labels map to [`Atmosphere::Dark`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label
            .split(|c: char| !c.is_ascii_alphabetic())
            .filter(|word| !word.is_empty())
            .find_map(|word| {
                Self::ALL
                    .into_iter()
                    .find(|atmosphere| atmosphere.as_str().eq_ignore_ascii_case(word))
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a room is presented: flat image layers, a 3D scene, or a 360° panorama.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomMode {
    /// 2D background with hotspots placed by `x, y`.
    #[default]
    #[serde(rename = "2d")]
    Flat,
    /// 3D scene with hotspots placed by `position`.
    #[serde(rename = "3d")]
    Scene3d,
    /// Equirectangular panorama with hotspots placed by `position`.
    #[serde(rename = "360")]
    Panorama,
}

/// Colour scheme of a placeholder visual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Base colour.
    pub primary: String,
    /// Secondary colour.
    pub secondary: String,
    /// Highlight colour.
    pub accent: String,
    /// CSS gradient for the backdrop.
    pub gradient: String,
}

/// Decorative icon floating over a placeholder, positioned in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingIcon {
    /// Emoji glyph.
    pub icon: String,
    /// Horizontal offset, percent of width.
    pub x: f64,
    /// Vertical offset, percent of height.
    pub y: f64,
    /// Animation delay in seconds.
    pub delay: f64,
    /// Scale factor.
    pub scale: f64,
}

/// Generated stand-in used when no artwork is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderVisual {
    /// Title rendered at the centre.
    pub title: String,
    /// Atmosphere the palette was chosen for.
    pub atmosphere: Atmosphere,
    /// Colour scheme.
    pub palette: Palette,
    /// Name of the overlay pattern (`victorian`, `circuit`, ...).
    pub pattern: String,
    /// Floating decorative icons.
    pub icons: Vec<FloatingIcon>,
}

/// Reference to a displayable visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VisualRef {
    /// Freshly generated artwork, addressable by `url`.
    Generated {
        /// Resource handle for the image.
        url: String,
    },
    /// Static artwork shipped with the room.
    Fallback {
        /// Image URL.
        url: String,
    },
    /// Generated placeholder description.
    Placeholder(PlaceholderVisual),
}

impl VisualRef {
    /// The URL of the visual, if it is backed by an image.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Generated { url } | Self::Fallback { url } => Some(url),
            Self::Placeholder(_) => None,
        }
    }

    /// Whether this visual came from the image provider.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

/// Spatial placement of a hotspot; opaque to the puzzle logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Placement {
    /// Percent offsets over a flat background.
    Flat {
        /// Horizontal offset.
        x: f32,
        /// Vertical offset.
        y: f32,
    },
    /// World coordinates in a 3D or panoramic scene.
    Spatial {
        /// `[x, y, z]`.
        position: [f32; 3],
    },
    /// No placement supplied.
    #[default]
    Unplaced,
}

/// The room's question and answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// The question shown to the player.
    pub question: String,
    /// The one correct option.
    pub correct_answer: String,
    /// The options offered.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Quiz {
    /// Exact comparison against the answer key; no case folding or trimming.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

/// An interactive point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Unique within the room.
    pub id: String,
    /// Display name.
    pub label: String,
    /// Emoji or sprite key.
    pub icon: String,
    /// Text revealed on first successful interaction.
    pub clue: Option<String>,
    /// Flavour text.
    pub description: String,
    /// Whether the hotspot is picked up when interacted with.
    pub collectible: bool,
    /// Interacting escapes the room.
    pub is_exit: bool,
    /// Interacting shows flavour text but yields no clue.
    pub is_misleading: bool,
    /// Hotspot that must be collected before this one can be used.
    pub required: Option<String>,
    /// Highlight colour.
    pub glow_color: Option<String>,
    /// Where the renderer draws it.
    pub placement: Placement,
    /// Item artwork, when generated.
    pub thumbnail: Option<VisualRef>,
}

impl Hotspot {
    /// Whether this hotspot contributes a clue toward the quiz.
    #[must_use]
    pub fn is_useful(&self) -> bool {
        !self.is_misleading && !self.is_exit && self.clue.is_some()
    }
}

/// Room-selector metadata for built-in rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListing {
    /// Difficulty label.
    pub difficulty: String,
    /// Estimated completion time in minutes.
    pub estimated_minutes: u32,
    /// Card accent colour.
    pub accent_color: String,
    /// Selector blurb.
    pub description: String,
}

/// One playable room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDefinition {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) objective: String,
    pub(crate) atmosphere: Atmosphere,
    pub(crate) ambient_color: String,
    pub(crate) mode: RoomMode,
    pub(crate) background: Option<VisualRef>,
    pub(crate) visually_upgraded: bool,
    pub(crate) quiz: Quiz,
    pub(crate) hints: Vec<String>,
    pub(crate) hotspots: Vec<Hotspot>,
    pub(crate) listing: Option<RoomListing>,
}

impl RoomDefinition {
    /// Room identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Narrative objective.
    #[must_use]
    pub fn objective(&self) -> &str {
        &self.objective
    }

    /// Mood of the room.
    #[must_use]
    pub fn atmosphere(&self) -> Atmosphere {
        self.atmosphere
    }

    /// Ambient colour as a CSS colour string.
    #[must_use]
    pub fn ambient_color(&self) -> &str {
        &self.ambient_color
    }

    /// Presentation mode.
    #[must_use]
    pub fn mode(&self) -> RoomMode {
        self.mode
    }

    /// Background visual, if one has been assigned.
    #[must_use]
    pub fn background(&self) -> Option<&VisualRef> {
        self.background.as_ref()
    }

    /// Whether the background was produced by the image provider.
    #[must_use]
    pub fn visually_upgraded(&self) -> bool {
        self.visually_upgraded
    }

    /// The room's question and answer key.
    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Hints, ordered from vague to specific.
    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// All hotspots, in authoring order.
    #[must_use]
    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Selector metadata for built-in rooms.
    #[must_use]
    pub fn listing(&self) -> Option<&RoomListing> {
        self.listing.as_ref()
    }

    /// Looks up a hotspot by id.
    #[must_use]
    pub fn hotspot(&self, hotspot_id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == hotspot_id)
    }

    /// Hotspots that yield a clue toward the quiz.
    pub fn useful_hotspots(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter().filter(|h| h.is_useful())
    }

    /// Whether any hotspot leads out of the room.
    #[must_use]
    pub fn has_exit(&self) -> bool {
        self.hotspots.iter().any(|h| h.is_exit)
    }

    /// Returns a copy with new visual assets. Every non-visual field is
    /// carried over unchanged; thumbnails are matched by hotspot id and
    /// hotspots without an entry keep their current thumbnail.
    #[must_use]
    pub fn with_visuals(
        &self,
        background: VisualRef,
        mut thumbnails: HashMap<String, VisualRef>,
        visually_upgraded: bool,
    ) -> Self {
        let mut upgraded = self.clone();
        upgraded.background = Some(background);
        upgraded.visually_upgraded = visually_upgraded;
        for hotspot in &mut upgraded.hotspots {
            if let Some(thumbnail) = thumbnails.remove(&hotspot.id) {
                hotspot.thumbnail = Some(thumbnail);
            }
        }
        upgraded
    }

    /// URLs of generated artwork this room refers to: the background and
    /// any hotspot thumbnails.
    pub fn generated_urls(&self) -> impl Iterator<Item = &str> {
        self.background
            .iter()
            .chain(self.hotspots.iter().filter_map(|h| h.thumbnail.as_ref()))
            .filter(|visual| visual.is_generated())
            .filter_map(VisualRef::url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atmosphere_from_label_is_lenient() {
        assert_eq!(Atmosphere::from_label("NEON"), Atmosphere::Neon);
        assert_eq!(Atmosphere::from_label("  space "), Atmosphere::Space);
        assert_eq!(Atmosphere::from_label("warm/space"), Atmosphere::Warm);
        assert_eq!(Atmosphere::from_label("eerie"), Atmosphere::Dark);
        assert_eq!(Atmosphere::from_label(""), Atmosphere::Dark);
    }

    #[test]
    fn test_room_mode_uses_short_wire_names() {
        assert_eq!(serde_json::to_value(RoomMode::Panorama).unwrap(), "360");
        assert_eq!(serde_json::to_value(RoomMode::Flat).unwrap(), "2d");
        let parsed: RoomMode = serde_json::from_str("\"3d\"").unwrap();
        assert_eq!(parsed, RoomMode::Scene3d);
    }

    #[test]
    fn test_quiz_is_correct_is_exact() {
        let quiz = Quiz {
            question: "Year?".to_owned(),
            correct_answer: "1874".to_owned(),
            options: vec![],
        };

        assert!(quiz.is_correct("1874"));
        assert!(!quiz.is_correct(" 1874"));
        assert!(!quiz.is_correct("1875"));
    }

    #[test]
    fn test_visual_ref_url_and_origin() {
        let generated = VisualRef::Generated {
            url: "/api/v1/assets/x".to_owned(),
        };
        let fallback = VisualRef::Fallback {
            url: "https://example.com/a.jpg".to_owned(),
        };

        assert_eq!(generated.url(), Some("/api/v1/assets/x"));
        assert!(generated.is_generated());
        assert_eq!(fallback.url(), Some("https://example.com/a.jpg"));
        assert!(!fallback.is_generated());
    }
}
