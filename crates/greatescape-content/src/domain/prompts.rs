//! Prompt assembly and response cleanup.

use greatescape_room::RoomMode;
use serde::{Deserialize, Serialize};

/// Terms steered away from in every image request.
pub const NEGATIVE_PROMPT: &str =
    "blurry, distorted, low quality, people, text, watermark, signature, multiple items, messy";

/// Presentation requested for a synthesized room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisMode {
    /// 360° equirectangular panorama.
    #[serde(rename = "360")]
    Panorama,
    /// Flat background image.
    #[serde(rename = "flat")]
    Flat,
}

impl SynthesisMode {
    /// The room mode the synthesized room is tagged with.
    #[must_use]
    pub fn room_mode(self) -> RoomMode {
        match self {
            Self::Panorama => RoomMode::Panorama,
            Self::Flat => RoomMode::Flat,
        }
    }

    /// The asset type requested for the room background.
    #[must_use]
    pub fn background_asset(self) -> AssetType {
        match self {
            Self::Panorama => AssetType::Panorama,
            Self::Flat => AssetType::Room,
        }
    }
}

/// Kind of artwork requested from the image provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Full 360° environment.
    Panorama,
    /// Flat room background.
    Room,
    /// Single object thumbnail.
    Item,
}

impl AssetType {
    /// Style suffix appended to every prompt of this type.
    #[must_use]
    pub fn style_suffix(self) -> &'static str {
        match self {
            Self::Panorama => {
                "360 degree equirectangular panorama, VR environment, seamless, wide angle, photorealistic, high resolution, 8k"
            }
            Self::Room => {
                "photorealistic escape room background, high detail, atmospheric lighting, 4k, cinematic composition"
            }
            Self::Item => {
                "isolated object, professional product photography, plain dark background, high detail, macro, 4k"
            }
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Panorama => "panorama",
            Self::Room => "room",
            Self::Item => "item",
        }
    }
}

/// Appends the style suffix for `asset_type` to a caller description.
#[must_use]
pub fn visual_prompt(description: &str, asset_type: AssetType) -> String {
    format!("{}, {}", description.trim(), asset_type.style_suffix())
}

/// The fixed structural prompt sent to the text provider.
#[must_use]
pub fn room_metadata_prompt(theme: &str) -> String {
    format!(
        r##"Create a JSON configuration for an escape room with the theme: "{theme}".
The configuration MUST follow this exact structure:
{{
    "name": "Room Name",
    "objective": "A short, mysterious objective",
    "ambientColor": "#hexColor",
    "atmosphere": "one of dark, neon, warm, space, cozy, industrial, tense, mysterious",
    "quiz": {{
        "question": "A puzzle question based on the room's clues",
        "correctAnswer": "The answer",
        "options": ["Option 1", "Option 2", "Option 3", "Option 4"]
    }},
    "hotspots": [
        {{
            "id": "unique-id",
            "label": "Item Name",
            "icon": "emoji",
            "clue": "A hint or piece of information found here",
            "description": "Short description of the item",
            "collectible": true,
            "glowColor": "#hexColor",
            "position": [x, y, z]
        }}
    ],
    "hints": ["Hint 1", "Hint 2", "Hint 3"]
}}
Positions are 3D coordinates between -10 and 10. The correctAnswer must appear
exactly once in options, and there must be exactly 4 options.
Provide ONLY the JSON string. Ensure there are 3-4 hotspots and 3 hints."##
    )
}

/// Removes markdown code fences and any prose around the JSON object.
#[must_use]
pub fn strip_code_fences(response: &str) -> &str {
    let mut text = response.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    let text = text.trim();
    if text.starts_with('{') {
        return text;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
