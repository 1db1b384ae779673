//! Room fixtures shared across context tests.

use chrono::{DateTime, TimeZone, Utc};
use greatescape_room::{RoomCandidate, RoomDefinition, validate};

/// The instant every test clock starts at.
///
/// # Panics
///
/// Never in practice; the literal date is valid.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A generated-room style JSON document (no id) with a two-step clue chain:
/// `clock` must be collected before `safe`. Also holds a misleading
/// `painting` and an exit `door`.
#[must_use]
pub fn gated_room_json() -> String {
    serde_json::json!({
        "name": "The Clockwork Vault",
        "objective": "Find the combination before the gears stop.",
        "ambientColor": "#f59e0b",
        "atmosphere": "industrial",
        "quiz": {
            "question": "What is the combination?",
            "correctAnswer": "42",
            "options": ["7", "42", "99", "13"]
        },
        "hotspots": [
            {
                "id": "clock",
                "label": "Grandfather Clock",
                "icon": "🕰️",
                "clue": "The hands point at four.",
                "description": "Its pendulum is still.",
                "collectible": true,
                "glowColor": "#f59e0b",
                "x": 20,
                "y": 40
            },
            {
                "id": "safe",
                "label": "Wall Safe",
                "icon": "🔐",
                "clue": "Scratched inside the door: 'then two'.",
                "description": "The clock key opens it.",
                "collectible": true,
                "required": "clock",
                "x": 60,
                "y": 45
            },
            {
                "id": "painting",
                "label": "Oil Painting",
                "icon": "🖼️",
                "description": "Just a bowl of fruit.",
                "isMisleading": true,
                "x": 40,
                "y": 20
            },
            {
                "id": "door",
                "label": "Iron Door",
                "icon": "🚪",
                "description": "Locked tight.",
                "isExit": true,
                "x": 90,
                "y": 50
            }
        ],
        "hints": [
            "Time is the first clue.",
            "The safe only opens once you understand the clock.",
            "Four, then two."
        ]
    })
    .to_string()
}

/// The validated [`gated_room_json`] room with id `clockwork-vault`.
///
/// # Panics
///
/// Panics if the fixture no longer validates.
#[must_use]
pub fn gated_room() -> RoomDefinition {
    let mut candidate = RoomCandidate::from_json(&gated_room_json()).unwrap();
    candidate.id = Some("clockwork-vault".to_owned());
    validate(candidate).unwrap()
}

/// A single-hotspot room with no hints, id `bare-cell`.
///
/// # Panics
///
/// Panics if the fixture no longer validates.
#[must_use]
pub fn no_hint_room() -> RoomDefinition {
    let json = serde_json::json!({
        "id": "bare-cell",
        "name": "Bare Cell",
        "objective": "Get out.",
        "quiz": {
            "question": "Two plus two?",
            "correctAnswer": "4",
            "options": ["3", "4", "5", "22"]
        },
        "hotspots": [
            { "id": "cot", "label": "Cot", "clue": "Tally marks: four.", "collectible": true }
        ]
    });
    validate(RoomCandidate::from_json(&json.to_string()).unwrap()).unwrap()
}
