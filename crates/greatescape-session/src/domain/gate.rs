//! Hotspot interaction gate.
//!
//! Pure decisions about what a click on a hotspot does. The engine applies
//! the decision; nothing here touches session state.

use greatescape_room::Hotspot;
use serde::{Deserialize, Serialize};

/// Whether exit hotspots honour their `required` dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitGatePolicy {
    /// Exits always open, whatever they require.
    #[default]
    Bypass,
    /// Exits are gated like any other hotspot.
    HonorRequired,
}

/// Which hotspots count toward exploration progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Only non-misleading hotspots carrying a clue.
    #[default]
    ExcludeMisleading,
    /// Misleading hotspots count too, once inspected.
    IncludeMisleading,
}

/// What an interaction attempt should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// The hotspot depends on another that has not been collected.
    Blocked {
        /// The missing dependency.
        required: String,
    },
    /// Flavour only; no clue is recorded.
    Misleading,
    /// Already collected; show its content again.
    Revisit,
    /// First collection.
    Collect {
        /// The clue to record, if the hotspot has one.
        clue: Option<String>,
    },
    /// Leave the room.
    Exit,
}

/// True unless the hotspot requires another that has not been collected.
#[must_use]
pub fn can_interact(hotspot: &Hotspot, collected: &[String]) -> bool {
    hotspot
        .required
        .as_ref()
        .is_none_or(|required| collected.contains(required))
}

/// Decides what interacting with `hotspot` does given what has been
/// collected.
#[must_use]
pub fn classify(
    hotspot: &Hotspot,
    collected: &[String],
    exit_policy: ExitGatePolicy,
) -> Interaction {
    if hotspot.is_exit && exit_policy == ExitGatePolicy::Bypass {
        return Interaction::Exit;
    }
    if !can_interact(hotspot, collected) {
        return Interaction::Blocked {
            required: hotspot.required.clone().unwrap_or_default(),
        };
    }
    if hotspot.is_exit {
        return Interaction::Exit;
    }
    if hotspot.is_misleading {
        return Interaction::Misleading;
    }
    if collected.contains(&hotspot.id) {
        return Interaction::Revisit;
    }
    Interaction::Collect {
        clue: hotspot.clue.clone(),
    }
}
