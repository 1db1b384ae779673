//! Placeholder visuals for rooms without artwork.

use greatescape_core::rng::DeterministicRng;
use greatescape_room::{Atmosphere, FloatingIcon, Palette, PlaceholderVisual};

struct Theme {
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    gradient: &'static str,
    pattern: &'static str,
    icons: [&'static str; 6],
}

const DARK: Theme = Theme {
    primary: "#2a1810",
    secondary: "#4a3020",
    accent: "#8b5cf6",
    gradient: "linear-gradient(135deg, #1a0f0a 0%, #2a1810 50%, #1e1e2e 100%)",
    pattern: "victorian",
    icons: ["📚", "🕯️", "🖼️", "⚰️", "🗝️", "🦇"],
};

const NEON: Theme = Theme {
    primary: "#0a1628",
    secondary: "#1e3a5f",
    accent: "#06b6d4",
    gradient: "linear-gradient(135deg, #0d0d1a 0%, #0a1628 50%, #161b33 100%)",
    pattern: "circuit",
    icons: ["🔬", "⚗️", "⚡", "🧪", "💻", "🔋"],
};

const WARM: Theme = Theme {
    primary: "#1a1206",
    secondary: "#3d2a0f",
    accent: "#f59e0b",
    gradient: "linear-gradient(135deg, #0f0a04 0%, #1a1206 50%, #2a1a0a 100%)",
    pattern: "hieroglyph",
    icons: ["📜", "🗿", "🔥", "⚱️", "🏛️", "💎"],
};

const SPACE: Theme = Theme {
    primary: "#0d0d1a",
    secondary: "#161b33",
    accent: "#8b5cf6",
    gradient: "linear-gradient(135deg, #000010 0%, #0d0d1a 50%, #1a1a2e 100%)",
    pattern: "stars",
    icons: ["🛸", "🌟", "🚀", "💫", "🔭", "☄️"],
};

const COZY: Theme = Theme {
    primary: "#2b1d14",
    secondary: "#5c3d2e",
    accent: "#fb923c",
    gradient: "linear-gradient(135deg, #1c120c 0%, #2b1d14 50%, #3b2a1e 100%)",
    pattern: "quilt",
    icons: ["🧶", "☕", "🕰️", "🪴", "🧸", "🍪"],
};

const INDUSTRIAL: Theme = Theme {
    primary: "#1c1f22",
    secondary: "#3a3f44",
    accent: "#eab308",
    gradient: "linear-gradient(135deg, #111315 0%, #1c1f22 50%, #2a2e33 100%)",
    pattern: "grating",
    icons: ["⚙️", "🔩", "🛠️", "🏭", "⛓️", "🔧"],
};

const TENSE: Theme = Theme {
    primary: "#1f0a0a",
    secondary: "#4a1212",
    accent: "#ef4444",
    gradient: "linear-gradient(135deg, #120505 0%, #1f0a0a 50%, #2e0f0f 100%)",
    pattern: "hazard",
    icons: ["⏱️", "🚨", "💣", "⚠️", "🔒", "📟"],
};

const MYSTERIOUS: Theme = Theme {
    primary: "#0f1a17",
    secondary: "#1f3a33",
    accent: "#10b981",
    gradient: "linear-gradient(135deg, #07100e 0%, #0f1a17 50%, #16261f 100%)",
    pattern: "fog",
    icons: ["🔮", "🗝️", "🌫️", "🕳️", "📿", "👁️"],
};

fn theme_for(atmosphere: Atmosphere) -> &'static Theme {
    match atmosphere {
        Atmosphere::Dark => &DARK,
        Atmosphere::Neon => &NEON,
        Atmosphere::Warm => &WARM,
        Atmosphere::Space => &SPACE,
        Atmosphere::Cozy => &COZY,
        Atmosphere::Industrial => &INDUSTRIAL,
        Atmosphere::Tense => &TENSE,
        Atmosphere::Mysterious => &MYSTERIOUS,
    }
}

/// Builds a themed placeholder for `title`. Icons are spread left to right
/// in 15% steps with random jitter, so two placeholders rarely look alike.
pub fn build_placeholder(
    title: &str,
    atmosphere: Atmosphere,
    rng: &mut dyn DeterministicRng,
) -> PlaceholderVisual {
    let theme = theme_for(atmosphere);
    let icons = (0u32..)
        .zip(theme.icons)
        .map(|(index, icon)| {
            let step = f64::from(index);
            FloatingIcon {
                icon: icon.to_owned(),
                x: 10.0 + step * 15.0 + rng.next_f64() * 10.0,
                y: 20.0 + rng.next_f64() * 60.0,
                delay: step * 0.5,
                scale: 0.8 + rng.next_f64() * 0.5,
            }
        })
        .collect();

    PlaceholderVisual {
        title: title.to_owned(),
        atmosphere,
        palette: Palette {
            primary: theme.primary.to_owned(),
            secondary: theme.secondary.to_owned(),
            accent: theme.accent.to_owned(),
            gradient: theme.gradient.to_owned(),
        },
        pattern: theme.pattern.to_owned(),
        icons,
    }
}
