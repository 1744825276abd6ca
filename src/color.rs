//! Semantic icon colors and their light/dark variants.
//!
//! Every [`IconColor`] maps to a fixed set of adaptive colors: a background
//! fill, a border, a shared outline and a flat "simple" color. The values are
//! literal constants; nothing here is computed from the host environment.

use palette::{Srgb, Srgba};
use resvg::tiny_skia;
use serde::{Deserialize, Serialize};

// ============================================================================
// Appearance
// ============================================================================

/// The display theme an icon is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Appearance {
    /// Light appearance.
    Light,
    /// Dark appearance.
    #[default]
    Dark,
}

impl Appearance {
    /// Both appearances, light first.
    pub const ALL: [Appearance; 2] = [Appearance::Light, Appearance::Dark];

    /// Returns true for [`Appearance::Dark`].
    pub fn is_dark(self) -> bool {
        self == Appearance::Dark
    }
}

// ============================================================================
// AdaptiveColor
// ============================================================================

/// A pair of colors, one per [`Appearance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveColor {
    pub light: Srgba,
    pub dark: Srgba,
}

impl AdaptiveColor {
    pub fn new(light: Srgba, dark: Srgba) -> Self {
        Self { light, dark }
    }

    /// Selects the half of the pair that matches `appearance`.
    pub fn resolve(&self, appearance: Appearance) -> Srgba {
        match appearance {
            Appearance::Light => self.light,
            Appearance::Dark => self.dark,
        }
    }
}

fn rgb(red: f32, green: f32, blue: f32) -> Srgba {
    Srgba::new(red, green, blue, 1.0)
}

fn white(white: f32, alpha: f32) -> Srgba {
    Srgba::new(white, white, white, alpha)
}

fn system(red: u8, green: u8, blue: u8) -> Srgba {
    let color: Srgb<f32> = Srgb::new(red, green, blue).into_format();
    Srgba::new(color.red, color.green, color.blue, 1.0)
}

// ============================================================================
// IconColor
// ============================================================================

/// Specifies the color of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum IconColor {
    Monochrome,
    Blue,
    Brown,
    Gray,
    Green,
    Orange,
    Pink,
    #[default]
    Purple,
    Red,
    Teal,
    Yellow,
}

impl IconColor {
    /// Every color, in declaration order.
    pub const ALL: [IconColor; 11] = [
        IconColor::Monochrome,
        IconColor::Blue,
        IconColor::Brown,
        IconColor::Gray,
        IconColor::Green,
        IconColor::Orange,
        IconColor::Pink,
        IconColor::Purple,
        IconColor::Red,
        IconColor::Teal,
        IconColor::Yellow,
    ];

    /// Fill of the badge interior in the default style.
    pub fn background_color(self) -> AdaptiveColor {
        let (light, dark) = match self {
            Self::Monochrome => (rgb(1.0, 1.0, 1.0), rgb(0.0, 0.0, 0.0)),
            Self::Blue => (rgb(0.291, 0.588, 0.998), rgb(0.01, 0.199, 0.417)),
            Self::Brown => (rgb(0.714, 0.622, 0.513), rgb(0.271, 0.217, 0.15)),
            Self::Gray => (rgb(0.651, 0.651, 0.667), rgb(0.235, 0.235, 0.243)),
            Self::Green => (rgb(0.031, 0.763, 0.394), rgb(0.037, 0.281, 0.075)),
            Self::Orange => (rgb(0.94, 0.623, 0.283), rgb(0.378, 0.223, 0.006)),
            Self::Pink => (rgb(0.717, 0.309, 0.69), rgb(0.274, 0.082, 0.286)),
            Self::Purple => (rgb(0.704, 0.452, 0.831), rgb(0.302, 0.128, 0.393)),
            Self::Red => (rgb(1.0, 0.403, 0.389), rgb(0.415, 0.089, 0.072)),
            Self::Teal => (rgb(0.374, 0.684, 0.748), rgb(0.123, 0.254, 0.292)),
            Self::Yellow => (rgb(0.952, 0.85, 0.501), rgb(0.384, 0.298, 0.043)),
        };
        AdaptiveColor::new(light, dark)
    }

    /// Border ring in the default style, stroke in the outline style.
    pub fn border_color(self) -> AdaptiveColor {
        let (light, dark) = match self {
            Self::Monochrome => (rgb(0.443, 0.443, 0.462), rgb(0.568, 0.564, 0.592)),
            Self::Blue => (rgb(0.051, 0.439, 0.96), rgb(0.077, 0.599, 0.999)),
            Self::Brown => (rgb(0.636, 0.517, 0.37), rgb(0.675, 0.556, 0.409)),
            Self::Gray => (rgb(0.596, 0.596, 0.616), rgb(0.557, 0.556, 0.577)),
            Self::Green => (rgb(0.103, 0.701, 0.197), rgb(0.157, 0.705, 0.238)),
            Self::Orange => (rgb(0.921, 0.521, 0.0), rgb(0.921, 0.572, 0.028)),
            Self::Pink => (rgb(0.647, 0.137, 0.615), rgb(0.807, 0.231, 0.835)),
            Self::Purple => (rgb(0.623, 0.293, 0.789), rgb(0.801, 0.394, 0.999)),
            Self::Red => (rgb(0.999, 0.23, 0.19), rgb(0.998, 0.272, 0.228)),
            Self::Teal => (rgb(0.161, 0.601, 0.682), rgb(0.339, 0.64, 0.721)),
            Self::Yellow => (rgb(0.749, 0.658, 0.349), rgb(0.929, 0.752, 0.215)),
        };
        AdaptiveColor::new(light, dark)
    }

    /// Hairline outside the border. Identical for every color.
    pub fn outline_color(self) -> AdaptiveColor {
        AdaptiveColor::new(white(0.96, 0.75), white(0.0, 0.5))
    }

    /// Flat fill used by the simple styles.
    pub fn simple_color(self) -> Srgba {
        match self {
            Self::Monochrome => white(0.85, 1.0),
            Self::Blue => system(0, 122, 255),
            Self::Brown => system(162, 132, 94),
            Self::Gray => system(142, 142, 147),
            Self::Green => system(52, 199, 89),
            Self::Orange => system(255, 149, 0),
            Self::Pink => system(255, 45, 85),
            Self::Purple => system(175, 82, 222),
            Self::Red => system(255, 59, 48),
            Self::Teal => system(48, 176, 199),
            Self::Yellow => system(255, 204, 0),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Converts a color into the rasterizer's color type.
pub fn to_skia(color: Srgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(color.red, color.green, color.blue, color.alpha)
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

/// Converts a color into 8-bit straight-alpha RGBA components.
pub fn to_rgba8(color: Srgba) -> (u8, u8, u8, u8) {
    let c: Srgba<u8> = color.into_format();
    (c.red, c.green, c.blue, c.alpha)
}

/// Formats the color part as `#rrggbb`, dropping alpha.
pub fn to_hex(color: Srgba) -> String {
    let (r, g, b, _) = to_rgba8(color);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
