//! The icon descriptor: an immutable blueprint of what to draw.
//!
//! An [`IconDescriptor`] is the unit of identity for the whole crate. Two
//! descriptors that compare equal always render to identical bitmaps, which
//! makes the descriptor the natural cache key.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{Appearance, IconColor};

// ============================================================================
// Sizes
// ============================================================================

/// Predefined icon sizes, in points.
pub struct IconSize;

impl IconSize {
    /// 16 pt.
    pub const REGULAR: f32 = 16.0;
    /// 32 pt.
    pub const LARGE: f32 = 32.0;
}

fn default_size() -> f32 {
    IconSize::REGULAR
}

// ============================================================================
// IconContent
// ============================================================================

/// Specifies the content drawn on top of the badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum IconContent {
    /// A short text label, typically one or two characters.
    Text(String),

    /// A named image asset, optionally looked up in a specific bundle directory.
    Image {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bundle: Option<PathBuf>,
    },

    /// A named symbol resolved through a [`SymbolProvider`](crate::SymbolProvider).
    SystemImage(String),
}

impl IconContent {
    /// Returns the text if this is [`IconContent::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the symbol name if this is [`IconContent::SystemImage`].
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::SystemImage(name) => Some(name),
            _ => None,
        }
    }
}

// ============================================================================
// IconStyle
// ============================================================================

/// Specifies the style of the badge chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum IconStyle {
    /// Filled badge with a hairline outline and a border ring.
    #[default]
    Default,
    /// Stroked border only.
    Outline,
    /// Flat fill in the color's simple variant.
    Simple,
    /// Opaque white fill with the content knocked out of it.
    SimpleHighlighted,
}

impl IconStyle {
    /// Every style, in iteration order.
    pub const ALL: [IconStyle; 4] = [
        IconStyle::Default,
        IconStyle::Outline,
        IconStyle::Simple,
        IconStyle::SimpleHighlighted,
    ];

    /// Returns true for the two flat styles.
    pub fn is_simple(self) -> bool {
        matches!(self, Self::Simple | Self::SimpleHighlighted)
    }
}

// ============================================================================
// FontWeight
// ============================================================================

/// Font and symbol weights used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontWeight {
    Light,
    Regular,
    Medium,
    Semibold,
}

impl FontWeight {
    /// The numeric CSS weight.
    pub fn to_number(self) -> u16 {
        match self {
            Self::Light => 300,
            Self::Regular => 400,
            Self::Medium => 500,
            Self::Semibold => 600,
        }
    }
}

// ============================================================================
// IconDescriptor
// ============================================================================

/// The blueprint for an icon.
///
/// Construct one with [`text`](Self::text), [`image`](Self::image),
/// [`system_image`](Self::system_image) or [`new`](Self::new), then refine it
/// with the `with_*` methods:
///
/// ```
/// use ide_icons::{IconColor, IconDescriptor, IconSize, IconStyle};
///
/// let icon = IconDescriptor::text("@")
///     .with_color(IconColor::Blue)
///     .with_style(IconStyle::Outline)
///     .with_size(IconSize::LARGE);
///
/// assert_eq!(icon.size, 32.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IconDescriptor {
    /// The icon's content.
    pub content: IconContent,

    /// The icon's color. Defaults to purple.
    #[serde(default)]
    pub color: IconColor,

    /// The icon's appearance. Defaults to dark.
    #[serde(default)]
    pub appearance: Appearance,

    /// The icon's style.
    #[serde(default)]
    pub style: IconStyle,

    /// The icon's size in points. Defaults to [`IconSize::REGULAR`].
    #[serde(default = "default_size")]
    pub size: f32,
}

impl IconDescriptor {
    /// Creates a descriptor with default color, appearance, style and size.
    pub fn new(content: IconContent) -> Self {
        Self {
            content,
            color: IconColor::default(),
            appearance: Appearance::default(),
            style: IconStyle::default(),
            size: IconSize::REGULAR,
        }
    }

    /// Creates a text icon.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(IconContent::Text(text.into()))
    }

    /// Creates an icon showing a named image from the default asset root.
    pub fn image(name: impl Into<String>) -> Self {
        Self::new(IconContent::Image {
            name: name.into(),
            bundle: None,
        })
    }

    /// Creates an icon showing a named image from a specific bundle directory.
    pub fn image_in(name: impl Into<String>, bundle: impl AsRef<Path>) -> Self {
        Self::new(IconContent::Image {
            name: name.into(),
            bundle: Some(bundle.as_ref().to_path_buf()),
        })
    }

    /// Creates an icon showing a named symbol.
    pub fn system_image(name: impl Into<String>) -> Self {
        Self::new(IconContent::SystemImage(name.into()))
    }

    pub fn with_color(mut self, color: IconColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn with_style(mut self, style: IconStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Rounded font size in points, before per-glyph adjustments.
    pub fn font_size(&self) -> f32 {
        (self.size / 1.5).round()
    }

    /// Corner radius of the outermost rounded rect, in points.
    pub fn outer_radius(&self) -> f32 {
        (self.size / 4.5).floor().min(5.0)
    }
}

// Sizes compare by bit pattern so that Eq and Hash stay consistent.
impl PartialEq for IconDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.color == other.color
            && self.appearance == other.appearance
            && self.style == other.style
            && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for IconDescriptor {}

impl Hash for IconDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
        self.color.hash(state);
        self.appearance.hash(state);
        self.style.hash(state);
        self.size.to_bits().hash(state);
    }
}
