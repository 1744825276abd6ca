//! Serializable renderer configuration and icon manifests.
//!
//! A [`RendererProfile`] captures how a [`Renderer`](crate::Renderer) is set
//! up (device scale, fonts, symbol and asset locations) in a JSON-friendly
//! format. An [`IconManifest`] lists named descriptors for batch rendering.
//!
//! # Example
//!
//! ```
//! use ide_icons::{IconColor, IconDescriptor, IconManifest, RendererProfile};
//!
//! let profile = RendererProfile::from_json(r#"{ "scale": 2.0, "loadSystemFonts": false }"#).unwrap();
//! assert_eq!(profile.scale, 2.0);
//!
//! let mut manifest = IconManifest::new();
//! manifest.push("swift", IconDescriptor::text("S").with_color(IconColor::Orange));
//! let json = manifest.to_json().unwrap();
//! assert_eq!(IconManifest::from_json(&json).unwrap(), manifest);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::descriptor::IconDescriptor;
use crate::error::IconResult;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`RendererProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &RendererProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> RendererProfile;
}

// ============================================================================
// RendererProfile
// ============================================================================

/// Renderer settings.
///
/// # JSON Format
///
/// ```json
/// {
///   "scale": 2.0,
///   "loadSystemFonts": true,
///   "fontDirs": ["fonts"],
///   "fontFamily": "Inter",
///   "assetDir": "assets",
///   "symbolDirs": ["symbols"]
/// }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RendererProfile {
    /// Device pixels per point.
    #[serde(default = "default_scale")]
    pub scale: f32,

    #[serde(default = "default_true")]
    pub load_system_fonts: bool,

    /// Extra font files or directories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub font_dirs: Vec<PathBuf>,

    /// Sans-serif family to draw text with. Picked from the installed fonts
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Default bundle directory for image content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_dir: Option<PathBuf>,

    /// Directories of `*.svg` symbols added to the built-in ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbol_dirs: Vec<PathBuf>,
}

impl Default for RendererProfile {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            font_family: None,
            asset_dir: None,
            symbol_dirs: Vec::new(),
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl RendererProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the device scale, e.g. from a command-line flag.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> IconResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> IconResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> IconResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// IconManifest
// ============================================================================

/// A named icon in a manifest. The name becomes the output file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ManifestEntry {
    pub name: String,
    pub icon: IconDescriptor,
}

/// A batch of icons to render.
///
/// ```json
/// {
///   "icons": [
///     { "name": "swift", "icon": { "content": { "text": "S" }, "color": "orange" } },
///     { "name": "plugin", "icon": { "content": { "systemImage": "puzzlepiece.fill" } } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IconManifest {
    #[serde(default)]
    pub icons: Vec<ManifestEntry>,
}

impl IconManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, icon: IconDescriptor) {
        self.icons.push(ManifestEntry {
            name: name.into(),
            icon,
        });
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn to_json(&self) -> IconResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> IconResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> IconResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Appearance, IconColor};
    use crate::descriptor::{IconContent, IconStyle};
    use crate::error::IconError;

    #[test]
    fn profile_serialization_roundtrip() {
        let profile = RendererProfile {
            scale: 2.0,
            load_system_fonts: false,
            font_dirs: vec![PathBuf::from("fonts")],
            font_family: Some("Inter".into()),
            asset_dir: Some(PathBuf::from("assets")),
            symbol_dirs: vec![PathBuf::from("symbols")],
        };

        let json = profile.to_json().unwrap();
        assert!(json.contains("\"loadSystemFonts\":false"));
        assert!(json.contains("\"fontFamily\":\"Inter\""));

        let restored = RendererProfile::from_json(&json).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn empty_profile_uses_defaults() {
        let profile = RendererProfile::from_json("{}").unwrap();
        assert_eq!(profile, RendererProfile::default());
        assert_eq!(profile.scale, 1.0);
        assert!(profile.load_system_fonts);
    }

    #[test]
    fn scale_override_keeps_other_settings() {
        let profile = RendererProfile::from_json(r#"{ "scale": 2.0, "fontFamily": "Inter" }"#)
            .unwrap()
            .with_scale(3.0);
        assert_eq!(profile.scale, 3.0);
        assert_eq!(profile.font_family.as_deref(), Some("Inter"));
    }

    #[test]
    fn default_profile_omits_empty_fields() {
        let json = RendererProfile::new().to_json().unwrap();
        assert!(!json.contains("fontDirs"));
        assert!(!json.contains("assetDir"));
    }

    #[test]
    fn invalid_json_is_profile_error() {
        assert!(matches!(
            RendererProfile::from_json("{ not json"),
            Err(IconError::Profile(_))
        ));
    }

    #[test]
    fn manifest_parses_descriptors() {
        let manifest = IconManifest::from_json(
            r#"{
                "icons": [
                    { "name": "at", "icon": { "content": { "text": "@" }, "color": "blue" } },
                    {
                        "name": "plugin",
                        "icon": {
                            "content": { "systemImage": "puzzlepiece.fill" },
                            "style": "simpleHighlighted",
                            "appearance": "light",
                            "size": 32
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        let at = &manifest.icons[0];
        assert_eq!(at.name, "at");
        assert_eq!(at.icon.content, IconContent::Text("@".into()));
        assert_eq!(at.icon.color, IconColor::Blue);
        assert_eq!(at.icon.size, 16.0);

        let plugin = &manifest.icons[1].icon;
        assert_eq!(plugin.style, IconStyle::SimpleHighlighted);
        assert_eq!(plugin.appearance, Appearance::Light);
        assert_eq!(plugin.size, 32.0);
    }

    #[test]
    fn manifest_roundtrip() {
        let mut manifest = IconManifest::new();
        manifest.push("doc", IconDescriptor::text("{}").with_style(IconStyle::Outline));
        manifest.push("list", IconDescriptor::system_image("list.bullet"));

        let restored = IconManifest::from_json(&manifest.to_json_pretty().unwrap()).unwrap();
        assert_eq!(restored, manifest);
    }
}
