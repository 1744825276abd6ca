//! ide-icons: IDE-style file-type badge icons
//!
//! This crate renders small rounded-rect "badge" icons of the kind IDEs use
//! for file types and project items. An [`IconDescriptor`] says what to draw
//! (a short text label, a bundled image or a named symbol) and how (color,
//! style, light/dark appearance, size); a [`Renderer`] turns it into an RGBA
//! bitmap at a given device scale.
//!
//! # Example
//!
//! ```
//! use ide_icons::{IconColor, IconDescriptor, IconSize, IconStyle, Renderer, RendererProfile};
//!
//! let renderer = Renderer::from_profile(&RendererProfile {
//!     load_system_fonts: false,
//!     ..RendererProfile::default()
//! });
//!
//! let icon = IconDescriptor::system_image("puzzlepiece.fill")
//!     .with_color(IconColor::Green)
//!     .with_style(IconStyle::Simple)
//!     .with_size(IconSize::LARGE);
//!
//! let image = renderer.render(&icon);
//! assert_eq!(image.data.dimensions(), (32, 32));
//!
//! // Or straight to PNG
//! let png = renderer.render_png(&icon).unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! # Caching
//!
//! Descriptors are plain values with structural equality, so an
//! [`IconCache`] can memoize renders and hand out shared images:
//!
//! ```
//! use ide_icons::{IconCache, IconDescriptor, Renderer, RendererProfile};
//!
//! let cache = IconCache::new(Renderer::from_profile(&RendererProfile {
//!     load_system_fonts: false,
//!     ..RendererProfile::default()
//! }));
//! let image = cache.get_or_render(&IconDescriptor::text("@"));
//! assert_eq!(cache.len(), 1);
//! assert_eq!(image.scale, 1.0);
//! ```
//!
//! # Serializable Profiles
//!
//! Renderer settings round-trip through JSON with [`RendererProfile`] and the
//! [`Configurable`] trait; batches of icons are described by an
//! [`IconManifest`].

pub mod adjust;
mod cache;
mod color;
mod descriptor;
mod error;
mod icon;
mod profile;
pub mod render;

pub use cache::{IconCache, IconRenderer};
pub use color::{to_hex, to_rgba8, to_skia, AdaptiveColor, Appearance, IconColor};
pub use descriptor::{FontWeight, IconContent, IconDescriptor, IconSize, IconStyle};
pub use error::{IconError, IconResult};
pub use icon::{IconImage, IconSet, RectPx, SizePx};
pub use profile::{Configurable, IconManifest, ManifestEntry, RendererProfile};
pub use render::{
    plan_foreground, shadow_opacity, AssetLoader, BlendMode, BundleAssets, FontConfig, Fonts,
    ForegroundPlan, Renderer, ShadowPlan, SymbolLibrary, SymbolProvider,
};
