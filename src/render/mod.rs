//! Descriptor → bitmap rendering.
//!
//! A render runs in three passes over one `round(size × scale)` square canvas:
//!
//! 1. **Chrome** ([`chrome`]) - the rounded-rect badge for the icon's style
//! 2. **Shadow** - a blurred black copy of the foreground, default style only
//! 3. **Foreground** - text ([`text`]), a symbol ([`symbol`]) or a bundled
//!    image ([`asset`]), composited normally or erased out of the badge
//!
//! Text is positioned with sub-pixel precision, so fractional offsets such as
//! 3.5 pt at @1x stay fractional. Symbols and images are bitmaps placed on the
//! pixel grid, so their offset is snapped to whole device pixels.
//!
//! Everything the foreground needs is resolved up front into a
//! [`ForegroundPlan`], which can be inspected without rasterizing anything.
//! Lookups that fail along the way (no font, unknown symbol, missing asset)
//! drop that layer; rendering itself never fails.

pub mod asset;
pub mod chrome;
pub mod fonts;
pub mod svg;
pub mod symbol;
pub mod text;

pub use asset::{AssetLoader, BundleAssets};
pub use fonts::{FontConfig, Fonts};
pub use symbol::{SymbolLibrary, SymbolProvider};

use std::sync::Arc;

use image::RgbaImage;
use palette::Srgba;
use resvg::tiny_skia::Pixmap;

use crate::adjust;
use crate::color::{to_rgba8, Appearance, IconColor};
use crate::descriptor::{FontWeight, IconContent, IconDescriptor, IconSize, IconStyle};
use crate::error::IconResult;
use crate::icon::{IconImage, IconSet, RectPx};
use crate::profile::{Configurable, RendererProfile};
use chrome::{BORDER_WIDTH, OUTLINE_WIDTH};
use svg::{composite_erase, composite_over, drop_shadow, pixmap_to_rgba_image, render_svg_with_color};
use text::TextRun;

/// Shadow blur radius, in points.
pub const SHADOW_BLUR: f32 = 2.0;

/// Largest bitmap side, in pixels. Bigger requests render an empty image.
pub const MAX_EXTENT: u32 = 4096;

/// Text drawn with the condensed face when one is available.
const CONDENSED_TEXT: &[&str] = &["Ex", "Pr"];

// ============================================================================
// Foreground Plan
// ============================================================================

/// How the foreground is combined with the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    /// Destination-out: the foreground punches a hole through the badge.
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowPlan {
    /// Blur radius in points.
    pub blur: f32,
    pub opacity: f32,
}

/// Resolved foreground parameters for one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ForegroundPlan {
    /// Font size in points, adjustments included. Also the box symbols and
    /// images are fitted into.
    pub font_size: f32,
    pub weight: FontWeight,
    /// Whether text uses the condensed face.
    pub condensed: bool,
    pub color: Srgba,
    pub blend: BlendMode,
    /// Vertical nudge in points; positive moves the content up.
    pub y_offset: f32,
    pub shadow: Option<ShadowPlan>,
}

/// Shadow opacity for an appearance.
pub fn shadow_opacity(appearance: Appearance) -> f32 {
    if appearance.is_dark() { 1.0 } else { 0.5 }
}

/// Resolves the foreground of `icon`.
///
/// `condensed_available` says whether a condensed face is installed.
pub fn plan_foreground(icon: &IconDescriptor, condensed_available: bool) -> ForegroundPlan {
    let content = &icon.content;
    let style = icon.style;

    let condensed = condensed_available
        && !style.is_simple()
        && content.as_text().is_some_and(|t| CONDENSED_TEXT.contains(&t));

    let weight = match content {
        IconContent::Text(_) => adjust::font_weight(content, style),
        IconContent::SystemImage(_) => adjust::symbol_weight(style),
        IconContent::Image { .. } => adjust::style_font_weight(style),
    };

    let mut y_offset = adjust::y_offset_delta(content, icon.size);
    if content.as_text().is_some() {
        if icon.size >= IconSize::LARGE {
            y_offset -= 1.0;
        } else if condensed {
            y_offset -= 1.0;
        }
    }

    let (color, blend) = match style {
        IconStyle::SimpleHighlighted => (Srgba::new(0.0, 0.0, 0.0, 1.0), BlendMode::Erase),
        IconStyle::Outline => (icon.color.border_color().resolve(icon.appearance), BlendMode::Normal),
        _ if icon.color == IconColor::Monochrome => {
            (icon.color.border_color().resolve(icon.appearance), BlendMode::Normal)
        }
        _ => (Srgba::new(1.0, 1.0, 1.0, 1.0), BlendMode::Normal),
    };

    let shadow = (style == IconStyle::Default && icon.color != IconColor::Monochrome).then(|| ShadowPlan {
        blur: SHADOW_BLUR,
        opacity: shadow_opacity(icon.appearance),
    });

    ForegroundPlan {
        font_size: icon.font_size() + adjust::font_size_delta(content),
        weight,
        condensed,
        color,
        blend,
        y_offset,
        shadow,
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders [`IconDescriptor`]s into [`IconImage`]s.
///
/// The renderer owns the device scale and the collaborators content is
/// resolved through. It is cheap to clone and safe to share between threads.
///
/// # Example
///
/// ```
/// use ide_icons::{IconColor, IconDescriptor, Renderer, RendererProfile};
///
/// let renderer = Renderer::from_profile(&RendererProfile {
///     load_system_fonts: false,
///     ..RendererProfile::default()
/// })
/// .with_scale(2.0);
///
/// let icon = IconDescriptor::system_image("list.bullet").with_color(IconColor::Teal);
/// let image = renderer.render(&icon);
/// assert_eq!(image.data.dimensions(), (32, 32));
/// ```
#[derive(Clone)]
pub struct Renderer {
    scale: f32,
    fonts: Fonts,
    symbols: Arc<dyn SymbolProvider>,
    assets: Arc<dyn AssetLoader>,
    profile: RendererProfile,
}

impl Renderer {
    /// A renderer at @1x with system fonts, built-in symbols and assets
    /// resolved relative to the working directory.
    pub fn new() -> Self {
        Self::from_profile(&RendererProfile::default())
    }

    /// Builds a renderer from a profile.
    ///
    /// Font files, symbol directories and the asset root that cannot be read
    /// are logged and skipped.
    pub fn from_profile(profile: &RendererProfile) -> Self {
        let fonts = Fonts::new(&FontConfig {
            load_system_fonts: profile.load_system_fonts,
            font_paths: profile.font_dirs.clone(),
            family: profile.font_family.clone(),
        });

        let mut symbols = SymbolLibrary::new();
        for dir in &profile.symbol_dirs {
            if let Err(err) = symbols.load_dir(dir) {
                tracing::warn!("skipping symbol directory: {err}");
            }
        }

        Self {
            scale: sanitize_scale(profile.scale),
            fonts,
            symbols: Arc::new(symbols),
            assets: Arc::new(BundleAssets::new(profile.asset_dir.clone())),
            profile: profile.clone(),
        }
    }

    /// Sets the device scale (points → pixels).
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = sanitize_scale(scale);
        self.profile.scale = self.scale;
        self
    }

    pub fn with_fonts(mut self, fonts: Fonts) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_symbols(mut self, symbols: impl SymbolProvider + 'static) -> Self {
        self.symbols = Arc::new(symbols);
        self
    }

    pub fn with_assets(mut self, assets: impl AssetLoader + 'static) -> Self {
        self.assets = Arc::new(assets);
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn fonts(&self) -> &Fonts {
        &self.fonts
    }

    /// Resolves the foreground parameters `render` would use.
    pub fn plan(&self, icon: &IconDescriptor) -> ForegroundPlan {
        plan_foreground(icon, self.fonts.has_condensed())
    }

    /// Renders `icon` at the renderer's scale.
    pub fn render(&self, icon: &IconDescriptor) -> IconImage {
        self.render_at(icon, self.scale)
    }

    /// Renders `icon` once per scale.
    pub fn render_set(&self, icon: &IconDescriptor, scales: &[f32]) -> IconSet {
        IconSet::from_images(
            scales
                .iter()
                .map(|&scale| self.render_at(icon, sanitize_scale(scale)))
                .collect(),
        )
    }

    /// Renders `icon` and encodes it as PNG.
    pub fn render_png(&self, icon: &IconDescriptor) -> IconResult<Vec<u8>> {
        self.render(icon).to_png()
    }

    fn render_at(&self, icon: &IconDescriptor, scale: f32) -> IconImage {
        let extent = (icon.size * scale).round().max(0.0);
        if !extent.is_finite() || extent > MAX_EXTENT as f32 {
            tracing::warn!(size = icon.size, scale, "icon too large to render");
            return IconImage::new(RgbaImage::new(0, 0), scale, RectPx::default());
        }
        let px = extent as u32;
        let inset = ((BORDER_WIDTH + OUTLINE_WIDTH) * scale).round() as u32;
        let interior = px.saturating_sub(inset * 2);
        let bounds = RectPx::new(inset.min(px), inset.min(px), interior, interior);

        let Some(mut pixmap) = Pixmap::new(px, px) else {
            return IconImage::new(RgbaImage::new(0, 0), scale, RectPx::default());
        };
        chrome::draw(&mut pixmap, icon, scale);
        let mut canvas = pixmap_to_rgba_image(&pixmap);

        let plan = self.plan(icon);
        if let Some(layer) = self.foreground(icon, &plan, px, scale) {
            if let Some(shadow) = plan.shadow {
                let sigma = shadow.blur * scale / 2.0;
                composite_over(&mut canvas, &drop_shadow(&layer, shadow.opacity, sigma), 0, 0);
            }
            match plan.blend {
                BlendMode::Normal => composite_over(&mut canvas, &layer, 0, 0),
                BlendMode::Erase => composite_erase(&mut canvas, &layer),
            }
        }

        IconImage::new(canvas, scale, bounds)
    }

    /// Draws the foreground on a transparent canvas-sized layer.
    fn foreground(&self, icon: &IconDescriptor, plan: &ForegroundPlan, px: u32, scale: f32) -> Option<RgbaImage> {
        let dy = pixel_offset(plan.y_offset, scale);

        match &icon.content {
            IconContent::Text(text) => {
                let family = if plan.condensed {
                    self.fonts.condensed_family().unwrap_or(self.fonts.family())
                } else {
                    self.fonts.family()
                };
                let run = TextRun {
                    text: text.as_str(),
                    family,
                    font_size: plan.font_size * scale,
                    weight: plan.weight,
                    condensed: plan.condensed,
                    color: plan.color,
                };
                let center = px as f32 / 2.0;
                run.render(&self.fonts, px, px, center, center + dy)
            }
            IconContent::SystemImage(name) => {
                let Some(svg) = self.symbols.symbol(name, plan.weight) else {
                    tracing::debug!("unknown symbol {name:?}, drawing badge only");
                    return None;
                };
                let glyph = render_svg_with_color(&svg, glyph_size(icon, plan, scale), Some(to_rgba8(plan.color)))?;
                Some(centered(&glyph, px, dy.round() as i32))
            }
            IconContent::Image { name, bundle } => {
                let image = self.assets.load(name, bundle.as_deref(), glyph_size(icon, plan, scale))?;
                Some(centered(&image, px, dy.round() as i32))
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("scale", &self.scale)
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl Configurable for Renderer {
    fn apply_profile(&mut self, profile: &RendererProfile) {
        *self = Self::from_profile(profile);
    }

    fn export_profile(&self) -> RendererProfile {
        self.profile.clone()
    }
}

/// Converts a Y-up offset in points to a Y-down pixel shift.
fn pixel_offset(y_offset: f32, scale: f32) -> f32 {
    -(y_offset * scale)
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        tracing::warn!("invalid device scale {scale}, using 1.0");
        1.0
    }
}

/// Pixel box for symbols and images: the font size, capped to the interior
/// inset by one more point.
fn glyph_size(icon: &IconDescriptor, plan: &ForegroundPlan, scale: f32) -> u32 {
    let interior = icon.size - 2.0 * (BORDER_WIDTH + OUTLINE_WIDTH + 1.0);
    (plan.font_size.min(interior).max(0.0) * scale).round() as u32
}

/// Places `image` centered on a `px x px` layer, shifted down by `dy` pixels.
fn centered(image: &RgbaImage, px: u32, dy: i32) -> RgbaImage {
    let mut layer = RgbaImage::new(px, px);
    let x = (px as i32 - image.width() as i32) / 2;
    let y = (px as i32 - image.height() as i32) / 2 + dy;
    composite_over(&mut layer, image, x, y);
    layer
}
