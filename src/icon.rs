//! Rendered icon bitmaps.
//!
//! [`IconImage`] is what the renderer produces for one descriptor at one
//! device scale; [`IconSet`] groups renditions of the same descriptor at
//! several scales (@1x, @2x, @3x).

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{IconError, IconResult};

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the pixel at (x, y) lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// A rendered icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// Straight-alpha RGBA pixels.
    pub data: RgbaImage,

    /// The device scale the icon was rendered for.
    ///
    /// The logical size of the icon is `dimensions / scale`.
    pub scale: f32,

    /// The badge interior (inside border and outline) where the
    /// foreground content is laid out.
    pub content_bounds: RectPx,
}

impl IconImage {
    pub fn new(data: RgbaImage, scale: f32, content_bounds: RectPx) -> Self {
        Self {
            data,
            scale,
            content_bounds,
        }
    }

    /// Creates an icon image whose content fills the entire bitmap.
    pub fn new_full_content(data: RgbaImage, scale: f32) -> Self {
        let content_bounds = RectPx::from_size(data.width(), data.height());
        Self::new(data, scale, content_bounds)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the logical size of the icon (dimensions / scale).
    ///
    /// For a 64x64 @2x icon, the logical size is 32x32.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.data.width() as f32 / self.scale,
            self.data.height() as f32 / self.scale,
        )
    }

    /// Encodes the bitmap as PNG.
    pub fn to_png(&self) -> IconResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.data
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Writes the bitmap to `path` as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> IconResult<()> {
        let path = path.as_ref();
        let bytes = self.to_png()?;
        std::fs::write(path, bytes).map_err(|source| IconError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Renditions of one icon at various device scales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    pub images: Vec<IconImage>,
}

impl IconSet {
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    pub fn from_images(images: Vec<IconImage>) -> Self {
        Self { images }
    }

    pub fn add_image(&mut self, image: IconImage) {
        self.images.push(image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Finds the rendition whose scale is closest to `scale`.
    pub fn find_by_scale(&self, scale: f32) -> Option<&IconImage> {
        self.images
            .iter()
            .min_by(|a, b| (a.scale - scale).abs().total_cmp(&(b.scale - scale).abs()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.images.iter()
    }
}

impl IntoIterator for IconSet {
    type Item = IconImage;
    type IntoIter = std::vec::IntoIter<IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconImage;
    type IntoIter = std::slice::Iter<'a, IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
