//! Bundled image assets.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::FilterType;

use super::svg::{parse_svg, render_tree_fit};
use crate::error::{IconError, IconResult};

/// Resolves a named image to a bitmap fitted into `size x size` pixels.
pub trait AssetLoader: Send + Sync {
    fn load(&self, name: &str, bundle: Option<&Path>, size: u32) -> Option<RgbaImage>;
}

/// Loads assets from a bundle directory.
///
/// A descriptor's own bundle wins over the loader's default root. Within the
/// directory, `name`, `name.png` and `name.svg` are tried in that order.
#[derive(Debug, Clone, Default)]
pub struct BundleAssets {
    root: Option<PathBuf>,
}

impl BundleAssets {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Like [`AssetLoader::load`], but reports why the asset is unavailable.
    pub fn try_load(&self, name: &str, bundle: Option<&Path>, size: u32) -> IconResult<RgbaImage> {
        let dir = bundle
            .or(self.root())
            .unwrap_or_else(|| Path::new("."));

        let path = [
            dir.join(name),
            dir.join(format!("{name}.png")),
            dir.join(format!("{name}.svg")),
        ]
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| IconError::AssetNotFound {
            name: name.to_string(),
            root: dir.to_path_buf(),
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("svg") {
            let svg = std::fs::read_to_string(&path).map_err(|source| IconError::Io {
                path: path.clone(),
                source,
            })?;
            let tree = parse_svg(name, &svg, None)?;
            return render_tree_fit(&tree, size).ok_or_else(|| IconError::AssetNotFound {
                name: name.to_string(),
                root: dir.to_path_buf(),
            });
        }

        let image = image::open(&path)
            .map_err(|source| IconError::Decode {
                path: path.clone(),
                source,
            })?
            .to_rgba8();
        Ok(fit(&image, size))
    }
}

impl AssetLoader for BundleAssets {
    fn load(&self, name: &str, bundle: Option<&Path>, size: u32) -> Option<RgbaImage> {
        match self.try_load(name, bundle, size) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::debug!("omitting image content: {err}");
                None
            }
        }
    }
}

/// Scales `image` so that its larger side is `size`, keeping aspect ratio.
fn fit(image: &RgbaImage, size: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 || size == 0 {
        return RgbaImage::new(0, 0);
    }
    let scale = size as f32 / w.max(h) as f32;
    let width = ((w as f32 * scale).round() as u32).max(1);
    let height = ((h as f32 * scale).round() as u32).max(1);
    if (width, height) == (w, h) {
        return image.clone();
    }
    image::imageops::resize(image, width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn loads_png_from_bundle_and_fits() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 255]))
            .save(dir.path().join("swift.png"))
            .unwrap();

        let loader = BundleAssets::default();
        let image = loader.load("swift", Some(dir.path()), 10).unwrap();
        assert_eq!(image.dimensions(), (10, 5));
    }

    #[test]
    fn root_reports_default_directory() {
        let dir = PathBuf::from("assets");
        assert_eq!(BundleAssets::new(Some(dir.clone())).root(), Some(dir.as_path()));
        assert!(BundleAssets::default().root().is_none());
    }

    #[test]
    fn root_is_used_without_bundle() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dot.svg"),
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8" fill="#00ff00"/></svg>"##,
        )
        .unwrap();

        let loader = BundleAssets::new(Some(dir.path().to_path_buf()));
        let image = loader.load("dot", None, 16).unwrap();
        assert_eq!(image.dimensions(), (16, 16));
        assert_eq!(image.get_pixel(8, 8).0, [0, 255, 0, 255]);
    }

    #[test]
    fn missing_asset_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = BundleAssets::new(Some(dir.path().to_path_buf()));
        assert!(matches!(
            loader.try_load("nope", None, 16),
            Err(IconError::AssetNotFound { .. })
        ));
        assert!(loader.load("nope", None, 16).is_none());
    }

    #[test]
    fn corrupt_png_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not a png").unwrap();
        let loader = BundleAssets::new(Some(dir.path().to_path_buf()));
        assert!(matches!(
            loader.try_load("bad", None, 16),
            Err(IconError::Decode { .. })
        ));
    }
}
