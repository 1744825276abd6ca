//! SVG rasterization and bitmap compositing.
//!
//! Symbols, SVG assets and text runs are all rasterized through resvg. The
//! resulting layers are combined on straight-alpha `RgbaImage`s with the
//! blend operations the renderer needs: source-over, destination-out (erase)
//! and a blurred drop shadow.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use crate::error::{IconError, IconResult};

// ============================================================================
// SVG Rendering
// ============================================================================

/// Parses SVG markup, resolving any text against `fonts`.
pub fn parse_svg(name: &str, svg_data: &str, fonts: Option<Arc<fontdb::Database>>) -> IconResult<Tree> {
    let mut opts = Options::default();
    if let Some(db) = fonts {
        opts.fontdb = db;
    }
    Tree::from_str(svg_data, &opts).map_err(|source| IconError::Svg {
        name: name.to_string(),
        source,
    })
}

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The SVG is scaled to fit within `size x size` pixels while preserving
/// aspect ratio (the larger dimension will be `size`).
///
/// Returns `None` if the SVG cannot be parsed or rendered.
pub fn render_svg(svg_data: &str, size: u32) -> Option<RgbaImage> {
    render_svg_with_color(svg_data, size, None)
}

/// Renders an SVG string to an RGBA image, optionally replacing all colors.
///
/// If `fill_color` is provided, all fills and strokes in the SVG are replaced
/// with this color. This is how monochrome symbols get tinted.
pub fn render_svg_with_color(
    svg_data: &str,
    size: u32,
    fill_color: Option<(u8, u8, u8, u8)>,
) -> Option<RgbaImage> {
    if size == 0 {
        return None;
    }

    let svg_data = match fill_color {
        Some((r, g, b, a)) => replace_svg_colors(svg_data, r, g, b, a),
        None => svg_data.to_string(),
    };

    match parse_svg("inline", &svg_data, None) {
        Ok(tree) => render_tree_fit(&tree, size),
        Err(err) => {
            tracing::debug!("skipping svg: {err}");
            None
        }
    }
}

/// Renders a parsed tree scaled to fit within `size x size` pixels.
pub fn render_tree_fit(tree: &Tree, size: u32) -> Option<RgbaImage> {
    if size == 0 {
        return None;
    }

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Renders a parsed tree onto a fresh `width x height` canvas without scaling.
pub fn render_tree(tree: &Tree, width: u32, height: u32) -> Option<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(tree, Transform::identity(), &mut pixmap.as_mut());
    Some(pixmap_to_rgba_image(&pixmap))
}

/// Replaces fill and stroke colors in SVG markup with the given color.
///
/// `none` and `transparent` values are preserved. A translucent color also
/// sets the matching `*-opacity` attribute.
fn replace_svg_colors(svg_data: &str, r: u8, g: u8, b: u8, a: u8) -> String {
    let hex_color = format!("#{:02x}{:02x}{:02x}", r, g, b);

    let mut result = replace_color_attr(svg_data, "fill", &hex_color);
    result = replace_color_attr(&result, "stroke", &hex_color);

    if a < 255 {
        let opacity = format!("{:.3}", a as f32 / 255.0);
        result = result.replacen(
            "<svg ",
            &format!("<svg fill-opacity=\"{opacity}\" stroke-opacity=\"{opacity}\" "),
            1,
        );
    }

    result
}

/// Replaces a color attribute value, preserving "none" values.
fn replace_color_attr(svg: &str, attr: &str, new_color: &str) -> String {
    let mut result = String::with_capacity(svg.len());
    let pattern = format!(" {}=\"", attr);
    let mut remaining = svg;

    while let Some(start) = remaining.find(&pattern) {
        result.push_str(&remaining[..start + pattern.len()]);
        remaining = &remaining[start + pattern.len()..];

        if let Some(end) = remaining.find('"') {
            let value = &remaining[..end];
            if value == "none" || value == "transparent" {
                result.push_str(value);
            } else {
                result.push_str(new_color);
            }
            remaining = &remaining[end..];
        }
    }

    result.push_str(remaining);
    result
}

/// Escapes text for use inside SVG character data.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
        let blended = alpha_blend(*src_pixel, *dst_pixel);
        dest.put_pixel(dx as u32, dy as u32, blended);
    }
}

/// Erases the destination wherever the source is opaque (destination-out).
///
/// Both images must have the same dimensions; extra source pixels are ignored.
pub fn composite_erase(dest: &mut RgbaImage, src: &RgbaImage) {
    for (x, y, pixel) in dest.enumerate_pixels_mut() {
        if x >= src.width() || y >= src.height() {
            continue;
        }
        let coverage = src.get_pixel(x, y)[3] as f32 / 255.0;
        if coverage == 0.0 {
            continue;
        }
        let alpha = (pixel[3] as f32 * (1.0 - coverage)).round() as u8;
        *pixel = if alpha == 0 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([pixel[0], pixel[1], pixel[2], alpha])
        };
    }
}

/// Builds a black, blurred copy of a layer's silhouette.
///
/// `sigma` is the gaussian standard deviation in pixels.
pub fn drop_shadow(layer: &RgbaImage, opacity: f32, sigma: f32) -> RgbaImage {
    let silhouette = RgbaImage::from_fn(layer.width(), layer.height(), |x, y| {
        let a = layer.get_pixel(x, y)[3] as f32 * opacity;
        Rgba([0, 0, 0, a.round().clamp(0.0, 255.0) as u8])
    });

    if sigma <= 0.0 {
        return silhouette;
    }
    image::imageops::blur(&silhouette, sigma)
}

fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><circle cx="50" cy="50" r="40" fill="#ff0000"/></svg>"##;

    #[test]
    fn render_simple_svg() {
        let img = render_svg(SIMPLE_SVG, 50).unwrap();
        assert!(img.width() <= 50);
        assert!(img.height() <= 50);
    }

    #[test]
    fn render_svg_with_color_replacement() {
        let img = render_svg_with_color(SIMPLE_SVG, 50, Some((0, 255, 0, 255))).unwrap();
        let center = img.get_pixel(img.width() / 2, img.height() / 2);
        assert!(center[1] > center[0], "Green should dominate after color replacement");
    }

    #[test]
    fn invalid_svg_is_none() {
        assert!(render_svg("not svg", 16).is_none());
        assert!(render_svg(SIMPLE_SVG, 0).is_none());
    }

    #[test]
    fn replace_color_preserves_none() {
        let svg = r##"<circle fill="none" stroke="#000000"/>"##;
        let result = replace_svg_colors(svg, 255, 0, 0, 255);
        assert!(result.contains(r#"fill="none""#));
        assert!(result.contains(r##"stroke="#ff0000""##));
    }

    #[test]
    fn replace_color_ignores_prefixed_attributes() {
        let svg = r##"<path stroke-width="2" stroke="#000000"/>"##;
        let result = replace_svg_colors(svg, 0, 0, 255, 255);
        assert!(result.contains(r#"stroke-width="2""#));
        assert!(result.contains(r##"stroke="#0000ff""##));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("<&>"), "&lt;&amp;&gt;");
        assert_eq!(escape_xml("{}"), "{}");
    }

    #[test]
    fn composite_simple() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, 3, 3);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_with_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

        composite_over(&mut dest, &src, 0, 0);

        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
    }

    #[test]
    fn erase_cuts_holes() {
        let mut dest = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let mut src = RgbaImage::new(4, 4);
        src.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
        src.put_pixel(2, 2, Rgba([0, 0, 0, 128]));

        composite_erase(&mut dest, &src);

        assert_eq!(dest.get_pixel(1, 1).0, [0, 0, 0, 0]);
        assert_eq!(dest.get_pixel(2, 2)[3], 127);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn shadow_spreads_beyond_silhouette() {
        let mut layer = RgbaImage::new(9, 9);
        layer.put_pixel(4, 4, Rgba([255, 255, 255, 255]));

        let shadow = drop_shadow(&layer, 1.0, 1.0);

        assert_eq!(shadow.get_pixel(4, 4)[0], 0, "shadow is black");
        assert!(shadow.get_pixel(5, 4)[3] > 0);
        assert_eq!(shadow.get_pixel(0, 0)[3], 0);
    }
}
