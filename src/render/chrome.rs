//! Badge background chrome.
//!
//! Geometry is expressed in points and mapped to device pixels by the
//! transform passed to tiny-skia.

use palette::Srgba;
use resvg::tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::color::to_skia;
use crate::descriptor::{IconDescriptor, IconStyle};

/// Width of the border ring, in points.
pub const BORDER_WIDTH: f32 = 1.0;
/// Width of the hairline outline, in points.
pub const OUTLINE_WIDTH: f32 = 1.0;

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Draws the background for `icon`'s style.
pub fn draw(pixmap: &mut Pixmap, icon: &IconDescriptor, scale: f32) {
    let transform = Transform::from_scale(scale, scale);
    let size = icon.size;
    let appearance = icon.appearance;
    let outer_radius = icon.outer_radius();
    let border_radius = outer_radius - BORDER_WIDTH;
    let outline_radius = outer_radius - (BORDER_WIDTH + OUTLINE_WIDTH);

    match icon.style {
        IconStyle::Default => {
            fill(pixmap, 0.0, size, outer_radius, icon.color.outline_color().resolve(appearance), transform);
            fill(
                pixmap,
                BORDER_WIDTH,
                size,
                border_radius,
                icon.color.border_color().resolve(appearance),
                transform,
            );
            fill(
                pixmap,
                BORDER_WIDTH + OUTLINE_WIDTH,
                size,
                outline_radius,
                icon.color.background_color().resolve(appearance),
                transform,
            );
        }
        IconStyle::Outline => {
            let line_width = outline_line_width(scale);
            let inset = BORDER_WIDTH + line_width / 2.0;
            let Some(path) = inset_rect(size, inset, border_radius) else {
                return;
            };
            let paint = paint(icon.color.border_color().resolve(appearance));
            let stroke = Stroke {
                width: line_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
        IconStyle::Simple => {
            fill(pixmap, BORDER_WIDTH, size, border_radius * 1.5, icon.color.simple_color(), transform);
        }
        IconStyle::SimpleHighlighted => {
            let white = Srgba::new(1.0, 1.0, 1.0, 1.0);
            fill(pixmap, BORDER_WIDTH, size, border_radius * 1.5, white, transform);
        }
    }
}

/// Stroke width in points for the outline style; one device pixel on
/// high-density displays, one point otherwise.
pub fn outline_line_width(scale: f32) -> f32 {
    if scale >= 2.0 { 1.0 / scale } else { 1.0 }
}

fn paint(color: Srgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn fill(pixmap: &mut Pixmap, inset: f32, size: f32, radius: f32, color: Srgba, transform: Transform) {
    if let Some(path) = inset_rect(size, inset, radius) {
        pixmap.fill_path(&path, &paint(color), FillRule::Winding, transform, None);
    }
}

fn inset_rect(size: f32, inset: f32, radius: f32) -> Option<Path> {
    let extent = size - inset * 2.0;
    rounded_rect(inset, inset, extent, extent, radius)
}

/// Builds a rounded rectangle path. Radii are clamped to `[0, min(w, h) / 2]`.
pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let rect = Rect::from_xywh(x, y, w, h)?;
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_width_tracks_scale() {
        assert_eq!(outline_line_width(1.0), 1.0);
        assert_eq!(outline_line_width(1.5), 1.0);
        assert_eq!(outline_line_width(2.0), 0.5);
        assert_eq!(outline_line_width(3.0), 1.0 / 3.0);
    }

    #[test]
    fn outline_is_one_device_pixel_column() {
        let icon = IconDescriptor::text("C").with_style(IconStyle::Outline);
        let border = crate::color::to_rgba8(icon.color.border_color().resolve(icon.appearance));

        for scale in [1u32, 2, 3] {
            let px = 16 * scale;
            let mut pixmap = Pixmap::new(px, px).unwrap();
            draw(&mut pixmap, &icon, scale as f32);

            let alpha = |x: u32| pixmap.pixel(x, px / 2).unwrap().alpha();
            assert!(alpha(scale) >= 250, "@{scale}x");
            assert!(alpha(scale - 1) <= 8, "@{scale}x");
            assert!(alpha(scale + 1) <= 8, "@{scale}x");
            assert_eq!(alpha(px / 2), 0, "@{scale}x interior");

            let line = pixmap.pixel(scale, px / 2).unwrap().demultiply();
            let close = |a: u8, b: u8| a.abs_diff(b) <= 3;
            assert!(close(line.red(), border.0), "@{scale}x");
            assert!(close(line.green(), border.1), "@{scale}x");
            assert!(close(line.blue(), border.2), "@{scale}x");
        }
    }

    #[test]
    fn rounded_rect_bounds() {
        let path = rounded_rect(1.0, 1.0, 14.0, 14.0, 2.0).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 1.0);
        assert_eq!(bounds.top(), 1.0);
        assert_eq!(bounds.right(), 15.0);
        assert_eq!(bounds.bottom(), 15.0);
    }

    #[test]
    fn degenerate_rects() {
        assert!(rounded_rect(0.0, 0.0, 0.0, 0.0, 1.0).is_none());
        assert!(rounded_rect(0.0, 0.0, 4.0, 4.0, -2.0).is_some());
    }
}
