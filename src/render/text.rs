//! Single-line text runs.
//!
//! Text is written out as an SVG `<text>` element and rasterized by resvg
//! against the renderer's font database. The run is anchored at its middle
//! both ways, so the em box ends up centered on the given point.

use image::RgbaImage;
use palette::Srgba;

use super::fonts::Fonts;
use super::svg::{escape_xml, parse_svg, render_tree};
use crate::color::to_hex;
use crate::descriptor::FontWeight;

/// A single centered line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub family: &'a str,
    /// Font size in device pixels.
    pub font_size: f32,
    pub weight: FontWeight,
    pub condensed: bool,
    pub color: Srgba,
}

impl TextRun<'_> {
    /// SVG markup for a `width x height` canvas with the run centered on
    /// `(center_x, center_y)`.
    pub fn to_svg(&self, width: u32, height: u32, center_x: f32, center_y: f32) -> String {
        let family = if self.family == "sans-serif" {
            self.family.to_string()
        } else {
            format!("'{}'", escape_xml(self.family))
        };
        let stretch = if self.condensed {
            r#" font-stretch="condensed""#
        } else {
            ""
        };

        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" font-weight="{weight}"{stretch} "#,
                r#"text-anchor="middle" dominant-baseline="central" fill="{fill}" fill-opacity="{opacity}">{text}</text>"#,
                "</svg>"
            ),
            w = width,
            h = height,
            x = center_x,
            y = center_y,
            family = family,
            size = self.font_size,
            weight = self.weight.to_number(),
            stretch = stretch,
            fill = to_hex(self.color),
            opacity = self.color.alpha,
            text = escape_xml(self.text),
        )
    }

    /// Rasterizes the run onto a transparent `width x height` layer.
    ///
    /// Returns `None` if the markup could not be parsed. Glyphs missing from
    /// the font database simply do not draw.
    pub fn render(
        &self,
        fonts: &Fonts,
        width: u32,
        height: u32,
        center_x: f32,
        center_y: f32,
    ) -> Option<RgbaImage> {
        if self.text.is_empty() || self.font_size <= 0.0 {
            return None;
        }
        let svg = self.to_svg(width, height, center_x, center_y);
        match parse_svg(self.text, &svg, Some(fonts.database())) {
            Ok(tree) => render_tree(&tree, width, height),
            Err(err) => {
                tracing::debug!("skipping text run: {err}");
                None
            }
        }
    }
}
