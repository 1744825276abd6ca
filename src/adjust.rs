//! Hand-tuned per-glyph corrections.
//!
//! Glyph and symbol optical centers rarely line up with the geometric center
//! of a 16 pt badge, and font metrics do not scale linearly with point size.
//! These tables hold the empirical nudges, keyed by exact text or symbol name.
//! Anything not listed gets the neutral default.

use crate::descriptor::{FontWeight, IconContent, IconSize, IconStyle};

type Table = &'static [(&'static str, f32)];

const TEXT_FONT_SIZE: Table = &[("@", 1.0), ("{}", -1.0), ("⨍", 0.0), ("•", 2.5)];

const SYMBOL_FONT_SIZE: Table = &[
    ("puzzlepiece.fill", -1.0),
    ("rectangle.connected.to.line.below", -0.1),
];

const TEXT_Y_OFFSET_REGULAR: Table = &[("@", 1.0), ("#", 0.0), ("{}", 0.0), ("⨍", 1.0), ("•", 1.0)];

const TEXT_Y_OFFSET_LARGE: Table = &[("@", 3.0), ("#", 0.0), ("•", 3.0), ("{}", 2.0), ("⨍", 3.5)];

const SYMBOL_Y_OFFSET: Table = &[
    ("list.bullet", 1.0),
    ("rectangle.connected.to.line.below", -0.3),
];

fn lookup(table: Table, key: &str) -> f32 {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

/// Text weight: a couple of glyphs override the style default.
pub fn font_weight(content: &IconContent, style: IconStyle) -> FontWeight {
    match content.as_text() {
        Some("#") => FontWeight::Light,
        Some("Ti") => FontWeight::Regular,
        _ => style_font_weight(style),
    }
}

/// Default text weight for a style.
pub fn style_font_weight(style: IconStyle) -> FontWeight {
    if style.is_simple() {
        FontWeight::Semibold
    } else {
        FontWeight::Medium
    }
}

/// Symbol weight for a style.
pub fn symbol_weight(style: IconStyle) -> FontWeight {
    match style {
        IconStyle::Simple => FontWeight::Semibold,
        _ => FontWeight::Regular,
    }
}

/// Points added to the base font size.
pub fn font_size_delta(content: &IconContent) -> f32 {
    match content {
        IconContent::Text(text) => lookup(TEXT_FONT_SIZE, text),
        IconContent::SystemImage(name) => lookup(SYMBOL_FONT_SIZE, name),
        IconContent::Image { .. } => 0.0,
    }
}

/// Vertical nudge in points; positive raises the glyph.
///
/// Text uses one table up to [`IconSize::REGULAR`] and another above it.
pub fn y_offset_delta(content: &IconContent, size: f32) -> f32 {
    match content {
        IconContent::Text(text) if size <= IconSize::REGULAR => lookup(TEXT_Y_OFFSET_REGULAR, text),
        IconContent::Text(text) => lookup(TEXT_Y_OFFSET_LARGE, text),
        IconContent::SystemImage(name) => lookup(SYMBOL_Y_OFFSET, name),
        IconContent::Image { .. } => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> IconContent {
        IconContent::Text(s.into())
    }

    fn symbol(s: &str) -> IconContent {
        IconContent::SystemImage(s.into())
    }

    #[test]
    fn weight_overrides() {
        assert_eq!(font_weight(&text("#"), IconStyle::Default), FontWeight::Light);
        assert_eq!(font_weight(&text("#"), IconStyle::Simple), FontWeight::Light);
        assert_eq!(font_weight(&text("Ti"), IconStyle::Simple), FontWeight::Regular);
    }

    #[test]
    fn weight_falls_back_to_style_default() {
        assert_eq!(font_weight(&text("C"), IconStyle::Default), FontWeight::Medium);
        assert_eq!(font_weight(&text("C"), IconStyle::Outline), FontWeight::Medium);
        assert_eq!(font_weight(&text("C"), IconStyle::Simple), FontWeight::Semibold);
        assert_eq!(
            font_weight(&text("C"), IconStyle::SimpleHighlighted),
            FontWeight::Semibold
        );
        assert_eq!(
            font_weight(&symbol("#"), IconStyle::Default),
            FontWeight::Medium,
            "overrides apply to text only"
        );
    }

    #[test]
    fn symbol_weights() {
        assert_eq!(symbol_weight(IconStyle::Simple), FontWeight::Semibold);
        assert_eq!(symbol_weight(IconStyle::SimpleHighlighted), FontWeight::Regular);
        assert_eq!(symbol_weight(IconStyle::Default), FontWeight::Regular);
    }

    #[test]
    fn font_size_entries() {
        assert_eq!(font_size_delta(&text("@")), 1.0);
        assert_eq!(font_size_delta(&text("{}")), -1.0);
        assert_eq!(font_size_delta(&text("•")), 2.5);
        assert_eq!(font_size_delta(&symbol("puzzlepiece.fill")), -1.0);
        assert_eq!(font_size_delta(&symbol("rectangle.connected.to.line.below")), -0.1);
    }

    #[test]
    fn y_offset_tiers() {
        assert_eq!(y_offset_delta(&text("@"), 16.0), 1.0);
        assert_eq!(y_offset_delta(&text("@"), 17.0), 3.0);
        assert_eq!(y_offset_delta(&text("{}"), 16.0), 0.0);
        assert_eq!(y_offset_delta(&text("{}"), 32.0), 2.0);
        assert_eq!(y_offset_delta(&text("⨍"), 32.0), 3.5);
        assert_eq!(y_offset_delta(&symbol("list.bullet"), 16.0), 1.0);
        assert_eq!(y_offset_delta(&symbol("list.bullet"), 32.0), 1.0);
    }

    #[test]
    fn unmatched_content_is_neutral() {
        let image = IconContent::Image {
            name: "@".into(),
            bundle: None,
        };
        for content in [text("Zz"), symbol("@"), symbol("nonexistent"), image] {
            assert_eq!(font_size_delta(&content), 0.0);
            assert_eq!(y_offset_delta(&content, 16.0), 0.0);
            assert_eq!(y_offset_delta(&content, 48.0), 0.0);
        }
        // Text keys are not symbol keys.
        assert_eq!(font_size_delta(&text("puzzlepiece.fill")), 0.0);
    }
}
