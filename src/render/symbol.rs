//! Named monochrome symbols.
//!
//! A [`SymbolProvider`] turns a symbol name into SVG markup. The renderer
//! recolors the markup with the icon's foreground color, so symbols should be
//! drawn in a single color. [`SymbolLibrary`] ships a few built-in glyphs and
//! accepts more at runtime.

use std::collections::HashMap;
use std::path::Path;

use crate::descriptor::FontWeight;
use crate::error::{IconError, IconResult};

/// Resolves symbol names to SVG markup.
pub trait SymbolProvider: Send + Sync {
    /// Returns the markup for `name` drawn at `weight`, or `None` if unknown.
    fn symbol(&self, name: &str, weight: FontWeight) -> Option<String>;
}

/// Placeholder substituted with a weight-dependent stroke width.
const STROKE: &str = "{stroke}";

const LIST_BULLET: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><g fill="#000000"><circle cx="5" cy="6" r="1.7"/><circle cx="5" cy="12" r="1.7"/><circle cx="5" cy="18" r="1.7"/></g><path d="M9.5 6H20M9.5 12H20M9.5 18H20" fill="none" stroke="#000000" stroke-width="{stroke}" stroke-linecap="round"/></svg>"##;

const PUZZLEPIECE_FILL: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path d="M4 8H8A2.5 2.5 0 1 1 13 8H17V12A2.5 2.5 0 1 1 17 17V21H4Z" fill="#000000" stroke="#000000" stroke-width="{stroke}" stroke-linejoin="round"/></svg>"##;

const RECTANGLE_CONNECTED_TO_LINE_BELOW: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><rect x="5" y="3" width="14" height="9" rx="2" fill="none" stroke="#000000" stroke-width="{stroke}"/><path d="M12 12V17M3.5 20H20.5" fill="none" stroke="#000000" stroke-width="{stroke}" stroke-linecap="round"/></svg>"##;

/// Stroke width in a 24-unit view box for each weight.
fn stroke_width(weight: FontWeight) -> f32 {
    match weight {
        FontWeight::Light => 1.25,
        FontWeight::Regular => 1.5,
        FontWeight::Medium => 1.75,
        FontWeight::Semibold => 2.0,
    }
}

/// A name → SVG map of symbols.
///
/// Markup containing `{stroke}` gets the stroke width for the requested
/// weight substituted in; other markup is returned as is.
#[derive(Debug, Clone)]
pub struct SymbolLibrary {
    symbols: HashMap<String, String>,
}

impl SymbolLibrary {
    /// A library holding the built-in symbols.
    pub fn new() -> Self {
        let mut library = Self::empty();
        library.insert("list.bullet", LIST_BULLET);
        library.insert("puzzlepiece.fill", PUZZLEPIECE_FILL);
        library.insert("rectangle.connected.to.line.below", RECTANGLE_CONNECTED_TO_LINE_BELOW);
        library
    }

    pub fn empty() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// Registers or replaces a symbol.
    pub fn insert(&mut self, name: impl Into<String>, svg: impl Into<String>) {
        self.symbols.insert(name.into(), svg.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Loads every `*.svg` file in `dir`, named after the file stem.
    ///
    /// Returns the number of symbols loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> IconResult<usize> {
        let dir = dir.as_ref();
        let io_err = |source| IconError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut loaded = 0;
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("svg") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let svg = std::fs::read_to_string(&path).map_err(|source| IconError::Io {
                path: path.clone(),
                source,
            })?;
            self.insert(name, svg);
            loaded += 1;
        }

        tracing::debug!("loaded {loaded} symbols from {}", dir.display());
        Ok(loaded)
    }
}

impl Default for SymbolLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolProvider for SymbolLibrary {
    fn symbol(&self, name: &str, weight: FontWeight) -> Option<String> {
        let svg = self.symbols.get(name)?;
        if svg.contains(STROKE) {
            Some(svg.replace(STROKE, &format!("{:.2}", stroke_width(weight))))
        } else {
            Some(svg.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::svg::render_svg;

    #[test]
    fn builtin_symbols_resolve_and_render() {
        let library = SymbolLibrary::new();
        for name in [
            "list.bullet",
            "puzzlepiece.fill",
            "rectangle.connected.to.line.below",
        ] {
            let svg = library.symbol(name, FontWeight::Regular).unwrap();
            assert!(!svg.contains(STROKE));
            let img = render_svg(&svg, 24).unwrap();
            assert!(img.pixels().any(|p| p[3] > 0), "{name} drew nothing");
        }
    }

    #[test]
    fn weight_changes_stroke() {
        let library = SymbolLibrary::new();
        let regular = library.symbol("list.bullet", FontWeight::Regular).unwrap();
        let semibold = library.symbol("list.bullet", FontWeight::Semibold).unwrap();
        assert!(regular.contains(r#"stroke-width="1.50""#));
        assert!(semibold.contains(r#"stroke-width="2.00""#));
    }

    #[test]
    fn unknown_symbol_is_none() {
        assert!(SymbolLibrary::new().symbol("no.such.symbol", FontWeight::Regular).is_none());
        assert!(SymbolLibrary::empty().is_empty());
    }

    #[test]
    fn load_dir_reads_svg_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dot.svg"), "<svg/>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut library = SymbolLibrary::empty();
        assert_eq!(library.load_dir(dir.path()).unwrap(), 1);
        assert_eq!(library.symbol("dot", FontWeight::Light).as_deref(), Some("<svg/>"));
    }

    #[test]
    fn load_dir_missing_directory_errors() {
        let mut library = SymbolLibrary::empty();
        assert!(library.load_dir("/nonexistent/symbols").is_err());
    }
}
