//! Font database and family selection.

use std::path::PathBuf;
use std::sync::Arc;

use resvg::usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight};

/// Families tried, in order, when no family is configured.
const PREFERRED_FAMILIES: &[&str] = &[
    "SF Pro",
    "SF Pro Text",
    "Helvetica Neue",
    "Segoe UI",
    "Inter",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
];

/// Configuration for building a [`Fonts`] database.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    /// Whether to load the fonts installed on the system.
    pub load_system_fonts: bool,
    /// Extra font files or directories to load.
    pub font_paths: Vec<PathBuf>,
    /// The sans-serif family to use. Picked automatically when `None`.
    pub family: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_paths: Vec::new(),
            family: None,
        }
    }
}

/// Loaded fonts plus the families the renderer draws text with.
#[derive(Clone)]
pub struct Fonts {
    db: Arc<Database>,
    family: Option<String>,
    condensed_family: Option<String>,
}

impl Fonts {
    pub fn new(config: &FontConfig) -> Self {
        let mut db = Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        for path in &config.font_paths {
            if path.is_dir() {
                db.load_fonts_dir(path);
            } else if let Err(err) = db.load_font_file(path) {
                tracing::warn!("failed to load font {}: {err}", path.display());
            }
        }

        let family = config
            .family
            .clone()
            .or_else(|| pick_family(&db));
        if let Some(family) = &family {
            db.set_sans_serif_family(family.as_str());
        }
        let condensed_family = family.as_deref().and_then(|f| find_condensed(&db, f));

        tracing::debug!(
            faces = db.len(),
            family = family.as_deref().unwrap_or("<none>"),
            condensed = condensed_family.as_deref().unwrap_or("<none>"),
            "font database ready"
        );

        Self {
            db: Arc::new(db),
            family,
            condensed_family,
        }
    }

    /// A database with no fonts; text content renders nothing.
    pub fn empty() -> Self {
        Self {
            db: Arc::new(Database::new()),
            family: None,
            condensed_family: None,
        }
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    /// Family name for regular text, as written into the SVG text run.
    pub fn family(&self) -> &str {
        self.family.as_deref().unwrap_or("sans-serif")
    }

    /// Family providing a condensed face, if one is installed.
    pub fn condensed_family(&self) -> Option<&str> {
        self.condensed_family.as_deref()
    }

    pub fn has_condensed(&self) -> bool {
        self.condensed_family.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl Default for Fonts {
    fn default() -> Self {
        Self::new(&FontConfig::default())
    }
}

impl std::fmt::Debug for Fonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonts")
            .field("faces", &self.db.len())
            .field("family", &self.family)
            .field("condensed_family", &self.condensed_family)
            .finish()
    }
}

fn has_family(db: &Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

fn pick_family(db: &Database) -> Option<String> {
    PREFERRED_FAMILIES
        .iter()
        .find(|name| has_family(db, name))
        .map(|name| name.to_string())
        .or_else(|| {
            db.faces()
                .next()
                .and_then(|face| face.families.first())
                .map(|(family, _)| family.clone())
        })
}

fn find_condensed(db: &Database, family: &str) -> Option<String> {
    let query = Query {
        families: &[Family::Name(family), Family::SansSerif],
        weight: Weight::MEDIUM,
        stretch: Stretch::Condensed,
        style: Style::Normal,
    };
    let face = db.face(db.query(&query)?)?;
    let condensed = matches!(
        face.stretch,
        Stretch::UltraCondensed | Stretch::ExtraCondensed | Stretch::Condensed | Stretch::SemiCondensed
    );
    if !condensed {
        return None;
    }
    face.families.first().map(|(name, _)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_has_no_condensed_face() {
        let fonts = Fonts::new(&FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        });
        assert!(fonts.is_empty());
        assert!(!fonts.has_condensed());
        assert_eq!(fonts.family(), "sans-serif");
    }

    #[test]
    fn explicit_family_is_kept() {
        let fonts = Fonts::new(&FontConfig {
            load_system_fonts: false,
            family: Some("Inter".into()),
            ..FontConfig::default()
        });
        assert_eq!(fonts.family(), "Inter");
    }

    #[test]
    fn missing_font_file_is_skipped() {
        let fonts = Fonts::new(&FontConfig {
            load_system_fonts: false,
            font_paths: vec![PathBuf::from("/nonexistent/font.ttf")],
            family: None,
        });
        assert!(fonts.is_empty());
    }
}
