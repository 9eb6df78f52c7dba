use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{DoodleError, DoodleResult};

/// Environment variable naming a display font file.
pub const FONT_ENV_VAR: &str = "QUOTEDOODLE_FONT";

/// Where a resolved face came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// Explicit font file (configuration or environment).
    File(PathBuf),
    /// The preferred display family.
    Preferred,
    /// A generic fallback family (`cursive`, `serif`, `sans-serif`).
    Fallback(&'static str),
}

const CURSIVE_FAMILIES: [&str; 5] = [
    "Comic Sans MS",
    "Caveat",
    "Comic Neue",
    "URW Chancery L",
    "Z003",
];
const SERIF_FAMILIES: [&str; 5] = [
    "Times New Roman",
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
    "FreeSerif",
];
const SANS_SERIF_FAMILIES: [&str; 6] = [
    "Arial",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Helvetica",
];

/// Raw face bytes ready for layout and glyph rendering.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Whole font file; may be a collection.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside `bytes`.
    pub index: u32,
    /// Family name reported by the face.
    pub family: String,
    /// How the face was resolved.
    pub origin: FontOrigin,
}

impl LoadedFont {
    /// Parse a font file from memory, keeping its first face.
    pub fn from_bytes(bytes: Vec<u8>, origin: FontOrigin) -> DoodleResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        let face = db
            .faces()
            .next()
            .ok_or_else(|| DoodleError::font("no usable face in font data"))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| face.post_script_name.clone());
        Ok(Self {
            bytes: Arc::new(bytes),
            index: face.index,
            family,
            origin,
        })
    }

    /// Read and parse a font file.
    pub fn from_file(path: &Path) -> DoodleResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| DoodleError::font(format!("read {}: {e}", path.display())))?;
        Self::from_bytes(bytes, FontOrigin::File(path.to_path_buf()))
    }

    pub(crate) fn to_cpu(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            self.index,
        )
    }
}

/// Resolves the display face for quote text.
///
/// Order: explicit file, `QUOTEDOODLE_FONT` file, the preferred family, then generic cursive, serif
/// and sans-serif faces. Every miss is logged and skipped.
#[derive(Clone, Debug)]
pub struct FontLoader {
    font_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
    preferred_family: String,
    search_dirs: Vec<PathBuf>,
    system_fonts: bool,
}

impl FontLoader {
    /// Loader preferring `family`, with system fonts and `./fonts`, `./assets` searched.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            font_file: None,
            env_file: None,
            preferred_family: family.into(),
            search_dirs: vec![PathBuf::from("fonts"), PathBuf::from("assets")],
            system_fonts: true,
        }
    }

    /// Try `path` before any family lookup.
    pub fn with_font_file(mut self, path: Option<PathBuf>) -> Self {
        self.font_file = path;
        self
    }

    /// Pick up `QUOTEDOODLE_FONT` from the process environment.
    pub fn with_env(mut self) -> Self {
        self.env_file = std::env::var_os(FONT_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self
    }

    /// Replace the directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Skip the system font database.
    pub fn without_system_fonts(mut self) -> Self {
        self.system_fonts = false;
        self
    }

    /// The preferred family name.
    pub fn preferred_family(&self) -> &str {
        &self.preferred_family
    }

    /// Resolve a face, or `None` when nothing at all is available.
    pub fn load(&self) -> Option<LoadedFont> {
        for path in [self.font_file.as_ref(), self.env_file.as_ref()]
            .into_iter()
            .flatten()
        {
            match LoadedFont::from_file(path) {
                Ok(font) => return Some(font),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "font file unusable"),
            }
        }

        let db = self.build_fontdb();
        let preferred = [usvg::fontdb::Family::Name(&self.preferred_family)];
        if let Some(font) = query_face(&db, &preferred, FontOrigin::Preferred) {
            return Some(font);
        }
        tracing::warn!(
            family = %self.preferred_family,
            "preferred font family unavailable, falling back"
        );

        let fallbacks = [
            (usvg::fontdb::Family::Cursive, "cursive"),
            (usvg::fontdb::Family::Serif, "serif"),
            (usvg::fontdb::Family::SansSerif, "sans-serif"),
        ];
        for (family, name) in fallbacks {
            if let Some(font) = query_face(&db, &[family], FontOrigin::Fallback(name)) {
                return Some(font);
            }
        }

        let id = fallback_text_face(&db)?;
        face_by_id(&db, id, FontOrigin::Fallback("any"))
    }

    fn build_fontdb(&self) -> usvg::fontdb::Database {
        let mut db = usvg::fontdb::Database::new();
        if self.system_fonts {
            db.load_system_fonts();
        }
        for dir in &self.search_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        point_generic_families(&mut db);
        db
    }
}

fn installed_families(db: &usvg::fontdb::Database) -> BTreeSet<String> {
    db.faces()
        .flat_map(|f| f.families.iter().map(|(name, _)| name.clone()))
        .collect()
}

fn first_installed<'a>(installed: &BTreeSet<String>, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| installed.contains(*name))
}

/// Map the generic families to installed faces; fontdb's defaults name fonts that are often absent.
fn point_generic_families(db: &mut usvg::fontdb::Database) {
    let installed = installed_families(db);
    if let Some(name) = first_installed(&installed, &CURSIVE_FAMILIES) {
        db.set_cursive_family(name);
    }
    if let Some(name) = first_installed(&installed, &SERIF_FAMILIES) {
        db.set_serif_family(name);
    }
    if let Some(name) = first_installed(&installed, &SANS_SERIF_FAMILIES) {
        db.set_sans_serif_family(name);
    }
}

/// Upright proportional face closest to bold, by family name on ties; any face when none is upright.
fn fallback_text_face(db: &usvg::fontdb::Database) -> Option<usvg::fontdb::ID> {
    let upright = db
        .faces()
        .filter(|f| f.style == usvg::fontdb::Style::Normal && !f.monospaced)
        .min_by_key(|f| {
            (
                f.weight.0.abs_diff(usvg::fontdb::Weight::BOLD.0),
                f.families.first().map(|(name, _)| name.clone()),
            )
        })
        .map(|f| f.id);
    upright.or_else(|| db.faces().next().map(|f| f.id))
}

fn query_face(
    db: &usvg::fontdb::Database,
    families: &[usvg::fontdb::Family<'_>],
    origin: FontOrigin,
) -> Option<LoadedFont> {
    let query = usvg::fontdb::Query {
        families,
        weight: usvg::fontdb::Weight::BOLD,
        ..Default::default()
    };
    let id = db.query(&query)?;
    face_by_id(db, id, origin)
}

fn face_by_id(
    db: &usvg::fontdb::Database,
    id: usvg::fontdb::ID,
    origin: FontOrigin,
) -> Option<LoadedFont> {
    let family = db
        .face(id)?
        .families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_default();
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    Some(LoadedFont {
        bytes: Arc::new(bytes),
        index,
        family,
        origin,
    })
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() || !is_font_file(&path) {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
