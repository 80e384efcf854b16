//! Font name resolution: maps a requested font name to a TrueType file.

use crate::error::{CanvasError, CanvasResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// TrueType file extension recognized as a direct font path.
const TRUETYPE_EXTENSION: &str = "ttf";

/// Whether `font` already names a TrueType file rather than a font name.
pub fn is_truetype_path(font: &str) -> bool {
    Path::new(font)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRUETYPE_EXTENSION))
}

/// Resolves short font names to TrueType font files.
///
/// Names come from three places, checked in this order:
/// 1. explicit `(name, path)` registrations,
/// 2. family and PostScript names of faces indexed with `fontdb`
///    (font directories and, optionally, the system fonts),
/// 3. file stems of `.ttf` files in the registered font directories.
#[derive(Clone, Debug, Default)]
pub struct FontRepository {
    fonts: HashMap<String, PathBuf>,
    indexed: HashMap<String, PathBuf>,
    font_dirs: Vec<PathBuf>,
}

impl FontRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font file under a name. Later registrations replace earlier ones.
    pub fn with_font(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.fonts.insert(name.into(), path.into());
        self
    }

    /// Add a directory to search for font files.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut db = fontdb::Database::new();
        db.load_fonts_dir(&dir);
        self.index_faces(&db);
        self.font_dirs.push(dir);
        self
    }

    /// Index the TrueType files among the operating system's fonts.
    pub fn with_system_fonts(mut self) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        self.index_faces(&db);
        self
    }

    fn index_faces(&mut self, db: &fontdb::Database) {
        for face in db.faces() {
            let path = match &face.source {
                fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => path,
                fontdb::Source::Binary(_) => continue,
            };
            if !path.to_str().is_some_and(is_truetype_path) {
                continue;
            }
            for (family, _lang) in &face.families {
                self.indexed
                    .entry(family.clone())
                    .or_insert_with(|| path.clone());
            }
            if !face.post_script_name.is_empty() {
                self.indexed
                    .entry(face.post_script_name.clone())
                    .or_insert_with(|| path.clone());
            }
        }
        log::debug!(target: "canvas", "font repository indexed {} names", self.indexed.len());
    }

    /// All names that resolve without a directory scan.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts
            .keys()
            .chain(self.indexed.keys())
            .map(String::as_str)
    }

    /// Resolve a font name to a font file path.
    pub fn font_file(&self, name: &str) -> CanvasResult<PathBuf> {
        if let Some(path) = lookup(&self.fonts, name).or_else(|| lookup(&self.indexed, name)) {
            return Ok(path.clone());
        }
        self.find_in_dirs(name)
            .ok_or_else(|| CanvasError::UnknownFont(name.to_string()))
    }

    fn find_in_dirs(&self, name: &str) -> Option<PathBuf> {
        for dir in &self.font_dirs {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!(target: "canvas", "cannot read font dir {}: {}", dir.display(), err);
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let matches = path.to_str().is_some_and(is_truetype_path)
                    && path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .is_some_and(|stem| stem.eq_ignore_ascii_case(name));
                if matches {
                    return Some(path);
                }
            }
        }
        None
    }
}

/// Exact match first, then a case-insensitive one.
fn lookup<'a>(map: &'a HashMap<String, PathBuf>, name: &str) -> Option<&'a PathBuf> {
    map.get(name).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, path)| path)
    })
}
