//! Drawing canvas with named colors, named positions and a pen.

mod drawing;
mod factory;
mod image_ops;
mod text_rendering;

use crate::color::{Color, ColorHandle, MAX_ALPHA};
use crate::error::{CanvasError, CanvasResult};
use crate::font_repository::{is_truetype_path, FontRepository};
use crate::geometry::{Delta, Point, Position};
use crate::pen::{LoadedFont, Pen};
use cosmic_text::{FontSystem, SwashCache};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Name under which the origin is recorded.
pub const ORIGIN: &str = "origin";

/// Name under which the pen position is recorded after each move.
pub const LAST_POSITION: &str = "last";

/// Maximum canvas dimension.
const MAX_DIMENSION: u32 = 32767;

/// Maximum number of colors a palette canvas can allocate.
const PALETTE_MAX_COLORS: usize = 256;

/// Builder for Canvas.
pub struct CanvasBuilder {
    width: u32,
    height: u32,
    true_color: bool,
    font_repository: FontRepository,
}

impl CanvasBuilder {
    /// Create a new builder for a true-color canvas with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            true_color: true,
            font_repository: FontRepository::default(),
        }
    }

    /// Choose between a true-color canvas and a 256-color palette canvas.
    pub fn true_color(mut self, true_color: bool) -> Self {
        self.true_color = true_color;
        self
    }

    /// Set the repository used to resolve font names.
    pub fn font_repository(mut self, repository: FontRepository) -> Self {
        self.font_repository = repository;
        self
    }

    /// Build the Canvas.
    pub fn build(self) -> CanvasResult<Canvas> {
        Canvas::new_internal(
            self.width,
            self.height,
            self.true_color,
            self.font_repository,
        )
    }
}

/// A drawing session over one raster surface.
///
/// The surface is released when the canvas is dropped.
pub struct Canvas {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// True-color (alpha, anti-aliasing) or palette canvas.
    pub(crate) true_color: bool,
    /// Pixel buffer.
    pub(crate) pixmap: Pixmap,
    /// Font system for text rendering.
    pub(crate) font_system: FontSystem,
    /// Swash cache for glyph outlines.
    pub(crate) swash_cache: SwashCache,
    /// Current drawing state.
    pub(crate) pen: Pen,
    /// Whether drawing composites over existing pixels or replaces them.
    pub(crate) alpha_blending: bool,
    /// Whether PNG output keeps the alpha channel.
    pub(crate) save_alpha: bool,
    colors: HashMap<String, ColorHandle>,
    positions: HashMap<String, Point>,
    font_repository: FontRepository,
    loaded_fonts: HashMap<PathBuf, LoadedFont>,
    /// Colors allocated so far on a palette canvas.
    palette: Vec<ColorHandle>,
}

impl Canvas {
    /// Create a new Canvas with the specified dimensions.
    ///
    /// A true-color canvas starts opaque black; a palette canvas starts
    /// transparent and takes its first allocated color as background. Both
    /// save their alpha channel to PNG until told otherwise.
    pub fn new(width: u32, height: u32, true_color: bool) -> CanvasResult<Self> {
        Self::new_internal(width, height, true_color, FontRepository::default())
    }

    /// Create a new builder for more configuration options.
    pub fn builder(width: u32, height: u32) -> CanvasBuilder {
        CanvasBuilder::new(width, height)
    }

    fn new_internal(
        width: u32,
        height: u32,
        true_color: bool,
        font_repository: FontRepository,
    ) -> CanvasResult<Self> {
        // Validate dimensions
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        if true_color {
            pixmap.fill(tiny_skia::Color::BLACK);
        }

        // Fonts are added one file at a time by set_font
        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), fontdb::Database::new());

        log::debug!(target: "canvas", "create {}x{} true_color={}", width, height, true_color);

        let mut canvas = Self {
            width,
            height,
            true_color,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            pen: Pen::default(),
            alpha_blending: true_color,
            save_alpha: true,
            colors: HashMap::new(),
            positions: HashMap::new(),
            font_repository,
            loaded_fonts: HashMap::new(),
            palette: Vec::new(),
        };
        canvas.set_origin(Point::new(0, 0));
        Ok(canvas)
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_true_color(&self) -> bool {
        self.true_color
    }

    /// The current drawing state.
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    // --- Positions ---

    /// Move the pen to `origin` and record it under [`ORIGIN`].
    pub fn set_origin(&mut self, origin: Point) {
        log::debug!(target: "canvas", "setOrigin {:?}", origin);
        self.pen.position = origin;
        self.create_position(ORIGIN, origin);
    }

    /// Translate the pen and record the result under [`LAST_POSITION`].
    pub fn move_by(&mut self, delta: Delta) {
        log::debug!(target: "canvas", "move {:?}", delta);
        self.pen.position.move_by(delta);
        self.create_position(LAST_POSITION, self.pen.position);
    }

    /// Move the pen to a resolved position and record it under [`LAST_POSITION`].
    pub fn move_to(&mut self, position: impl Into<Position>) -> CanvasResult<()> {
        let point = self.to_point(position)?;
        log::debug!(target: "canvas", "moveTo {:?}", point);
        self.pen.position = point;
        self.create_position(LAST_POSITION, point);
        Ok(())
    }

    /// Resolve a point-like value.
    ///
    /// Points pass through, names are looked up among the named positions and
    /// coordinate lists must hold exactly two values.
    pub fn to_point(&self, position: impl Into<Position>) -> CanvasResult<Point> {
        match position.into() {
            Position::Point(point) => Ok(point),
            Position::Named(name) => self.position(&name),
            Position::Coords(coords) => match coords.as_slice() {
                [x, y] => Ok(Point::new(*x, *y)),
                other => Err(CanvasError::UnrecognizedPosition(format!("{other:?}"))),
            },
        }
    }

    /// Record a named position. An existing name is replaced.
    pub fn create_position(&mut self, name: impl Into<String>, point: Point) {
        self.positions.insert(name.into(), point);
    }

    /// Look up a named position.
    pub fn position(&self, name: &str) -> CanvasResult<Point> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| CanvasError::UnregisteredPosition(name.to_string()))
    }

    // --- Colors ---

    /// Select a created color as the pen color.
    pub fn set_color(&mut self, name: &str) -> CanvasResult<()> {
        let handle = self.color(name)?;
        log::debug!(target: "canvas", "setColor {} {:#010x}", name, handle.packed());
        self.pen.color = handle;
        Ok(())
    }

    /// Look up a created color.
    pub fn color(&self, name: &str) -> CanvasResult<ColorHandle> {
        self.colors
            .get(name)
            .copied()
            .ok_or_else(|| CanvasError::UnregisteredColor(name.to_string()))
    }

    /// Allocate a color and store it under `name`, replacing any previous one.
    ///
    /// `alpha` ranges from 0 (opaque) to 127 (fully transparent); `None` is opaque.
    pub fn create_color(
        &mut self,
        name: impl Into<String>,
        color: Color,
        alpha: Option<u8>,
    ) -> CanvasResult<ColorHandle> {
        let name = name.into();
        let handle = self.allocate_color(color, alpha.unwrap_or(0))?;
        log::debug!(target: "canvas", "createColor {} {:#010x}", name, handle.packed());
        self.colors.insert(name, handle);
        Ok(handle)
    }

    /// Create several colors sharing one alpha.
    pub fn create_colors<I, K>(&mut self, colors: I, alpha: Option<u8>) -> CanvasResult<()>
    where
        I: IntoIterator<Item = (K, Color)>,
        K: Into<String>,
    {
        for (name, color) in colors {
            self.create_color(name, color, alpha)?;
        }
        Ok(())
    }

    /// Create `"transparent"`, the given colors, and `"black"`/`"white"` when
    /// the palette lacks them.
    pub fn build_palette<I, K>(&mut self, colors: I, alpha: Option<u8>) -> CanvasResult<()>
    where
        I: IntoIterator<Item = (K, Color)>,
        K: Into<String>,
    {
        let mut palette: Vec<(String, Color)> = colors
            .into_iter()
            .map(|(name, color)| (name.into(), color))
            .collect();
        for (name, default) in [("black", Color::new(0, 0, 0)), ("white", Color::new(255, 255, 255))] {
            if !palette.iter().any(|(existing, _)| existing == name) {
                palette.push((name.to_string(), default));
            }
        }

        self.create_color("transparent", Color::new(255, 255, 255), Some(MAX_ALPHA))?;
        self.create_colors(palette, alpha)
    }

    fn allocate_color(&mut self, color: Color, alpha: u8) -> CanvasResult<ColorHandle> {
        let handle = ColorHandle::allocate(color, alpha)?;
        if !self.true_color {
            if self.palette.len() >= PALETTE_MAX_COLORS {
                return Err(CanvasError::ColorAllocation(format!(
                    "palette is full ({PALETTE_MAX_COLORS} colors)"
                )));
            }
            if self.palette.is_empty() {
                // First palette entry is the background
                self.pixmap.fill(handle.to_skia());
            }
            self.palette.push(handle);
        }
        Ok(handle)
    }

    // --- Pen settings ---

    /// Set the stroke thickness in pixels.
    pub fn thickness(&mut self, thickness: u32) {
        log::debug!(target: "canvas", "thickness {}", thickness);
        self.pen.thickness = thickness;
    }

    /// Toggle compositing: when off, drawing replaces pixels including their alpha.
    pub fn alpha_blending(&mut self, enabled: bool) {
        self.alpha_blending = enabled;
    }

    /// Toggle whether PNG output keeps the alpha channel.
    pub fn save_alpha_blending(&mut self, enabled: bool) {
        self.save_alpha = enabled;
    }

    // --- Fonts ---

    pub fn font_repository(&self) -> &FontRepository {
        &self.font_repository
    }

    pub fn set_font_repository(&mut self, repository: FontRepository) {
        self.font_repository = repository;
    }

    /// Select the pen font by TrueType file path or by repository name.
    pub fn set_font(&mut self, font: &str) -> CanvasResult<()> {
        let path = if is_truetype_path(font) {
            PathBuf::from(font)
        } else {
            self.font_repository.font_file(font)?
        };
        let loaded = self.load_font(&path)?;
        log::debug!(target: "canvas", "setFont {} ({})", loaded.family, path.display());
        self.pen.font = Some(loaded);
        Ok(())
    }

    fn load_font(&mut self, path: &Path) -> CanvasResult<LoadedFont> {
        if let Some(loaded) = self.loaded_fonts.get(path) {
            return Ok(loaded.clone());
        }

        let font_error = |reason: String| CanvasError::FontLoad {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
        let ids = self
            .font_system
            .db_mut()
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));
        let face = ids
            .first()
            .and_then(|id| self.font_system.db().face(*id))
            .ok_or_else(|| font_error("no font faces found".to_string()))?;
        let family = face
            .families
            .first()
            .map(|(family, _lang)| family.clone())
            .ok_or_else(|| font_error("font has no family name".to_string()))?;

        let loaded = LoadedFont {
            path: path.to_path_buf(),
            family,
            weight: face.weight,
            style: face.style,
            stretch: face.stretch,
        };
        self.loaded_fonts.insert(path.to_path_buf(), loaded.clone());
        Ok(loaded)
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        log::debug!(target: "canvas", "release {}x{} canvas", self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_defaults() {
        let canvas = Canvas::new(200, 150, true).unwrap();
        assert_eq!(canvas.width(), 200);
        assert_eq!(canvas.height(), 150);
        assert!(canvas.is_true_color());
        assert_eq!(canvas.pen().position, Point::new(0, 0));
        assert_eq!(canvas.pen().thickness, 1);
        assert_eq!(canvas.pen().color, ColorHandle::BLACK);
        assert!(canvas.pen().font.is_none());
        assert_eq!(canvas.position(ORIGIN).unwrap(), Point::new(0, 0));
        // True-color canvases start opaque black
        assert!(canvas
            .pixmap
            .pixels()
            .iter()
            .all(|p| p.red() == 0 && p.alpha() == 255));
    }

    #[test]
    fn test_palette_canvas_starts_transparent() {
        let canvas = Canvas::new(10, 10, false).unwrap();
        assert!(!canvas.is_true_color());
        assert!(!canvas.alpha_blending);
        assert!(canvas.save_alpha);
        assert!(canvas.pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Canvas::new(0, 100, true),
            Err(CanvasError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas::new(100, MAX_DIMENSION + 1, true),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_palette_first_color_is_background() {
        let mut canvas = Canvas::new(4, 4, false).unwrap();
        canvas
            .create_color("bg", Color::new(0, 0, 255), None)
            .unwrap();
        canvas
            .create_color("fg", Color::new(255, 0, 0), None)
            .unwrap();
        let pixel = canvas.pixmap.pixel(2, 2).unwrap();
        assert_eq!((pixel.red(), pixel.green(), pixel.blue()), (0, 0, 255));
    }

    #[test]
    fn test_palette_full() {
        let mut canvas = Canvas::new(4, 4, false).unwrap();
        for i in 0..PALETTE_MAX_COLORS {
            canvas
                .create_color(format!("c{i}"), Color::new(i as u8, 0, 0), None)
                .unwrap();
        }
        assert!(matches!(
            canvas.create_color("one-too-many", Color::new(1, 2, 3), None),
            Err(CanvasError::ColorAllocation(_))
        ));
    }

    #[test]
    fn test_true_color_has_no_palette_limit() {
        let mut canvas = Canvas::new(4, 4, true).unwrap();
        for i in 0..(PALETTE_MAX_COLORS + 10) {
            canvas
                .create_color(format!("c{i}"), Color::new(0, 0, (i % 256) as u8), None)
                .unwrap();
        }
        assert!(canvas.palette.is_empty());
    }

    #[test]
    fn test_recreate_color_overwrites() {
        let mut canvas = Canvas::new(4, 4, true).unwrap();
        canvas
            .create_color("accent", Color::new(1, 1, 1), None)
            .unwrap();
        let second = canvas
            .create_color("accent", Color::new(2, 2, 2), Some(10))
            .unwrap();
        assert_eq!(canvas.color("accent").unwrap(), second);
    }

    #[test]
    fn test_set_font_unknown_name() {
        let mut canvas = Canvas::new(4, 4, true).unwrap();
        assert!(matches!(
            canvas.set_font("NoSuchFont"),
            Err(CanvasError::UnknownFont(name)) if name == "NoSuchFont"
        ));
        assert!(canvas.pen().font.is_none());
    }

    #[test]
    fn test_set_font_missing_file() {
        let mut canvas = Canvas::new(4, 4, true).unwrap();
        assert!(matches!(
            canvas.set_font("/definitely/not/here.ttf"),
            Err(CanvasError::FontLoad { .. })
        ));
    }

    #[test]
    fn test_set_font_not_a_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();

        let mut canvas = Canvas::new(4, 4, true).unwrap();
        assert!(matches!(
            canvas.set_font(path.to_str().unwrap()),
            Err(CanvasError::FontLoad { .. })
        ));
    }

    #[test]
    fn test_set_font_through_repository_reports_load_error() {
        let repository = FontRepository::new().with_font("title", "/definitely/not/title.ttf");
        let mut canvas = Canvas::builder(4, 4)
            .font_repository(repository)
            .build()
            .unwrap();
        assert!(matches!(
            canvas.set_font("title"),
            Err(CanvasError::FontLoad { path, .. }) if path == PathBuf::from("/definitely/not/title.ttf")
        ));
    }
}
