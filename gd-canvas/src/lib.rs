//! Pen-oriented drawing canvas using tiny-skia and cosmic-text.
//!
//! A [`Canvas`] owns a raster surface and a pen (position, color, thickness
//! and font). Colors and positions are registered under names and referred to
//! by name afterwards. Shapes are plain values built by the canvas factory and
//! drawn with [`Canvas::fill`] or [`Canvas::stroke`]. Text is fitted into a
//! box at the largest size that fits, optionally over a shadow, and the result
//! is saved as PNG.
//!
//! It uses:
//! - `tiny-skia` for 2D graphics rendering
//! - `cosmic-text` for text shaping, measurement, and rendering
//! - `fontdb` for loading font files and looking up system fonts
//! - `png` for encoding
//!
//! # Example
//!
//! ```rust,no_run
//! use gd_canvas::{Canvas, CanvasResult, Color, Delta, Point, Shape, ShapeArgs};
//!
//! fn main() -> CanvasResult<()> {
//!     let mut canvas = Canvas::new(400, 300, true)?;
//!     canvas.build_palette([("sky", Color::from_hex("87ceeb")?)], None)?;
//!     canvas.set_color("sky")?;
//!     canvas.fill(&Shape::Delta(Delta::new(399, 299)));
//!
//!     canvas.create_position("sun", Point::new(320, 60));
//!     canvas.set_color("white")?;
//!     let sun = canvas.factory("sun", ShapeArgs::Circle { radius: 30 })?;
//!     canvas.fill(&sun);
//!
//!     canvas.save_as_png("scene.png")
//! }
//! ```

mod arc;
mod canvas;
mod color;
mod error;
mod font_repository;
mod geometry;
mod pen;
mod shape;
mod text;

// Re-export public API
pub use arc::{normalize_degrees, ArcClose};
pub use canvas::{Canvas, CanvasBuilder, LAST_POSITION, ORIGIN};
pub use color::{Color, ColorHandle, MAX_ALPHA};
pub use error::{CanvasError, CanvasResult};
pub use font_repository::{is_truetype_path, FontRepository};
pub use geometry::{Delta, Point, Position};
pub use pen::{LoadedFont, Pen};
pub use shape::{Arc, Circle, Ellipse, Polygon, Rectangle, Shape, ShapeArgs, ShapeKind};
pub use text::{
    enclose_text, measure_text, points_to_pixels, rotated_extent, Padding, Shadow, TextBox,
    TextMetrics, MAX_FONT_SIZE, RESOLUTION_DPI,
};
