//! The current drawing state of a canvas.

use crate::color::ColorHandle;
use crate::geometry::Point;
use cosmic_text::{Stretch, Style, Weight};
use std::path::PathBuf;

/// A font file loaded into the canvas's font database.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFont {
    /// Path the font was loaded from.
    pub path: PathBuf,
    /// Family name read from the font's name table.
    pub family: String,
    pub weight: Weight,
    pub style: Style,
    pub stretch: Stretch,
}

/// Position, color, thickness and font used by drawing calls that do not take
/// them as arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    /// Current position.
    pub position: Point,
    /// Current color.
    pub color: ColorHandle,
    /// Current stroke thickness in pixels.
    pub thickness: u32,
    /// Current font, if one was selected.
    pub font: Option<LoadedFont>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            position: Point::default(),
            color: ColorHandle::BLACK,
            thickness: 1,
            font: None,
        }
    }
}
