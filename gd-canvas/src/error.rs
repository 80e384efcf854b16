//! Error types for gd-canvas.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The raster surface could not be allocated for these dimensions.
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A color name was selected before it was created.
    #[error("Color with {0} name is not declared yet")]
    UnregisteredColor(String),

    /// A position name was looked up before it was created.
    #[error("Position with {0} name is not declared yet")]
    UnregisteredPosition(String),

    /// A position was given in a shape that cannot be turned into a point.
    #[error("Position format not recognized: {0}")]
    UnrecognizedPosition(String),

    /// A shape kind tag outside the supported set.
    #[error("Shape kind not recognized: {0}")]
    UnknownShapeKind(String),

    /// The font repository has no file for this font name.
    #[error("Font {0} not found in the font repository")]
    UnknownFont(String),

    /// A font file could not be read or contains no usable face.
    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// Text was written before any font was selected.
    #[error("No font selected")]
    FontNotSet,

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParse(String),

    /// The raster engine refused to allocate a color.
    #[error("Color allocation failed: {0}")]
    ColorAllocation(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    Png(String),

    /// Writing the output file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Text layout error.
    #[error("Text rendering error: {0}")]
    TextError(String),
}

impl From<png::EncodingError> for CanvasError {
    fn from(err: png::EncodingError) -> Self {
        CanvasError::Png(err.to_string())
    }
}
