//! Text measurement and box fitting using cosmic-text.

use crate::error::{CanvasError, CanvasResult};
use crate::pen::LoadedFont;
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// Resolution used to turn point sizes into pixels.
pub const RESOLUTION_DPI: f32 = 96.0;

/// Largest point size tried when fitting text into a box.
pub const MAX_FONT_SIZE: u32 = 512;

/// Convert a point size into pixels at [`RESOLUTION_DPI`].
pub fn points_to_pixels(points: f32) -> f32 {
    points * RESOLUTION_DPI / 72.0
}

/// Space kept free inside a text box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    pub const fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Build padding from CSS-style shorthand values.
    ///
    /// One value applies to every side, two are vertical then horizontal, three
    /// are top, horizontal, bottom and four are top, right, bottom, left.
    /// Values past the fourth are ignored.
    pub fn from_values(values: &[i32]) -> Self {
        match *values {
            [] => Self::default(),
            [all] => Self::uniform(all),
            [vertical, horizontal] => Self {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            },
            [top, horizontal, bottom] => Self {
                top,
                right: horizontal,
                bottom,
                left: horizontal,
            },
            [top, right, bottom, left, ..] => Self {
                top,
                right,
                bottom,
                left,
            },
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// A drop shadow drawn behind text.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    /// Name of a color registered on the canvas.
    pub color: String,
    /// Offset as a fraction of the font size, applied to both axes.
    pub offset: f32,
}

impl Shadow {
    pub fn new(color: impl Into<String>, offset: f32) -> Self {
        Self {
            color: color.into(),
            offset,
        }
    }
}

/// Size of a laid-out run of text in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width of the widest line.
    pub width: f32,
    /// Height from the top of the first line to the bottom of the last.
    pub height: f32,
    /// Distance from the first baseline to the top of the first line.
    pub ascent: f32,
    /// Distance from the last baseline to the bottom of the last line.
    pub descent: f32,
}

/// Result of fitting text into a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    /// Chosen font size in points.
    pub font_size: f32,
    /// Padding that was applied.
    pub padding: Padding,
    /// Width of the (rotated) text bounds in pixels.
    pub text_width: f32,
    /// Height of the (rotated) text bounds in pixels.
    pub text_height: f32,
}

/// Build cosmic-text attributes selecting exactly the loaded face.
pub(crate) fn font_attrs(font: &LoadedFont) -> Attrs<'_> {
    // Disable hinting so measurement and outline rendering agree
    Attrs::new()
        .family(Family::Name(&font.family))
        .weight(font.weight)
        .style(font.style)
        .stretch(font.stretch)
        .cache_key_flags(CacheKeyFlags::DISABLE_HINTING)
}

/// Shape `text` at `size_pt` points and return its pixel metrics.
pub fn measure_text(
    font_system: &mut FontSystem,
    font: &LoadedFont,
    text: &str,
    size_pt: f32,
) -> TextMetrics {
    let size_px = points_to_pixels(size_pt);
    let metrics = Metrics::new(size_px, size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let attrs = font_attrs(font);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);

    let mut width: f32 = 0.0;
    let mut first: Option<(f32, f32)> = None;
    let mut last: Option<(f32, f32)> = None;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        if first.is_none() {
            first = Some((run.line_top, run.line_y));
        }
        last = Some((run.line_top + run.line_height, run.line_y));
    }

    match (first, last) {
        (Some((top, first_baseline)), Some((bottom, last_baseline))) => TextMetrics {
            width,
            height: bottom - top,
            ascent: first_baseline - top,
            descent: bottom - last_baseline,
        },
        _ => TextMetrics {
            width,
            height: size_px,
            ascent: size_px * 0.8,
            descent: size_px * 0.2,
        },
    }
}

/// Bounds of a `width` x `height` box rotated by `angle` degrees.
pub fn rotated_extent(width: f32, height: f32, angle: f32) -> (f32, f32) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    (width * cos + height * sin, width * sin + height * cos)
}

/// Find the largest font size at which `text` fits a `width` x `height` box.
///
/// `padding` uses the shorthand accepted by [`Padding::from_values`]. The
/// returned sizes are those of the text rotated by `angle` degrees.
pub fn enclose_text(
    font_system: &mut FontSystem,
    font: &LoadedFont,
    text: &str,
    width: i32,
    height: i32,
    padding: &[i32],
    angle: f32,
) -> CanvasResult<TextBox> {
    let padding = Padding::from_values(padding);
    let room_w = (width - padding.horizontal()) as f32;
    let room_h = (height - padding.vertical()) as f32;
    if room_w <= 0.0 || room_h <= 0.0 {
        return Err(CanvasError::TextError(format!(
            "no room for text in a {width}x{height} box with padding {padding:?}"
        )));
    }

    // Largest size that fits, by bisection over whole points
    let (mut lo, mut hi) = (1u32, MAX_FONT_SIZE);
    let (w, h) = extent_at(font_system, font, text, lo, angle);
    if w > room_w || h > room_h {
        log::warn!(target: "canvas", "text {:?} does not fit {}x{} even at 1pt", text, width, height);
        hi = lo;
    }
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        let (w, h) = extent_at(font_system, font, text, mid, angle);
        if w <= room_w && h <= room_h {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let (text_width, text_height) = extent_at(font_system, font, text, lo, angle);
    log::debug!(target: "canvas", "enclose_text {:?} in {}x{}: {}pt", text, width, height, lo);
    Ok(TextBox {
        font_size: lo as f32,
        padding,
        text_width,
        text_height,
    })
}

fn extent_at(
    font_system: &mut FontSystem,
    font: &LoadedFont,
    text: &str,
    size: u32,
    angle: f32,
) -> (f32, f32) {
    let metrics = measure_text(font_system, font, text, size as f32);
    rotated_extent(metrics.width, metrics.height, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], Padding::default())]
    #[case(&[4], Padding::uniform(4))]
    #[case(&[1, 2], Padding { top: 1, right: 2, bottom: 1, left: 2 })]
    #[case(&[1, 2, 3], Padding { top: 1, right: 2, bottom: 3, left: 2 })]
    #[case(&[1, 2, 3, 4], Padding { top: 1, right: 2, bottom: 3, left: 4 })]
    #[case(&[1, 2, 3, 4, 5], Padding { top: 1, right: 2, bottom: 3, left: 4 })]
    fn test_padding_shorthand(#[case] values: &[i32], #[case] expected: Padding) {
        assert_eq!(Padding::from_values(values), expected);
    }

    #[test]
    fn test_points_to_pixels() {
        assert_eq!(points_to_pixels(72.0), 96.0);
        assert_eq!(points_to_pixels(12.0), 16.0);
    }

    #[test]
    fn test_rotated_extent() {
        let (w, h) = rotated_extent(100.0, 20.0, 0.0);
        assert!((w - 100.0).abs() < 1e-3 && (h - 20.0).abs() < 1e-3);

        let (w, h) = rotated_extent(100.0, 20.0, 90.0);
        assert!((w - 20.0).abs() < 1e-3 && (h - 100.0).abs() < 1e-3);

        let (w, h) = rotated_extent(100.0, 20.0, -90.0);
        assert!((w - 20.0).abs() < 1e-3 && (h - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_enclose_text_without_room() {
        let mut font_system = FontSystem::new_with_locale_and_db(
            "en".to_string(),
            fontdb::Database::new(),
        );
        let font = LoadedFont {
            path: "unused.ttf".into(),
            family: "Unused".into(),
            weight: cosmic_text::Weight::NORMAL,
            style: cosmic_text::Style::Normal,
            stretch: cosmic_text::Stretch::Normal,
        };
        let result = enclose_text(&mut font_system, &font, "hi", 10, 10, &[5], 0.0);
        assert!(matches!(result, Err(CanvasError::TextError(_))));
    }
}
