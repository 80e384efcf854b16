//! Colors and allocated color handles.

use crate::error::{CanvasError, CanvasResult};
use std::str::FromStr;

/// Largest alpha value of an allocated color (fully transparent).
pub const MAX_ALPHA: u8 = 127;

/// An RGB color parsed from a hex-like string.
///
/// Accepts `"000"`, `"#fff"`, `"ff8800"`, `"#ff8800"` and any CSS color name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse a hex-like color string. The leading `#` is optional.
    pub fn from_hex(s: &str) -> CanvasResult<Self> {
        let trimmed = s.trim();
        let is_bare_hex = !trimmed.is_empty()
            && matches!(trimmed.len(), 3 | 4 | 6 | 8)
            && trimmed.chars().all(|c| c.is_ascii_hexdigit());
        let parsed = if is_bare_hex {
            csscolorparser::parse(&format!("#{trimmed}"))
        } else {
            csscolorparser::parse(trimmed)
        }
        .map_err(|e| CanvasError::ColorParse(format!("{}: {}", s, e)))?;

        let [red, green, blue, _] = parsed.to_rgba8();
        Ok(Self { red, green, blue })
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

/// A color allocated on a canvas.
///
/// Packed as `0xAARRGGBB` where `AA` is a 7-bit alpha: 0 is opaque and
/// [`MAX_ALPHA`] is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorHandle(u32);

impl ColorHandle {
    /// Opaque black, the pen color before any color is selected.
    pub const BLACK: ColorHandle = ColorHandle(0);

    /// Pack a color with a 7-bit alpha.
    pub fn allocate(color: Color, alpha: u8) -> CanvasResult<Self> {
        if alpha > MAX_ALPHA {
            return Err(CanvasError::ColorAllocation(format!(
                "alpha {alpha} outside 0-{MAX_ALPHA}"
            )));
        }
        Ok(Self::from_parts(color.red, color.green, color.blue, alpha))
    }

    pub(crate) const fn from_parts(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        ColorHandle(
            ((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32,
        )
    }

    /// Rebuild a handle from a straight (non-premultiplied) RGBA pixel.
    pub(crate) fn from_rgba8(rgba: [u8; 4]) -> Self {
        let alpha = MAX_ALPHA - (rgba[3] >> 1);
        Self::from_parts(rgba[0], rgba[1], rgba[2], alpha)
    }

    /// The packed `0xAARRGGBB` value.
    pub fn packed(self) -> u32 {
        self.0
    }

    pub fn red(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// 7-bit alpha, 0 (opaque) to 127 (transparent).
    pub fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0x7f) as u8
    }

    /// 8-bit opacity, 255 (opaque) to 0 (transparent).
    pub fn opacity(self) -> u8 {
        let alpha = self.alpha();
        255 - ((alpha << 1) + (alpha >> 6))
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.red(), self.green(), self.blue(), self.opacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("000", Color::new(0, 0, 0))]
    #[case("fff", Color::new(255, 255, 255))]
    #[case("#ff8800", Color::new(255, 136, 0))]
    #[case("1e90ff", Color::new(30, 144, 255))]
    #[case("red", Color::new(255, 0, 0))]
    fn test_parse_hex_like(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(Color::from_hex(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Color::from_hex("not-a-color"),
            Err(CanvasError::ColorParse(_))
        ));
        assert!(matches!(
            "".parse::<Color>(),
            Err(CanvasError::ColorParse(_))
        ));
    }

    #[test]
    fn test_handle_packing() {
        let handle = ColorHandle::allocate(Color::new(0x12, 0x34, 0x56), 0x40).unwrap();
        assert_eq!(handle.packed(), 0x4012_3456);
        assert_eq!(handle.red(), 0x12);
        assert_eq!(handle.green(), 0x34);
        assert_eq!(handle.blue(), 0x56);
        assert_eq!(handle.alpha(), 0x40);
    }

    #[test]
    fn test_opacity_endpoints() {
        let opaque = ColorHandle::allocate(Color::new(1, 2, 3), 0).unwrap();
        let clear = ColorHandle::allocate(Color::new(1, 2, 3), MAX_ALPHA).unwrap();
        assert_eq!(opaque.opacity(), 255);
        assert_eq!(clear.opacity(), 0);
    }

    #[test]
    fn test_alpha_out_of_range() {
        assert!(matches!(
            ColorHandle::allocate(Color::new(0, 0, 0), 128),
            Err(CanvasError::ColorAllocation(_))
        ));
    }

    #[test]
    fn test_rgba8_round_trip_opaque() {
        let handle = ColorHandle::from_rgba8([10, 20, 30, 255]);
        assert_eq!(handle.alpha(), 0);
        assert_eq!(handle, ColorHandle::from_parts(10, 20, 30, 0));
    }
}
