//! Pixel data and PNG output operations for Canvas.

use super::Canvas;
use crate::color::ColorHandle;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::Point;
use std::path::Path;

impl Canvas {
    /// Get image data for a region of the canvas.
    ///
    /// Returns RGBA pixel data in non-premultiplied format. Pixels outside the
    /// canvas read as transparent black. A region too large to address fails
    /// with [`CanvasError::InvalidDimensions`].
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> CanvasResult<Vec<u8>> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CanvasError::InvalidDimensions { width, height })?;
        let mut data = vec![0u8; len];

        // Only the part of the region that overlaps the canvas is copied
        let (x, y) = (i64::from(x), i64::from(y));
        let col_start = (-x).clamp(0, i64::from(width));
        let col_end = (i64::from(self.width) - x).clamp(col_start, i64::from(width));
        let row_start = (-y).clamp(0, i64::from(height));
        let row_end = (i64::from(self.height) - y).clamp(row_start, i64::from(height));

        for dy in row_start..row_end {
            for dx in col_start..col_end {
                let dst_idx = ((dy as usize) * (width as usize) + dx as usize) * 4;
                if let Some(pixel) = self.straight_pixel(x + dx, y + dy) {
                    data[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
                }
            }
        }

        Ok(data)
    }

    /// Read back one pixel as a color handle, `None` outside the canvas.
    ///
    /// Pixels are stored premultiplied, so a fully transparent pixel reads back
    /// with black RGB whatever color was drawn there.
    pub fn color_at(&self, point: Point) -> Option<ColorHandle> {
        self.straight_pixel(i64::from(point.x), i64::from(point.y))
            .map(ColorHandle::from_rgba8)
    }

    fn straight_pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        // Convert from premultiplied alpha to straight alpha
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Encode the canvas as PNG.
    ///
    /// With alpha saving turned off the alpha channel is dropped and an RGB
    /// image is written. Fully transparent pixels carry no color and come out
    /// black in that case.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        let data = self.get_image_data(0, 0, self.width, self.height)?;

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_depth(png::BitDepth::Eight);

            if self.save_alpha {
                encoder.set_color(png::ColorType::Rgba);
                let mut writer = encoder.write_header()?;
                writer.write_image_data(&data)?;
            } else {
                encoder.set_color(png::ColorType::Rgb);
                let rgb: Vec<u8> = data
                    .chunks_exact(4)
                    .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
                    .collect();
                let mut writer = encoder.write_header()?;
                writer.write_image_data(&rgb)?;
            }
        }
        log::debug!(target: "canvas", "encoded {} byte png", buf.len());
        Ok(buf)
    }

    /// Encode the canvas as PNG and write it to `path`.
    pub fn save_as_png(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        log::debug!(target: "canvas", "saveAsPng {}", path.display());
        let png = self.to_png()?;
        std::fs::write(path, png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use crate::{Canvas, CanvasError, Delta, Point, Shape};

    #[test]
    fn test_get_image_data_out_of_bounds_is_transparent() {
        let canvas = Canvas::new(2, 2, true).unwrap();
        let data = canvas.get_image_data(1, 1, 2, 2).unwrap();
        // Only the first pixel lies on the canvas
        assert_eq!(&data[0..4], &[0, 0, 0, 255]);
        assert!(data[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_color_at() {
        let mut canvas = Canvas::new(8, 8, true).unwrap();
        let teal = canvas
            .create_color("teal", Color::new(0, 128, 128), None)
            .unwrap();
        canvas.set_color("teal").unwrap();
        canvas.fill(&Shape::Delta(Delta::new(3, 3)));
        assert_eq!(canvas.color_at(Point::new(1, 1)), Some(teal));
        assert_eq!(canvas.color_at(Point::new(8, 0)), None);
        assert_eq!(canvas.color_at(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_to_png_signature() {
        let canvas = Canvas::new(3, 3, true).unwrap();
        let png = canvas.to_png().unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_get_image_data_far_outside() {
        let canvas = Canvas::new(4, 4, true).unwrap();
        let data = canvas.get_image_data(i32::MAX - 1, i32::MIN, 3, 2).unwrap();
        assert_eq!(data.len(), 24);
        assert!(data.iter().all(|&b| b == 0));

        let data = canvas.get_image_data(-2, 3, 4, 1).unwrap();
        // Two pixels off the left edge, then two canvas pixels
        assert_eq!(&data[0..8], &[0; 8]);
        assert_eq!(&data[8..16], &[0, 0, 0, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn test_get_image_data_too_large() {
        let canvas = Canvas::new(4, 4, true).unwrap();
        assert!(matches!(
            canvas.get_image_data(0, 0, u32::MAX, u32::MAX),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_palette_png_keeps_transparent_background() {
        let mut canvas = Canvas::new(6, 6, false).unwrap();
        canvas
            .build_palette(Vec::<(String, Color)>::new(), None)
            .unwrap();

        let png = canvas.to_png().unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.color(), image::ColorType::Rgba8);
        assert_eq!(img.to_rgba8().get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_transparent_pixels_lose_color() {
        let mut canvas = Canvas::new(6, 6, true).unwrap();
        let clear = canvas
            .create_color("clear", Color::new(255, 255, 255), Some(127))
            .unwrap();
        canvas.set_color("clear").unwrap();
        canvas.alpha_blending(false);
        canvas.fill(&Shape::Delta(Delta::new(5, 5)));

        let read = canvas.color_at(Point::new(2, 2)).unwrap();
        assert_eq!(read.alpha(), clear.alpha());
        assert_eq!((read.red(), read.green(), read.blue()), (0, 0, 0));

        canvas.save_alpha_blending(false);
        let img = image::load_from_memory(&canvas.to_png().unwrap()).unwrap();
        assert_eq!(img.to_rgb8().get_pixel(2, 2).0, [0, 0, 0]);
    }
}
