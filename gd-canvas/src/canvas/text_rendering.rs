//! Text rendering operations for Canvas.

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::pen::LoadedFont;
use crate::text::{enclose_text, font_attrs, points_to_pixels, Shadow};
use cosmic_text::{Buffer, Command, Metrics, Shaping};
use tiny_skia::Transform;

impl Canvas {
    /// Draw `text` centered in the `width` x `height` box at the pen position,
    /// at the largest point size that fits.
    ///
    /// `padding` uses CSS shorthand (see [`Padding::from_values`](crate::Padding::from_values)).
    /// `angle` rotates the text counter-clockwise, in degrees. A shadow is
    /// drawn first, offset by a fraction of the font size on both axes.
    pub fn write_text(
        &mut self,
        width: i32,
        height: i32,
        text: &str,
        shadow: Option<&Shadow>,
        padding: &[i32],
        angle: f32,
    ) -> CanvasResult<()> {
        let font = self.pen.font.clone().ok_or(CanvasError::FontNotSet)?;
        let fitted = enclose_text(
            &mut self.font_system,
            &font,
            text,
            width,
            height,
            padding,
            angle,
        )?;

        let pad = fitted.padding;
        let origin = self.pen.position;
        let start_x = origin.x as f32
            + pad.left as f32
            + ((width - pad.horizontal()) as f32 - fitted.text_width) / 2.0;
        // Baseline sits below the vertical center by half the text height
        let start_y = origin.y as f32
            + pad.top as f32
            + ((height - pad.vertical()) as f32 + fitted.text_height) / 2.0;
        let (start_x, start_y) = (start_x as i32, start_y as i32);

        log::debug!(
            target: "canvas",
            "writeText {:?} at ({}, {}) {}pt angle {}",
            text, start_x, start_y, fitted.font_size, angle
        );

        if let Some(shadow) = shadow {
            let previous = self.pen.color;
            self.set_color(&shadow.color)?;
            let offset = (fitted.font_size * shadow.offset).floor() as i32;
            self.draw_glyph_run(
                &font,
                text,
                fitted.font_size,
                angle,
                start_x + offset,
                start_y + offset,
            );
            self.pen.color = previous;
        }

        self.draw_glyph_run(&font, text, fitted.font_size, angle, start_x, start_y);
        Ok(())
    }

    /// Render glyph outlines with the first baseline starting at (x, y).
    fn draw_glyph_run(
        &mut self,
        font: &LoadedFont,
        text: &str,
        size_pt: f32,
        angle: f32,
        x: i32,
        y: i32,
    ) {
        let size_px = points_to_pixels(size_pt);
        let metrics = Metrics::new(size_px, size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let attrs = font_attrs(font);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Screen y points down, so a negative rotation turns counter-clockwise
        let run_transform = Transform::from_rotate(-angle).post_translate(x as f32, y as f32);

        self.with_pen_paint(|ctx, paint| {
            let mut first_baseline = None;
            for run in buffer.layout_runs() {
                let baseline = *first_baseline.get_or_insert(run.line_y);
                let line_offset = run.line_y - baseline;

                for glyph in run.glyphs.iter() {
                    let physical_glyph = glyph.physical((0.0, 0.0), 1.0);

                    let glyph_x = glyph.x + glyph.font_size * glyph.x_offset;
                    let glyph_y = line_offset + glyph.y - glyph.font_size * glyph.y_offset;

                    let Some(commands) = ctx
                        .swash_cache
                        .get_outline_commands(&mut ctx.font_system, physical_glyph.cache_key)
                    else {
                        continue;
                    };

                    // Font outlines have y pointing up
                    let mut path_builder = tiny_skia::PathBuilder::new();
                    for cmd in commands {
                        match cmd {
                            Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                            Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                            Command::QuadTo(ctrl, end) => {
                                path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                            }
                            Command::CurveTo(c1, c2, end) => {
                                path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                            }
                            Command::Close => path_builder.close(),
                        }
                    }

                    if let Some(path) = path_builder.finish() {
                        let glyph_transform =
                            Transform::from_translate(glyph_x, glyph_y).post_concat(run_transform);
                        ctx.pixmap.fill_path(
                            &path,
                            paint,
                            tiny_skia::FillRule::Winding,
                            glyph_transform,
                            None,
                        );
                    }
                }
            }
        });
    }
}
