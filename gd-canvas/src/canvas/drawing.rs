//! Filling and stroking shapes with the pen.

use super::Canvas;
use crate::arc::{ellipse_arc, ArcClose};
use crate::color::ColorHandle;
use crate::geometry::Point;
use crate::shape::{Arc, Polygon, Shape};
use tiny_skia::{BlendMode, FillRule, PathBuilder, Transform};

/// Center of the pixel at `point`.
fn pixel_center(point: Point) -> (f32, f32) {
    (point.x as f32 + 0.5, point.y as f32 + 0.5)
}

impl Canvas {
    // --- Drawing operations ---

    /// Flood-fill the region of uniform color under the pen with the pen color.
    pub fn flood_fill(&mut self) {
        let Point { x, y } = self.pen.position;
        log::debug!(target: "canvas", "fill at ({}, {})", x, y);
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let width = self.width as usize;
        let height = self.height as usize;
        let fill = self.pen.color.to_skia().premultiply().to_color_u8();
        let pixels = self.pixmap.pixels_mut();
        let seed = pixels[y as usize * width + x as usize];
        if seed == fill {
            return;
        }

        // Scanline fill: paint a whole run, then queue runs above and below
        let mut stack = vec![(x as usize, y as usize)];
        while let Some((px, py)) = stack.pop() {
            let row = py * width;
            if pixels[row + px] != seed {
                continue;
            }
            let mut x0 = px;
            while x0 > 0 && pixels[row + x0 - 1] == seed {
                x0 -= 1;
            }
            let mut x1 = px;
            while x1 + 1 < width && pixels[row + x1 + 1] == seed {
                x1 += 1;
            }
            pixels[row + x0..=row + x1].fill(fill);

            let above = py.checked_sub(1);
            let below = (py + 1 < height).then_some(py + 1);
            for ny in [above, below].into_iter().flatten() {
                let next_row = ny * width;
                let mut fx = x0;
                while fx <= x1 {
                    if pixels[next_row + fx] == seed {
                        stack.push((fx, ny));
                        while fx <= x1 && pixels[next_row + fx] == seed {
                            fx += 1;
                        }
                    } else {
                        fx += 1;
                    }
                }
            }
        }
    }

    /// Fill a shape with the pen color.
    pub fn fill(&mut self, shape: &Shape) {
        log::debug!(target: "canvas", "fill {:?}", shape);
        match shape {
            Shape::Delta(delta) => {
                let corner = Point::new(delta.delta_x, delta.delta_y);
                self.fill_rect_between(self.pen.position, corner);
            }
            Shape::Polygon(polygon) => self.fill_polygon(polygon),
            Shape::Rectangle(rect) => self.fill_rect_between(rect.point1, rect.point2),
            Shape::Ellipse(ellipse) => {
                self.fill_ellipse(ellipse.center, ellipse.radius_x, ellipse.radius_y)
            }
            Shape::Circle(circle) => {
                self.fill_ellipse(circle.center, circle.radius, circle.radius)
            }
            Shape::Arc(arc) => self.fill_arc(arc, ArcClose::Chord),
            Shape::ArcPie(arc) => self.fill_arc(arc, ArcClose::Pie),
        }
    }

    /// Draw a shape the way its kind is stroked.
    ///
    /// Only arcs get a true outline. Deltas and circles are drawn filled;
    /// ellipses are filled, then filled again with both radii reduced by the
    /// pen thickness.
    /// Rectangles and polygons draw nothing.
    pub fn stroke(&mut self, shape: &Shape) {
        log::debug!(target: "canvas", "stroke {:?}", shape);
        match shape {
            Shape::Delta(delta) => {
                let corner = Point::new(delta.delta_x, delta.delta_y);
                self.fill_rect_between(self.pen.position, corner);
            }
            Shape::Arc(arc) | Shape::ArcPie(arc) => self.stroke_arc(arc),
            Shape::Circle(circle) => {
                let full = Arc {
                    center: circle.center,
                    radius_x: circle.radius,
                    radius_y: circle.radius,
                    start: 0,
                    end: 360,
                };
                self.fill_arc(&full, ArcClose::Pie);
            }
            Shape::Ellipse(ellipse) => {
                let inset = self.pen.thickness as i32;
                self.fill_ellipse(ellipse.center, ellipse.radius_x, ellipse.radius_y);
                self.fill_ellipse(
                    ellipse.center,
                    ellipse.radius_x - inset,
                    ellipse.radius_y - inset,
                );
            }
            Shape::Rectangle(_) | Shape::Polygon(_) => {
                log::debug!(target: "canvas", "stroke of {:?} draws nothing", shape.kind());
            }
        }
    }

    // --- Primitives ---

    /// Fill the rectangle spanning both corner pixels, in any corner order.
    fn fill_rect_between(&mut self, a: Point, b: Point) {
        let left = a.x.min(b.x) as f32;
        let top = a.y.min(b.y) as f32;
        let right = a.x.max(b.x) as f32 + 1.0;
        let bottom = a.y.max(b.y) as f32 + 1.0;
        let Some(rect) = tiny_skia::Rect::from_ltrb(left, top, right, bottom) else {
            return;
        };
        self.with_pen_paint(|ctx, paint| {
            ctx.pixmap.fill_rect(rect, paint, Transform::identity(), None);
        });
    }

    fn fill_ellipse(&mut self, center: Point, radius_x: i32, radius_y: i32) {
        if radius_x <= 0 || radius_y <= 0 {
            return;
        }
        let (cx, cy) = pixel_center(center);
        let (rx, ry) = (radius_x as f32, radius_y as f32);
        let path = tiny_skia::Rect::from_xywh(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry)
            .and_then(PathBuilder::from_oval);
        if let Some(path) = path {
            self.with_pen_paint(|ctx, paint| {
                ctx.pixmap
                    .fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
            });
        }
    }

    fn fill_arc(&mut self, arc: &Arc, close: ArcClose) {
        let (cx, cy) = pixel_center(arc.center);
        let mut builder = PathBuilder::new();
        ellipse_arc(
            &mut builder,
            cx,
            cy,
            arc.radius_x as f32,
            arc.radius_y as f32,
            arc.start,
            arc.end,
            close,
        );
        if let Some(path) = builder.finish() {
            self.with_pen_paint(|ctx, paint| {
                ctx.pixmap
                    .fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
            });
        }
    }

    fn stroke_arc(&mut self, arc: &Arc) {
        let (cx, cy) = pixel_center(arc.center);
        let mut builder = PathBuilder::new();
        ellipse_arc(
            &mut builder,
            cx,
            cy,
            arc.radius_x as f32,
            arc.radius_y as f32,
            arc.start,
            arc.end,
            ArcClose::Open,
        );
        let stroke = tiny_skia::Stroke {
            width: self.pen.thickness.max(1) as f32,
            ..Default::default()
        };
        if let Some(path) = builder.finish() {
            self.with_pen_paint(|ctx, paint| {
                ctx.pixmap
                    .stroke_path(&path, paint, &stroke, Transform::identity(), None);
            });
        }
    }

    fn fill_polygon(&mut self, polygon: &Polygon) {
        let vertices = polygon.vertices();
        if vertices.len() < 3 {
            log::warn!(
                target: "canvas",
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            );
            return;
        }

        let mut builder = PathBuilder::new();
        let (x, y) = pixel_center(vertices[0]);
        builder.move_to(x, y);
        for vertex in &vertices[1..] {
            let (x, y) = pixel_center(*vertex);
            builder.line_to(x, y);
        }
        builder.close();

        if let Some(path) = builder.finish() {
            self.with_pen_paint(|ctx, paint| {
                ctx.pixmap
                    .fill_path(&path, paint, FillRule::EvenOdd, Transform::identity(), None);
            });
        }
    }

    // --- Paint ---

    pub(crate) fn paint_for(&self, color: ColorHandle) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint {
            // Palette canvases draw hard edges
            anti_alias: self.true_color,
            blend_mode: if self.alpha_blending {
                BlendMode::SourceOver
            } else {
                BlendMode::Source
            },
            ..Default::default()
        };
        paint.set_color(color.to_skia());
        paint
    }

    pub(crate) fn with_pen_paint<R>(
        &mut self,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> R {
        let paint = self.paint_for(self.pen.color);
        draw(self, &paint)
    }
}
