//! Shape constructors resolving point-like arguments against the canvas.

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Position};
use crate::shape::{Arc, Circle, Ellipse, Polygon, Rectangle, Shape, ShapeArgs};

impl Canvas {
    pub fn circle(&self, center: impl Into<Position>, radius: i32) -> CanvasResult<Circle> {
        Ok(Circle {
            center: self.to_point(center)?,
            radius,
        })
    }

    pub fn ellipse(
        &self,
        center: impl Into<Position>,
        radius_x: i32,
        radius_y: i32,
    ) -> CanvasResult<Ellipse> {
        Ok(Ellipse {
            center: self.to_point(center)?,
            radius_x,
            radius_y,
        })
    }

    /// Start a polygon. The start point is taken as given.
    pub fn polygon(&self, start: Point) -> Polygon {
        Polygon::new(start)
    }

    pub fn rectangle(
        &self,
        point1: impl Into<Position>,
        point2: impl Into<Position>,
    ) -> CanvasResult<Rectangle> {
        Ok(Rectangle {
            point1: self.to_point(point1)?,
            point2: self.to_point(point2)?,
        })
    }

    /// An arc outline, filled as a chord.
    pub fn arc(
        &self,
        center: impl Into<Position>,
        radius_x: i32,
        radius_y: i32,
        start: i32,
        end: i32,
    ) -> CanvasResult<Arc> {
        Ok(Arc {
            center: self.to_point(center)?,
            radius_x,
            radius_y,
            start,
            end,
        })
    }

    /// An arc wedge, filled as a pie slice. Wrap it in [`Shape::ArcPie`] to draw it.
    pub fn arc_pie(
        &self,
        center: impl Into<Position>,
        radius_x: i32,
        radius_y: i32,
        start: i32,
        end: i32,
    ) -> CanvasResult<Arc> {
        self.arc(center, radius_x, radius_y, start, end)
    }

    /// Build any shape kind from a position and kind-specific arguments.
    ///
    /// Polygons start at `position` without name resolution, so only a
    /// literal point is accepted for them.
    pub fn factory(&self, position: impl Into<Position>, args: ShapeArgs) -> CanvasResult<Shape> {
        let position = position.into();
        log::debug!(target: "canvas", "factory {} at {:?}", args.kind(), position);
        let shape = match args {
            ShapeArgs::Circle { radius } => Shape::Circle(self.circle(position, radius)?),
            ShapeArgs::Ellipse { radius_x, radius_y } => {
                Shape::Ellipse(self.ellipse(position, radius_x, radius_y)?)
            }
            ShapeArgs::Polygon => match position {
                Position::Point(start) => Shape::Polygon(self.polygon(start)),
                other => {
                    return Err(CanvasError::UnrecognizedPosition(format!(
                        "polygon start must be a point, got {other:?}"
                    )))
                }
            },
            ShapeArgs::Rectangle { corner } => {
                Shape::Rectangle(self.rectangle(position, corner)?)
            }
            ShapeArgs::Arc {
                radius_x,
                radius_y,
                start,
                end,
            } => Shape::Arc(self.arc(position, radius_x, radius_y, start, end)?),
            ShapeArgs::ArcPie {
                radius_x,
                radius_y,
                start,
                end,
            } => Shape::ArcPie(self.arc_pie(position, radius_x, radius_y, start, end)?),
        };
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use crate::shape::ShapeKind;
    use crate::{Canvas, CanvasError, Point, Shape, ShapeArgs};

    #[test]
    fn test_factory_resolves_named_position() {
        let mut canvas = Canvas::new(100, 100, true).unwrap();
        canvas.create_position("center", Point::new(50, 50));

        let shape = canvas
            .factory("center", ShapeArgs::Circle { radius: 10 })
            .unwrap();
        match shape {
            Shape::Circle(circle) => {
                assert_eq!(circle.center, Point::new(50, 50));
                assert_eq!(circle.radius, 10);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_factory_rectangle_resolves_both_corners() {
        let mut canvas = Canvas::new(100, 100, true).unwrap();
        canvas.create_position("corner", Point::new(80, 60));
        let shape = canvas
            .factory(
                [10, 20],
                ShapeArgs::Rectangle {
                    corner: "corner".into(),
                },
            )
            .unwrap();
        assert_eq!(shape.kind(), Some(ShapeKind::Rectangle));
        if let Shape::Rectangle(rect) = shape {
            assert_eq!(rect.point1, Point::new(10, 20));
            assert_eq!(rect.point2, Point::new(80, 60));
        }
    }

    #[test]
    fn test_factory_arc_pie_kind() {
        let canvas = Canvas::new(100, 100, true).unwrap();
        let shape = canvas
            .factory(
                (50, 50),
                ShapeArgs::ArcPie {
                    radius_x: 20,
                    radius_y: 10,
                    start: 0,
                    end: 90,
                },
            )
            .unwrap();
        assert_eq!(shape.kind(), Some(ShapeKind::ArcPie));
    }

    #[test]
    fn test_factory_polygon_requires_point() {
        let canvas = Canvas::new(100, 100, true).unwrap();
        let shape = canvas.factory((3, 4), ShapeArgs::Polygon).unwrap();
        match shape {
            Shape::Polygon(polygon) => assert_eq!(polygon.vertices(), &[Point::new(3, 4)]),
            other => panic!("expected polygon, got {other:?}"),
        }
        assert!(matches!(
            canvas.factory("origin", ShapeArgs::Polygon),
            Err(CanvasError::UnrecognizedPosition(_))
        ));
    }

    #[test]
    fn test_factory_unregistered_position() {
        let canvas = Canvas::new(100, 100, true).unwrap();
        assert!(matches!(
            canvas.factory("nowhere", ShapeArgs::Circle { radius: 1 }),
            Err(CanvasError::UnregisteredPosition(name)) if name == "nowhere"
        ));
    }

    #[test]
    fn test_factory_bad_coordinate_list() {
        let canvas = Canvas::new(100, 100, true).unwrap();
        assert!(matches!(
            canvas.factory(vec![1, 2, 3], ShapeArgs::Circle { radius: 1 }),
            Err(CanvasError::UnrecognizedPosition(_))
        ));
    }
}
