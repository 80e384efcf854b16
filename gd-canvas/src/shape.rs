//! Geometric shape values.
//!
//! Shapes are inert descriptors: they carry their own geometry and are drawn by
//! [`Canvas::fill`](crate::Canvas::fill) and [`Canvas::stroke`](crate::Canvas::stroke).
//! Arc angles are in degrees, 0 at three o'clock, increasing clockwise.

use crate::error::CanvasError;
use crate::geometry::{Delta, Point, Position};
use std::fmt;
use std::str::FromStr;

/// A circle given by center and radius.
///
/// `radius` is a true radius: the drawn disc is `2 * radius` pixels across.
/// GD's ellipse and arc calls take a width instead, so sizes ported from GD
/// code must be halved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

/// An axis-aligned ellipse given by center and two radii.
///
/// Like [`Circle`], the radii are half the drawn width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: i32,
    pub radius_y: i32,
}

/// A rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub point1: Point,
    pub point2: Point,
}

/// An elliptical arc between two angles (degrees).
///
/// The radii are half the width and height of the full ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub center: Point,
    pub radius_x: i32,
    pub radius_y: i32,
    pub start: i32,
    pub end: i32,
}

/// A polygon built up vertex by vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Start a polygon at its first vertex.
    pub fn new(start: Point) -> Self {
        Self {
            vertices: vec![start],
        }
    }

    pub fn add_vertex(&mut self, vertex: Point) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    /// Append the vertex reached by moving `delta` from the last vertex.
    pub fn add_delta(&mut self, delta: Delta) -> &mut Self {
        let last = self.vertices.last().copied().unwrap_or_default();
        self.vertices.push(last.translated(delta));
        self
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_num(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices flattened as `[x0, y0, x1, y1, ...]`.
    pub fn as_raw_array(&self) -> Vec<i32> {
        self.vertices.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

/// Every value that `fill` and `stroke` accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Rectangle from the pen position to `(delta_x, delta_y)`.
    Delta(Delta),
    Polygon(Polygon),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Circle(Circle),
    /// Arc closed by a chord when filled.
    Arc(Arc),
    /// Arc closed through its center when filled.
    ArcPie(Arc),
}

impl Shape {
    pub fn kind(&self) -> Option<ShapeKind> {
        match self {
            Shape::Delta(_) => None,
            Shape::Polygon(_) => Some(ShapeKind::Polygon),
            Shape::Rectangle(_) => Some(ShapeKind::Rectangle),
            Shape::Ellipse(_) => Some(ShapeKind::Ellipse),
            Shape::Circle(_) => Some(ShapeKind::Circle),
            Shape::Arc(_) => Some(ShapeKind::Arc),
            Shape::ArcPie(_) => Some(ShapeKind::ArcPie),
        }
    }
}

impl From<Delta> for Shape {
    fn from(delta: Delta) -> Self {
        Shape::Delta(delta)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

/// The closed set of shape kinds the factory builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Ellipse,
    Polygon,
    Rectangle,
    Arc,
    ArcPie,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Arc => "arc",
            ShapeKind::ArcPie => "arc_pie",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(ShapeKind::Circle),
            "ellipse" => Ok(ShapeKind::Ellipse),
            "polygon" => Ok(ShapeKind::Polygon),
            "rectangle" => Ok(ShapeKind::Rectangle),
            "arc" => Ok(ShapeKind::Arc),
            "arc_pie" => Ok(ShapeKind::ArcPie),
            other => Err(CanvasError::UnknownShapeKind(other.to_string())),
        }
    }
}

/// Kind-specific arguments for [`Canvas::factory`](crate::Canvas::factory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeArgs {
    Circle {
        radius: i32,
    },
    Ellipse {
        radius_x: i32,
        radius_y: i32,
    },
    Polygon,
    Rectangle {
        corner: Position,
    },
    Arc {
        radius_x: i32,
        radius_y: i32,
        start: i32,
        end: i32,
    },
    ArcPie {
        radius_x: i32,
        radius_y: i32,
        start: i32,
        end: i32,
    },
}

impl ShapeArgs {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeArgs::Circle { .. } => ShapeKind::Circle,
            ShapeArgs::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeArgs::Polygon => ShapeKind::Polygon,
            ShapeArgs::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeArgs::Arc { .. } => ShapeKind::Arc,
            ShapeArgs::ArcPie { .. } => ShapeKind::ArcPie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("circle", ShapeKind::Circle)]
    #[case("ellipse", ShapeKind::Ellipse)]
    #[case("polygon", ShapeKind::Polygon)]
    #[case("rectangle", ShapeKind::Rectangle)]
    #[case("arc", ShapeKind::Arc)]
    #[case("arc_pie", ShapeKind::ArcPie)]
    fn test_kind_tags(#[case] tag: &str, #[case] kind: ShapeKind) {
        assert_eq!(tag.parse::<ShapeKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), tag);
    }

    #[test]
    fn test_unknown_kind_tag() {
        assert!(matches!(
            "hexagon".parse::<ShapeKind>(),
            Err(CanvasError::UnknownShapeKind(tag)) if tag == "hexagon"
        ));
    }

    #[test]
    fn test_polygon_accumulates_vertices() {
        let mut polygon = Polygon::new(Point::new(0, 0));
        polygon
            .add_vertex(Point::new(10, 0))
            .add_delta(Delta::new(0, 10));
        assert_eq!(polygon.vertex_num(), 3);
        assert_eq!(polygon.as_raw_array(), vec![0, 0, 10, 0, 10, 10]);
    }

    #[test]
    fn test_args_kind() {
        assert_eq!(ShapeArgs::Polygon.kind(), ShapeKind::Polygon);
        assert_eq!(
            ShapeArgs::Rectangle {
                corner: (1, 2).into()
            }
            .kind(),
            ShapeKind::Rectangle
        );
    }
}
