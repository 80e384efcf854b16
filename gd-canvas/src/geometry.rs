//! Points, displacements and point-like position arguments.

/// An integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate this point in place.
    pub fn move_by(&mut self, delta: Delta) {
        self.x += delta.delta_x;
        self.y += delta.delta_y;
    }

    /// Return a copy translated by `delta`.
    pub fn translated(self, delta: Delta) -> Self {
        let mut moved = self;
        moved.move_by(delta);
        moved
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// A displacement, also used as the second corner of pen rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Delta {
    pub delta_x: i32,
    pub delta_y: i32,
}

impl Delta {
    pub const fn new(delta_x: i32, delta_y: i32) -> Self {
        Self { delta_x, delta_y }
    }
}

/// Anything a canvas can resolve into a [`Point`].
///
/// Names are looked up in the canvas's named positions. Coordinate lists must
/// contain exactly two values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Point(Point),
    Named(String),
    Coords(Vec<i32>),
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Position::Point(point)
    }
}

impl From<&str> for Position {
    fn from(name: &str) -> Self {
        Position::Named(name.to_string())
    }
}

impl From<String> for Position {
    fn from(name: String) -> Self {
        Position::Named(name)
    }
}

impl From<(i32, i32)> for Position {
    fn from(pair: (i32, i32)) -> Self {
        Position::Point(pair.into())
    }
}

impl From<[i32; 2]> for Position {
    fn from([x, y]: [i32; 2]) -> Self {
        Position::Point(Point::new(x, y))
    }
}

impl From<&[i32]> for Position {
    fn from(coords: &[i32]) -> Self {
        Position::Coords(coords.to_vec())
    }
}

impl From<Vec<i32>> for Position {
    fn from(coords: Vec<i32>) -> Self {
        Position::Coords(coords)
    }
}
