//! Elliptical arcs using bezier curve approximation.
//!
//! tiny-skia does not support arc primitives directly, so arcs are approximated
//! with cubic bezier curves. Angles are whole degrees measured clockwise from
//! three o'clock (screen coordinates, y down).

use std::f32::consts::PI;
use tiny_skia::PathBuilder;

/// How the ends of an arc are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcClose {
    /// Leave the arc open (outline only).
    #[default]
    Open,
    /// Join the end points with a straight segment.
    Chord,
    /// Join both end points to the center.
    Pie,
}

/// Normalize an angle span to `start` in `[0, 360)` and `end >= start`.
///
/// Spans whose ends coincide modulo 360 become a full turn.
pub fn normalize_degrees(start: i32, end: i32) -> (i32, i32) {
    if start.rem_euclid(360) == end.rem_euclid(360) {
        return (0, 360);
    }
    let start = start.rem_euclid(360);
    let mut end = end.rem_euclid(360);
    while end < start {
        end += 360;
    }
    (start, end)
}

/// Add an elliptical arc to the path.
///
/// # Arguments
/// * `path` - The path builder to add the arc to
/// * `cx` - X coordinate of the ellipse center
/// * `cy` - Y coordinate of the ellipse center
/// * `radius_x` - X radius of the ellipse
/// * `radius_y` - Y radius of the ellipse
/// * `start` - Starting angle in degrees
/// * `end` - Ending angle in degrees
/// * `close` - How to close the arc
#[allow(clippy::too_many_arguments)]
pub fn ellipse_arc(
    path: &mut PathBuilder,
    cx: f32,
    cy: f32,
    radius_x: f32,
    radius_y: f32,
    start: i32,
    end: i32,
    close: ArcClose,
) {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return;
    }

    let (start, end) = normalize_degrees(start, end);
    let start = (start as f32).to_radians();
    let end = (end as f32).to_radians();

    // One segment per quarter turn keeps the bezier error well under a pixel
    let angle_span = end - start;
    let num_segments = ((angle_span / (PI / 2.0)).ceil() as usize).max(1);
    let segment_angle = angle_span / num_segments as f32;

    let start_x = cx + radius_x * start.cos();
    let start_y = cy + radius_y * start.sin();

    if close == ArcClose::Pie {
        path.move_to(cx, cy);
        path.line_to(start_x, start_y);
    } else {
        path.move_to(start_x, start_y);
    }

    for i in 0..num_segments {
        let angle1 = start + i as f32 * segment_angle;
        let angle2 = start + (i + 1) as f32 * segment_angle;

        arc_segment(path, cx, cy, radius_x, radius_y, angle1, angle2);
    }

    if close != ArcClose::Open {
        path.close();
    }
}

/// Add a single arc segment as a cubic bezier curve.
fn arc_segment(
    path: &mut PathBuilder,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    angle1: f32,
    angle2: f32,
) {
    // Calculate bezier control point factor
    let angle_diff = angle2 - angle1;
    let k = 4.0 / 3.0 * (angle_diff / 4.0).tan();

    // Points on the unit circle
    let x1 = angle1.cos();
    let y1 = angle1.sin();
    let x2 = angle2.cos();
    let y2 = angle2.sin();

    // Control points on the unit circle
    let cp1x = x1 - k * y1;
    let cp1y = y1 + k * x1;
    let cp2x = x2 + k * y2;
    let cp2y = y2 - k * x2;

    path.cubic_to(
        cx + rx * cp1x,
        cy + ry * cp1y,
        cx + rx * cp2x,
        cy + ry * cp2y,
        cx + rx * x2,
        cy + ry * y2,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 90, (0, 90))]
    #[case(270, 90, (270, 450))]
    #[case(-90, 0, (270, 360))]
    #[case(0, 360, (0, 360))]
    #[case(45, 45, (0, 360))]
    #[case(400, 100, (40, 100))]
    fn test_normalize_degrees(#[case] start: i32, #[case] end: i32, #[case] expected: (i32, i32)) {
        assert_eq!(normalize_degrees(start, end), expected);
    }

    #[test]
    fn test_full_ellipse() {
        let mut builder = PathBuilder::new();
        ellipse_arc(&mut builder, 50.0, 50.0, 40.0, 20.0, 0, 360, ArcClose::Chord);
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        assert!((bounds.left() - 10.0).abs() < 0.5);
        assert!((bounds.right() - 90.0).abs() < 0.5);
        assert!((bounds.top() - 30.0).abs() < 0.5);
        assert!((bounds.bottom() - 70.0).abs() < 0.5);
    }

    #[test]
    fn test_quarter_pie_includes_center() {
        let mut builder = PathBuilder::new();
        ellipse_arc(&mut builder, 50.0, 50.0, 40.0, 40.0, 0, 90, ArcClose::Pie);
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        // Clockwise from three o'clock to six o'clock: the lower-right quadrant
        assert!((bounds.left() - 50.0).abs() < 0.5);
        assert!((bounds.top() - 50.0).abs() < 0.5);
        assert!((bounds.right() - 90.0).abs() < 0.5);
        assert!((bounds.bottom() - 90.0).abs() < 0.5);
    }

    #[test]
    fn test_degenerate_radius_adds_nothing() {
        let mut builder = PathBuilder::new();
        ellipse_arc(&mut builder, 0.0, 0.0, 0.0, 10.0, 0, 180, ArcClose::Open);
        assert!(builder.finish().is_none());
    }
}
