//! Line equations and bounded crossing tests.

use crate::config::Tolerances;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The infinite line supporting a segment.
///
/// Vertical lines have no slope, so they carry their x coordinate instead
/// of overloading a zero slope and intercept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineEquation {
    /// `x = x`.
    Vertical { x: f64 },
    /// `y = slope * x + intercept`.
    Sloped { slope: f64, intercept: f64 },
}

impl LineEquation {
    /// Equation of the line through two points.
    ///
    /// Coincident points produce a vertical line through that point.
    pub fn through(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        if dx == 0.0 {
            return LineEquation::Vertical { x: from.x };
        }
        let slope = (to.y - from.y) / dx;
        let intercept = (from.y * to.x - to.y * from.x) / dx;
        LineEquation::Sloped { slope, intercept }
    }

    /// Whether this line is vertical.
    pub fn is_vertical(&self) -> bool {
        matches!(self, LineEquation::Vertical { .. })
    }

    /// Evaluate `y` at `x`. Vertical lines have no single value.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            LineEquation::Vertical { .. } => None,
            LineEquation::Sloped { slope, intercept } => Some(slope * x + intercept),
        }
    }

    /// Whether two lines are parallel (or the same line).
    pub fn is_parallel_to(&self, other: &LineEquation, epsilon: f64) -> bool {
        match (*self, *other) {
            (LineEquation::Vertical { .. }, LineEquation::Vertical { .. }) => true,
            (LineEquation::Sloped { slope: a, .. }, LineEquation::Sloped { slope: b, .. }) => {
                (a - b).abs() <= epsilon
            }
            _ => false,
        }
    }

    /// Point where the two infinite lines cross, if they are not parallel.
    pub fn crossing(&self, other: &LineEquation, epsilon: f64) -> Option<Point> {
        if self.is_parallel_to(other, epsilon) {
            return None;
        }
        match (*self, *other) {
            (LineEquation::Vertical { x }, sloped) | (sloped, LineEquation::Vertical { x }) => {
                sloped.y_at(x).map(|y| Point::new(x, y))
            }
            (
                LineEquation::Sloped { slope: a1, intercept: b1 },
                LineEquation::Sloped { slope: a2, intercept: b2 },
            ) => {
                let x = (b2 - b1) / (a1 - a2);
                let y = (a1 * b2 - a2 * b1) / (a1 - a2);
                Some(Point::new(x, y))
            }
        }
    }
}

/// Closed axis-aligned extent of a segment, independent of endpoint order.
pub fn extent_rect(from: Point, to: Point) -> Rect {
    Rect::from_points(from, to)
}

/// Closed containment test with `slack` added on every side.
///
/// `kurbo::Rect::contains` is half-open, which would reject points on the
/// far edge of a segment's extent.
pub fn within_extent(rect: Rect, point: Point, slack: f64) -> bool {
    point.x >= rect.x0 - slack
        && point.x <= rect.x1 + slack
        && point.y >= rect.y0 - slack
        && point.y <= rect.y1 + slack
}

/// Crossing of two bounded segments, each given by its endpoints and
/// cached equation.
pub fn segment_crossing(
    a: (Point, Point, &LineEquation),
    b: (Point, Point, &LineEquation),
    tolerances: Tolerances,
) -> Option<Point> {
    let point = a.2.crossing(b.2, tolerances.parallel)?;
    let inside_a = within_extent(extent_rect(a.0, a.1), point, tolerances.containment);
    let inside_b = within_extent(extent_rect(b.0, b.1), point, tolerances.containment);
    (inside_a && inside_b).then_some(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> (Point, Point, LineEquation) {
        let from = Point::new(x0, y0);
        let to = Point::new(x1, y1);
        (from, to, LineEquation::through(from, to))
    }

    fn crossing(
        a: &(Point, Point, LineEquation),
        b: &(Point, Point, LineEquation),
    ) -> Option<Point> {
        segment_crossing((a.0, a.1, &a.2), (b.0, b.1, &b.2), Tolerances::default())
    }

    #[test]
    fn test_equation_sloped() {
        let eq = LineEquation::through(Point::new(0.0, 1.0), Point::new(2.0, 5.0));
        match eq {
            LineEquation::Sloped { slope, intercept } => {
                assert!((slope - 2.0).abs() < TOL);
                assert!((intercept - 1.0).abs() < TOL);
            }
            LineEquation::Vertical { .. } => panic!("expected sloped line"),
        }
    }

    #[test]
    fn test_equation_vertical() {
        let eq = LineEquation::through(Point::new(3.0, 0.0), Point::new(3.0, 10.0));
        assert_eq!(eq, LineEquation::Vertical { x: 3.0 });
        assert!(eq.y_at(3.0).is_none());
    }

    #[test]
    fn test_equation_reversed_endpoints() {
        let a = LineEquation::through(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        let b = LineEquation::through(Point::new(4.0, 2.0), Point::new(0.0, 0.0));
        let (
            LineEquation::Sloped {
                slope: s1,
                intercept: i1,
            },
            LineEquation::Sloped {
                slope: s2,
                intercept: i2,
            },
        ) = (a, b)
        else {
            panic!("expected sloped lines");
        };
        assert!((s1 - s2).abs() < TOL);
        assert!((i1 - i2).abs() < TOL);
    }

    #[test]
    fn test_cross_perpendicular() {
        let h = line(0.0, 0.0, 100.0, 0.0);
        let v = line(50.0, -50.0, 50.0, 50.0);
        let p = crossing(&h, &v).unwrap();
        assert!((p.x - 50.0).abs() < TOL);
        assert!(p.y.abs() < TOL);
    }

    #[test]
    fn test_cross_diagonals() {
        let a = line(0.0, 0.0, 10.0, 10.0);
        let b = line(0.0, 10.0, 10.0, 0.0);
        let p = crossing(&a, &b).unwrap();
        assert!((p.x - 5.0).abs() < TOL);
        assert!((p.y - 5.0).abs() < TOL);
        // The point lies on both supporting lines.
        assert!((a.2.y_at(p.x).unwrap() - p.y).abs() < TOL);
        assert!((b.2.y_at(p.x).unwrap() - p.y).abs() < TOL);
    }

    #[test]
    fn test_lines_cross_outside_segments() {
        let a = line(0.0, 0.0, 10.0, 10.0);
        let b = line(20.0, 0.0, 30.0, -10.0);
        assert!(a.2.crossing(&b.2, TOL).is_some());
        assert!(crossing(&a, &b).is_none());
    }

    #[test]
    fn test_parallel_never_cross() {
        let a = line(0.0, 0.0, 10.0, 10.0);
        let b = line(0.0, 0.0, 20.0, 20.0);
        assert!(crossing(&a, &b).is_none());

        let c = line(0.0, 5.0, 10.0, 15.0);
        assert!(crossing(&a, &c).is_none());
    }

    #[test]
    fn test_two_verticals_never_cross() {
        let a = line(5.0, 0.0, 5.0, 10.0);
        let b = line(5.0, 5.0, 5.0, 20.0);
        assert!(crossing(&a, &b).is_none());
    }

    #[test]
    fn test_near_parallel_treated_as_parallel() {
        let a = LineEquation::Sloped { slope: 1.0, intercept: 0.0 };
        let b = LineEquation::Sloped { slope: 1.0 + 1e-12, intercept: 1.0 };
        assert!(a.crossing(&b, 1e-9).is_none());
        assert!(a.crossing(&b, 0.0).is_some());
    }

    #[test]
    fn test_vertical_through_origin_is_not_horizontal() {
        // A vertical segment at x = 0 and a horizontal segment at y = 5.
        let v = line(0.0, 0.0, 0.0, 10.0);
        let h = line(-5.0, 5.0, 5.0, 5.0);
        let p = crossing(&v, &h).unwrap();
        assert!(p.x.abs() < TOL);
        assert!((p.y - 5.0).abs() < TOL);
    }

    #[test]
    fn test_touching_endpoint_counts() {
        let a = line(0.0, 0.0, 10.0, 0.0);
        let b = line(10.0, -5.0, 10.0, 5.0);
        assert!(crossing(&a, &b).is_some());
    }

    #[test]
    fn test_within_extent_closed() {
        let rect = extent_rect(Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        assert!(within_extent(rect, Point::new(10.0, 10.0), 0.0));
        assert!(within_extent(rect, Point::new(0.0, 0.0), 0.0));
        assert!(!within_extent(rect, Point::new(10.1, 5.0), 0.0));
        assert!(within_extent(rect, Point::new(10.1, 5.0), 0.2));
    }
}
