//! Straight segments drawn on the surface.

use crate::geometry::LineEquation;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a segment.
pub type SegmentId = Uuid;

/// Which axes moved during a single shrink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShrinkOutcome {
    pub moved_x: bool,
    pub moved_y: bool,
}

impl ShrinkOutcome {
    /// Whether the segment changed length at all.
    pub fn changed(&self) -> bool {
        self.moved_x || self.moved_y
    }

    /// Whether neither axis could shrink any further.
    pub fn exhausted(&self) -> bool {
        !self.changed()
    }
}

/// A directed segment with its cached line equation.
///
/// Endpoints are private so the equation is always rebuilt together with
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    id: SegmentId,
    from: Point,
    to: Point,
    equation: LineEquation,
    /// Per-axis shrink rate, zero until the segment is closed.
    delta: Vec2,
    closed: bool,
}

impl Segment {
    /// Start a zero-length open segment at `point`.
    pub fn open(point: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: point,
            to: point,
            equation: LineEquation::through(point, point),
            delta: Vec2::ZERO,
            closed: false,
        }
    }

    /// Build a closed segment directly from two endpoints.
    pub fn closed(from: Point, to: Point, divisor: f64) -> Self {
        let mut segment = Self::open(from);
        segment.set_end(to);
        segment.close(divisor);
        segment
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn equation(&self) -> &LineEquation {
        &self.equation
    }

    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Move the free endpoint and refresh the line equation.
    pub fn set_end(&mut self, point: Point) {
        self.to = point;
        self.refresh_equation();
    }

    /// Fix the shrink rate from the current extent.
    pub fn close(&mut self, divisor: f64) {
        let extent = self.extent();
        self.delta = Vec2::new(extent.x / divisor, extent.y / divisor);
        self.closed = true;
    }

    /// Absolute size along each axis.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            (self.to.x - self.from.x).abs(),
            (self.to.y - self.from.y).abs(),
        )
    }

    /// Pull both endpoints toward each other by one step of `delta`.
    ///
    /// An axis only moves while its extent exceeds its delta, and never by
    /// more than half its extent, so the direction of the segment is kept.
    pub fn shrink(&mut self) -> ShrinkOutcome {
        if !self.closed {
            return ShrinkOutcome::default();
        }
        let extent = self.extent();
        let moved_x = extent.x > self.delta.x;
        let moved_y = extent.y > self.delta.y;

        if moved_x {
            let step = self.delta.x.min(extent.x / 2.0);
            let (from, to) = pull_together(self.from.x, self.to.x, step);
            self.from.x = from;
            self.to.x = to;
        }
        if moved_y {
            let step = self.delta.y.min(extent.y / 2.0);
            let (from, to) = pull_together(self.from.y, self.to.y, step);
            self.from.y = from;
            self.to.y = to;
        }
        if moved_x || moved_y {
            self.refresh_equation();
        }

        ShrinkOutcome { moved_x, moved_y }
    }

    fn refresh_equation(&mut self) {
        self.equation = LineEquation::through(self.from, self.to);
    }
}

fn pull_together(from: f64, to: f64, step: f64) -> (f64, f64) {
    if from < to {
        (from + step, to - step)
    } else {
        (from - step, to + step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_segment_is_degenerate() {
        let seg = Segment::open(Point::new(10.0, 10.0));
        assert_eq!(seg.from(), seg.to());
        assert_eq!(seg.delta(), Vec2::ZERO);
        assert!(!seg.is_closed());
        assert!(seg.equation().is_vertical());
    }

    #[test]
    fn test_set_end_refreshes_equation() {
        let mut seg = Segment::open(Point::new(0.0, 0.0));
        seg.set_end(Point::new(10.0, 20.0));
        assert_eq!(
            *seg.equation(),
            LineEquation::through(Point::new(0.0, 0.0), Point::new(10.0, 20.0))
        );
        seg.set_end(Point::new(0.0, 20.0));
        assert_eq!(*seg.equation(), LineEquation::Vertical { x: 0.0 });
    }

    #[test]
    fn test_close_sets_delta() {
        let seg = Segment::closed(Point::new(0.0, 100.0), Point::new(750.0, 25.0), 750.0);
        assert!(seg.is_closed());
        assert!((seg.delta().x - 1.0).abs() < f64::EPSILON);
        assert!((seg.delta().y - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_shrink_moves_toward_center() {
        let mut seg = Segment::closed(Point::new(100.0, 0.0), Point::new(0.0, 50.0), 10.0);
        let mid = seg.from().midpoint(seg.to());
        let outcome = seg.shrink();
        assert!(outcome.moved_x && outcome.moved_y);
        assert!((seg.from().x - 90.0).abs() < 1e-12);
        assert!((seg.to().x - 10.0).abs() < 1e-12);
        assert!((seg.from().y - 5.0).abs() < 1e-12);
        assert!((seg.to().y - 45.0).abs() < 1e-12);
        assert!((seg.from().midpoint(seg.to()) - mid).hypot() < 1e-12);
    }

    #[test]
    fn test_shrink_never_flips_direction() {
        let mut seg = Segment::closed(Point::new(0.0, 0.0), Point::new(30.0, -12.0), 4.0);
        let sign_x = (seg.to().x - seg.from().x).signum();
        let sign_y = (seg.to().y - seg.from().y).signum();
        let mut previous = seg.extent();
        for _ in 0..10 {
            let outcome = seg.shrink();
            let extent = seg.extent();
            if outcome.moved_x {
                assert!(extent.x < previous.x);
            } else {
                assert_eq!(extent.x, previous.x);
            }
            if outcome.moved_y {
                assert!(extent.y < previous.y);
            } else {
                assert_eq!(extent.y, previous.y);
            }
            let dx = seg.to().x - seg.from().x;
            let dy = seg.to().y - seg.from().y;
            assert!(dx == 0.0 || dx.signum() == sign_x);
            assert!(dy == 0.0 || dy.signum() == sign_y);
            previous = extent;
        }
    }

    #[test]
    fn test_shrink_exhausts_within_divisor_steps() {
        let divisor = 20.0;
        let mut seg = Segment::closed(Point::new(3.0, 7.0), Point::new(250.0, -90.0), divisor);
        let mut steps = 0;
        while seg.shrink().changed() {
            steps += 1;
            assert!(steps <= divisor as usize);
        }
    }

    #[test]
    fn test_open_segment_does_not_shrink() {
        let mut seg = Segment::open(Point::new(0.0, 0.0));
        seg.set_end(Point::new(40.0, 40.0));
        assert!(seg.shrink().exhausted());
        assert_eq!(seg.to(), Point::new(40.0, 40.0));
    }

    #[test]
    fn test_zero_length_is_exhausted() {
        let mut seg = Segment::closed(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 750.0);
        assert!(seg.shrink().exhausted());
    }
}
