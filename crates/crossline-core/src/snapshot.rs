//! Read-only copies of the store handed to renderers.

use crate::segment::{Segment, SegmentId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Endpoints of a single segment as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub id: SegmentId,
    pub from: Point,
    pub to: Point,
}

impl From<&Segment> for SegmentView {
    fn from(segment: &Segment) -> Self {
        Self {
            id: segment.id(),
            from: segment.from(),
            to: segment.to(),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Segments in insertion order, including the open one.
    pub segments: Vec<SegmentView>,
    /// Permanent intersection markers.
    pub intersections: Vec<Point>,
    /// Markers of the segment being drawn.
    pub live_intersections: Vec<Point>,
    /// Whether a segment is currently open.
    pub drawing: bool,
}

impl Snapshot {
    /// Check if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
            && self.intersections.is_empty()
            && self.live_intersections.is_empty()
    }
}
