//! Segment storage and intersection bookkeeping.

use crate::config::{CollapseConfig, Tolerances};
use crate::geometry::segment_crossing;
use crate::segment::{Segment, SegmentId};
use crate::snapshot::{SegmentView, Snapshot};
use kurbo::Point;

/// Whether a segment is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DrawState {
    /// No segment is open.
    #[default]
    Idle,
    /// The last segment in the store is open.
    Open,
}

/// Intersections of `subject` with every candidate whose line is not
/// parallel to it and whose extent shares the crossing point.
///
/// Coincident crossings are kept as separate entries.
pub fn compute_intersections<'a>(
    subject: &Segment,
    candidates: impl IntoIterator<Item = &'a Segment>,
    tolerances: Tolerances,
) -> Vec<Point> {
    let subject_parts = (subject.from(), subject.to(), subject.equation());
    candidates
        .into_iter()
        .filter_map(|candidate| {
            segment_crossing(
                subject_parts,
                (candidate.from(), candidate.to(), candidate.equation()),
                tolerances,
            )
        })
        .collect()
}

/// Ids of the two segments that own a crossing, in insertion order.
type SegmentPair = (SegmentId, SegmentId);

/// Every pairwise crossing within `segments`, tagged with its owners.
fn pairwise_crossings(
    segments: &[&Segment],
    tolerances: Tolerances,
) -> Vec<(SegmentPair, Point)> {
    let mut crossings = Vec::new();
    for (i, subject) in segments.iter().enumerate() {
        let subject_parts = (subject.from(), subject.to(), subject.equation());
        for other in &segments[i + 1..] {
            let crossing = segment_crossing(
                subject_parts,
                (other.from(), other.to(), other.equation()),
                tolerances,
            );
            if let Some(point) = crossing {
                crossings.push(((subject.id(), other.id()), point));
            }
        }
    }
    crossings
}

/// Owns committed segments, the open segment and the markers derived
/// from them.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    /// Segments in insertion order. When drawing, the open one is last.
    segments: Vec<Segment>,
    /// Permanent markers between closed segments.
    intersections: Vec<Point>,
    /// Markers between the open segment and all others.
    live_intersections: Vec<Point>,
    /// Crossings whose marker was pruned during a collapse. They stay
    /// hidden even after the endpoint that hid them moves on.
    pruned: Vec<SegmentPair>,
    state: DrawState,
    config: CollapseConfig,
    redraw_requested: bool,
}

impl SegmentStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given settings.
    pub fn with_config(config: CollapseConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Check if a segment is open.
    pub fn is_drawing(&self) -> bool {
        self.state == DrawState::Open
    }

    /// All segments, including the open one.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segment being drawn, if any.
    pub fn open_segment(&self) -> Option<&Segment> {
        match self.state {
            DrawState::Open => self.segments.last(),
            DrawState::Idle => None,
        }
    }

    pub fn intersections(&self) -> &[Point] {
        &self.intersections
    }

    pub fn live_intersections(&self) -> &[Point] {
        &self.live_intersections
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the store holds no segments and no markers.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
            && self.intersections.is_empty()
            && self.live_intersections.is_empty()
    }

    /// Consume the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Open a new zero-length segment at `point`.
    ///
    /// Returns false if a segment is already open.
    pub fn begin_segment(&mut self, point: Point) -> bool {
        if self.is_drawing() {
            log::debug!("Ignoring begin at {:?}: a segment is already open", point);
            return false;
        }
        self.segments.push(Segment::open(point));
        self.state = DrawState::Open;
        log::debug!("Opened segment at {:?}", point);
        true
    }

    /// Move the free end of the open segment and refresh live markers.
    ///
    /// Returns false if no segment is open.
    pub fn update_open_endpoint(&mut self, point: Point) -> bool {
        let Some(open) = self.open_segment_mut() else {
            return false;
        };
        open.set_end(point);
        self.refresh_live_intersections();
        self.redraw_requested = true;
        true
    }

    /// Finish the open segment at `point` and keep its markers.
    ///
    /// Returns false if no segment is open.
    pub fn commit_open_segment(&mut self, point: Point) -> bool {
        if !self.update_open_endpoint(point) {
            log::debug!("Ignoring commit at {:?}: no open segment", point);
            return false;
        }
        let divisor = self.config.divisor;
        if let Some(open) = self.segments.last_mut() {
            open.close(divisor);
        }
        let found = self.live_intersections.len();
        self.intersections.append(&mut self.live_intersections);
        self.state = DrawState::Idle;
        log::debug!(
            "Committed segment #{} with {} new intersection(s)",
            self.segments.len(),
            found
        );
        true
    }

    /// Drop the open segment and its live markers.
    ///
    /// Returns false if no segment is open.
    pub fn cancel_open_segment(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.segments.pop();
        self.live_intersections.clear();
        self.state = DrawState::Idle;
        self.redraw_requested = true;
        log::debug!("Canceled open segment");
        true
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.intersections.clear();
        self.live_intersections.clear();
        self.pruned.clear();
        self.state = DrawState::Idle;
        self.redraw_requested = true;
    }

    /// Shrink every closed segment by one step.
    ///
    /// Segments that could not shrink on either axis are dropped. The
    /// permanent markers are then rebuilt from the survivors. A crossing
    /// within the marker radius of an endpoint that just moved is pruned,
    /// and a pruned crossing never comes back. Returns whether any segment
    /// changed length.
    pub fn shrink_step(&mut self) -> bool {
        let mut changed = false;
        let mut moved_endpoints = Vec::new();
        let mut retained = Vec::with_capacity(self.segments.len());

        for mut segment in std::mem::take(&mut self.segments) {
            if !segment.is_closed() {
                retained.push(segment);
                continue;
            }
            if segment.shrink().exhausted() {
                log::debug!("Segment {} fully collapsed", segment.id());
                continue;
            }
            changed = true;
            moved_endpoints.push(segment.from());
            moved_endpoints.push(segment.to());
            retained.push(segment);
        }
        self.segments = retained;

        let radius = self.config.marker_radius;
        let closed: Vec<&Segment> = self.segments.iter().filter(|s| s.is_closed()).collect();
        let mut kept = Vec::new();
        for (pair, point) in pairwise_crossings(&closed, self.config.tolerances()) {
            if self.pruned.contains(&pair) {
                continue;
            }
            if near_any(point, &moved_endpoints, radius) {
                self.pruned.push(pair);
                continue;
            }
            kept.push(point);
        }
        self.intersections = kept;
        let survivors: Vec<SegmentId> = self.segments.iter().map(Segment::id).collect();
        self.pruned.retain(|(a, b)| survivors.contains(a) && survivors.contains(b));
        if self.is_drawing() {
            self.refresh_live_intersections();
        }

        self.redraw_requested = true;
        changed
    }

    /// Copy the current state for a renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.segments.iter().map(SegmentView::from).collect(),
            intersections: self.intersections.clone(),
            live_intersections: self.live_intersections.clone(),
            drawing: self.is_drawing(),
        }
    }

    fn open_segment_mut(&mut self) -> Option<&mut Segment> {
        match self.state {
            DrawState::Open => self.segments.last_mut(),
            DrawState::Idle => None,
        }
    }

    fn refresh_live_intersections(&mut self) {
        let tolerances = self.config.tolerances();
        self.live_intersections = match self.segments.split_last() {
            Some((open, others)) if self.state == DrawState::Open => {
                compute_intersections(open, others, tolerances)
            }
            _ => Vec::new(),
        };
    }
}

/// Per-axis proximity: both offsets must be under `radius`.
fn near_any(point: Point, endpoints: &[Point], radius: f64) -> bool {
    endpoints
        .iter()
        .any(|end| (point.x - end.x).abs() < radius && (point.y - end.y).abs() < radius)
}
