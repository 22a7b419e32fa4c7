//! CrossLine Core Library
//!
//! Straight segments drawn by dragging, the points where they cross, and
//! the animation that shrinks every segment until nothing is left.

pub mod collapse;
pub mod config;
pub mod geometry;
pub mod input;
pub mod segment;
pub mod sketchpad;
pub mod snapshot;
pub mod store;

pub use collapse::{CollapseAnimator, StepOutcome};
pub use config::{CollapseConfig, ConfigError, ConfigResult, Tolerances};
pub use geometry::LineEquation;
pub use input::{MouseButton, PointerEvent};
pub use segment::{Segment, SegmentId, ShrinkOutcome};
pub use sketchpad::{Sketchpad, Surface};
pub use snapshot::{SegmentView, Snapshot};
pub use store::{compute_intersections, SegmentStore};
