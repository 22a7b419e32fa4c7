//! Entry point for the host: routes pointer input and the collapse trigger
//! into the store and pushes frames to the surface.

use crate::collapse::{CollapseAnimator, StepOutcome};
use crate::config::CollapseConfig;
use crate::input::{MouseButton, PointerEvent};
use crate::snapshot::Snapshot;
use crate::store::SegmentStore;
use kurbo::Point;
use std::time::Duration;

/// Something that can show a frame.
///
/// The surface receives a detached copy and cannot reach back into the
/// store.
pub trait Surface {
    fn redraw(&mut self, snapshot: &Snapshot);
}

/// Drawing surface state: segments, collapse animation and the surface
/// that displays them.
pub struct Sketchpad<S: Surface> {
    store: SegmentStore,
    animator: CollapseAnimator,
    surface: S,
}

impl<S: Surface> Sketchpad<S> {
    /// Create a sketchpad with default settings.
    pub fn new(surface: S) -> Self {
        Self::with_config(CollapseConfig::default(), surface)
    }

    /// Create a sketchpad with the given settings.
    pub fn with_config(config: CollapseConfig, surface: S) -> Self {
        Self {
            animator: CollapseAnimator::new(&config),
            store: SegmentStore::with_config(config),
            surface,
        }
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give back the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Check if a collapse is in progress.
    pub fn is_collapsing(&self) -> bool {
        self.animator.is_running()
    }

    /// Delay the host should wait between [`Sketchpad::tick`] calls.
    pub fn step_delay(&self) -> Duration {
        self.animator.step_delay()
    }

    /// Primary press begins or finishes a segment; secondary press cancels
    /// the open one.
    pub fn on_pointer_down(&mut self, point: Point, button: MouseButton) {
        if self.rejects_input("pointer down") {
            return;
        }
        match button {
            MouseButton::Primary => {
                if self.store.is_drawing() {
                    self.store.commit_open_segment(point);
                } else {
                    self.store.begin_segment(point);
                }
            }
            MouseButton::Secondary => {
                self.store.cancel_open_segment();
            }
            MouseButton::Middle => {}
        }
        self.flush();
    }

    /// Drag the free end of the open segment, if any.
    pub fn on_pointer_move(&mut self, point: Point) {
        if self.rejects_input("pointer move") {
            return;
        }
        self.store.update_open_endpoint(point);
        self.flush();
    }

    /// Route a pointer event to the matching handler.
    pub fn dispatch(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => self.on_pointer_down(position, button),
            PointerEvent::Move { position } => self.on_pointer_move(position),
        }
    }

    /// Start collapsing all segments.
    pub fn on_trigger(&mut self) {
        self.animator.start(&mut self.store);
        self.flush();
    }

    /// Advance a running collapse by one step.
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = self.animator.tick(&mut self.store);
        self.flush();
        outcome
    }

    /// Finish a running collapse without waiting between steps.
    pub fn collapse_now(&mut self) -> usize {
        loop {
            match self.tick() {
                StepOutcome::Advanced => {}
                StepOutcome::Converged { steps } => return steps,
                StepOutcome::Idle => return 0,
            }
        }
    }

    /// Copy the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    fn rejects_input(&self, what: &str) -> bool {
        if self.animator.is_running() {
            log::debug!("Ignoring {} while collapsing", what);
            return true;
        }
        false
    }

    fn flush(&mut self) {
        if self.store.take_redraw_request() {
            let snapshot = self.store.snapshot();
            self.surface.redraw(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Frames(Vec<Snapshot>);

    impl Surface for Frames {
        fn redraw(&mut self, snapshot: &Snapshot) {
            self.0.push(snapshot.clone());
        }
    }

    #[test]
    fn test_primary_clicks_draw_segment() {
        let mut pad = Sketchpad::new(Frames::default());
        pad.on_pointer_down(Point::new(0.0, 0.0), MouseButton::Primary);
        assert!(pad.store().is_drawing());
        assert!(pad.surface().0.is_empty());

        pad.on_pointer_move(Point::new(50.0, 10.0));
        pad.on_pointer_down(Point::new(100.0, 0.0), MouseButton::Primary);
        assert!(!pad.store().is_drawing());
        assert_eq!(pad.surface().0.len(), 2);

        let last = pad.surface().0.last().unwrap();
        assert_eq!(last.segments.len(), 1);
        assert_eq!(last.segments[0].to, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_secondary_cancels() {
        let mut pad = Sketchpad::new(Frames::default());
        pad.on_pointer_down(Point::new(0.0, 0.0), MouseButton::Primary);
        pad.on_pointer_move(Point::new(50.0, 10.0));
        pad.on_pointer_down(Point::new(50.0, 10.0), MouseButton::Secondary);
        assert!(pad.snapshot().is_empty());
        assert!(!pad.snapshot().drawing);
    }

    #[test]
    fn test_move_without_open_segment_does_not_redraw() {
        let mut pad = Sketchpad::new(Frames::default());
        pad.on_pointer_move(Point::new(5.0, 5.0));
        pad.on_pointer_down(Point::new(5.0, 5.0), MouseButton::Secondary);
        pad.on_pointer_down(Point::new(5.0, 5.0), MouseButton::Middle);
        assert!(pad.surface().0.is_empty());
    }

    #[test]
    fn test_input_rejected_while_collapsing() {
        let mut pad = Sketchpad::new(Frames::default());
        pad.dispatch(PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Primary,
        });
        pad.dispatch(PointerEvent::Down {
            position: Point::new(100.0, 0.0),
            button: MouseButton::Primary,
        });
        pad.on_trigger();
        assert!(pad.is_collapsing());

        pad.on_pointer_down(Point::new(10.0, 10.0), MouseButton::Primary);
        assert!(!pad.store().is_drawing());
        assert_eq!(pad.store().len(), 1);

        pad.collapse_now();
        assert!(!pad.is_collapsing());
        pad.on_pointer_down(Point::new(10.0, 10.0), MouseButton::Primary);
        assert!(pad.store().is_drawing());
    }

    #[test]
    fn test_every_tick_redraws() {
        let mut pad = Sketchpad::new(Frames::default());
        pad.on_pointer_down(Point::new(0.0, 0.0), MouseButton::Primary);
        pad.on_pointer_down(Point::new(100.0, 0.0), MouseButton::Primary);
        let before = pad.surface().0.len();

        pad.on_trigger();
        let steps = pad.collapse_now();
        assert_eq!(pad.surface().0.len(), before + steps);
        assert!(pad.surface().0.last().unwrap().is_empty());
    }
}
