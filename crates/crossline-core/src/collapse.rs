//! Step-by-step collapse of all segments.
//!
//! The animator never sleeps or schedules anything itself. The host calls
//! [`CollapseAnimator::tick`] once per frame, waiting
//! [`CollapseAnimator::step_delay`] in between, until a tick reports
//! [`StepOutcome::Converged`].

use crate::config::CollapseConfig;
use crate::store::SegmentStore;
use std::time::Duration;

/// Animator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AnimatorState {
    #[default]
    Idle,
    Running {
        /// Steps performed since `start`.
        steps: usize,
    },
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing happened.
    Idle,
    /// At least one segment shrank; tick again after the step delay.
    Advanced,
    /// Nothing shrank; the animator is idle again.
    Converged { steps: usize },
}

/// Drives [`SegmentStore::shrink_step`] until no segment changes.
#[derive(Debug, Clone)]
pub struct CollapseAnimator {
    state: AnimatorState,
    step_delay: Duration,
    /// Safety cap on steps per run.
    max_steps: usize,
}

impl Default for CollapseAnimator {
    fn default() -> Self {
        Self::new(&CollapseConfig::default())
    }
}

impl CollapseAnimator {
    /// Create an idle animator.
    pub fn new(config: &CollapseConfig) -> Self {
        Self {
            state: AnimatorState::Idle,
            step_delay: config.step_delay(),
            max_steps: config.divisor.ceil() as usize + 1,
        }
    }

    /// Check if a collapse is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    /// Delay the host should wait between ticks.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Begin collapsing. Any open segment is discarded first.
    ///
    /// Returns false if a collapse is already running.
    pub fn start(&mut self, store: &mut SegmentStore) -> bool {
        if self.is_running() {
            log::debug!("Collapse already running");
            return false;
        }
        if store.cancel_open_segment() {
            log::debug!("Abandoned open segment before collapsing");
        }
        self.state = AnimatorState::Running { steps: 0 };
        log::info!("Collapse started with {} segment(s)", store.len());
        true
    }

    /// Perform one collapse step.
    pub fn tick(&mut self, store: &mut SegmentStore) -> StepOutcome {
        let AnimatorState::Running { steps } = self.state else {
            return StepOutcome::Idle;
        };

        let changed = store.shrink_step();
        let steps = steps + 1;

        if !changed {
            self.state = AnimatorState::Idle;
            log::info!("Collapse converged after {} step(s)", steps);
            return StepOutcome::Converged { steps };
        }
        if steps >= self.max_steps {
            self.state = AnimatorState::Idle;
            log::warn!(
                "Collapse stopped after {} step(s) with {} segment(s) left",
                steps,
                store.len()
            );
            return StepOutcome::Converged { steps };
        }

        self.state = AnimatorState::Running { steps };
        StepOutcome::Advanced
    }

    /// Tick back-to-back until the collapse finishes.
    ///
    /// Returns the number of steps taken, or zero if not running.
    pub fn run_to_completion(&mut self, store: &mut SegmentStore) -> usize {
        loop {
            match self.tick(store) {
                StepOutcome::Advanced => continue,
                StepOutcome::Converged { steps } => return steps,
                StepOutcome::Idle => return 0,
            }
        }
    }
}
