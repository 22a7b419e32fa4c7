//! Replay of a script against a sketchpad.

use crate::script::{Script, ScriptEvent, ScriptResult};
use crossline_core::{Sketchpad, StepOutcome};
use crossline_render::SvgRenderer;
use kurbo::{Point, Size};
use std::path::PathBuf;

/// How to replay a script.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory for SVG frames; nothing is written when unset.
    pub out_dir: Option<PathBuf>,
    /// Wait the configured step delay between collapse steps.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            out_dir: None,
            realtime: true,
        }
    }
}

/// What happened during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub collapses: usize,
    pub collapse_steps: usize,
    pub frames_written: usize,
    pub remaining_segments: usize,
}

/// Replay `script`, collapsing to convergence on every trigger.
///
/// A frame is saved before each collapse and once at the end.
pub fn run(script: &Script, options: &RunOptions) -> ScriptResult<RunSummary> {
    let renderer = SvgRenderer::new(Size::new(script.width, script.height))
        .with_marker_radius(script.config.marker_radius);
    let mut pad = Sketchpad::with_config(script.config.clone(), renderer);
    let mut summary = RunSummary::default();

    if let Some(dir) = &options.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    for event in &script.events {
        match *event {
            ScriptEvent::Down { x, y, button } => pad.on_pointer_down(Point::new(x, y), button),
            ScriptEvent::Move { x, y } => pad.on_pointer_move(Point::new(x, y)),
            ScriptEvent::Trigger => {
                save_frame(&mut pad, options, &mut summary)?;
                pad.on_trigger();
                summary.collapse_steps += collapse(&mut pad, options.realtime);
                summary.collapses += 1;
            }
        }
    }

    save_frame(&mut pad, options, &mut summary)?;
    summary.remaining_segments = pad.store().len();
    Ok(summary)
}

fn collapse(pad: &mut Sketchpad<SvgRenderer>, realtime: bool) -> usize {
    loop {
        match pad.tick() {
            StepOutcome::Advanced => {
                if realtime {
                    std::thread::sleep(pad.step_delay());
                }
            }
            StepOutcome::Converged { steps } => return steps,
            StepOutcome::Idle => return 0,
        }
    }
}

fn save_frame(
    pad: &mut Sketchpad<SvgRenderer>,
    options: &RunOptions,
    summary: &mut RunSummary,
) -> ScriptResult<()> {
    let Some(dir) = &options.out_dir else {
        return Ok(());
    };
    // The surface only redraws on change; make sure the frame is current.
    let snapshot = pad.snapshot();
    pad.surface_mut().render(&snapshot)?;

    let path = dir.join(format!("frame_{:04}.svg", summary.frames_written));
    pad.surface().save(&path)?;
    summary.frames_written += 1;
    log::info!("Saved {}", path.display());
    Ok(())
}
