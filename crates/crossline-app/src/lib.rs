//! CrossLine Application
//!
//! Replays a scripted pointer session against the core and writes the
//! resulting frames as SVG.

mod runner;
mod script;

pub use runner::{run, RunOptions, RunSummary};
pub use script::{Script, ScriptError, ScriptEvent, ScriptResult};
