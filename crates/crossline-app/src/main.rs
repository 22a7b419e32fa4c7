//! Command-line entry point.

use crossline_app::{RunOptions, Script};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: crossline <script.json> [out_dir] [--no-delay]";

fn main() -> ExitCode {
    env_logger::init();

    let mut script_path: Option<PathBuf> = None;
    let mut options = RunOptions::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-delay" => options.realtime = false,
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ if script_path.is_none() => script_path = Some(PathBuf::from(&arg)),
            _ if options.out_dir.is_none() => options.out_dir = Some(PathBuf::from(&arg)),
            _ => {
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }
    let Some(script_path) = script_path else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    log::info!("Starting CrossLine with {}", script_path.display());
    let result = Script::load(&script_path).and_then(|script| crossline_app::run(&script, &options));
    match result {
        Ok(summary) => {
            log::info!(
                "Done: {} collapse(s), {} step(s), {} frame(s) written, {} segment(s) left",
                summary.collapses,
                summary.collapse_steps,
                summary.frames_written,
                summary.remaining_segments
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
