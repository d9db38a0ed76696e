//! File-backed logging.
//!
//! The game owns the terminal's alternate screen, so log records go to
//! ~/.roadrush/roadrush.log instead of stderr.

use super::persistence::app_path;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::Write;

pub const LOG_FILE: &str = "roadrush.log";

/// Install the global logger. Level comes from `RUST_LOG` (default `info`).
///
/// Returns false if the log file could not be opened; logging stays off.
pub fn init() -> bool {
    let path = match app_path(LOG_FILE) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .is_ok()
}
