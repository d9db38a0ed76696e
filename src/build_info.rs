//! Compile-time build information, shown by `roadrush --version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for the CLI.
pub fn version_line() -> String {
    format!("roadrush {} ({})", BUILD_DATE, BUILD_COMMIT)
}
