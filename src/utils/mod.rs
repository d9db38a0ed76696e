//! Utility modules: logging, persistence.

pub mod logging;
pub mod persistence;
