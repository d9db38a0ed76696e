//! Road Rush - Terminal Lane-Dodge Racer Library
//!
//! This module exposes the game logic for testing and external use.

pub mod assets;
pub mod build_info;
pub mod config;
pub mod core;
pub mod input;
pub mod ui;
pub mod utils;

pub use crate::core::{GameLoop, GameState, LoopControl, RoadInput, Variant};
