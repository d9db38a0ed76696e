//! Core game state and logic.

pub mod constants;
pub mod game_loop;
pub mod game_state;
pub mod logic;
pub mod types;

pub use constants::*;
pub use game_loop::{GameLoop, LoopControl};
pub use game_state::GameState;
pub use logic::{check_collision, process_input, tick, RoadInput};
pub use types::*;
