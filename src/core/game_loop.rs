//! Per-frame input → update sequencing, independent of the terminal.
//!
//! The binary feeds each frame's key events and measured delta time into
//! `GameLoop::frame` and renders afterwards. Keeping this out of `main`
//! lets the whole loop run headless in tests.

use super::game_state::GameState;
use super::logic::{process_input, tick, RoadInput};
use super::types::GamePhase;
use rand::Rng;
use std::time::Duration;

/// What the driver should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Owns the game state plus the game-over display countdown.
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub state: GameState,
    game_over_display: f64,
    game_over_shown: f64,
}

impl GameLoop {
    pub fn new(state: GameState, game_over_display: Duration) -> Self {
        Self {
            state,
            game_over_display: game_over_display.as_secs_f64(),
            game_over_shown: 0.0,
        }
    }

    /// Run the input and update phases for one frame.
    pub fn frame<I, R>(&mut self, inputs: I, dt: f64, rng: &mut R) -> LoopControl
    where
        I: IntoIterator<Item = RoadInput>,
        R: Rng,
    {
        for input in inputs {
            process_input(&mut self.state, input);
        }

        match self.state.phase {
            GamePhase::Exited => LoopControl::Exit,
            GamePhase::GameOver => {
                self.game_over_shown += dt.max(0.0);
                if self.game_over_shown >= self.game_over_display {
                    LoopControl::Exit
                } else {
                    LoopControl::Continue
                }
            }
            GamePhase::Running | GamePhase::Paused => {
                tick(&mut self.state, dt, rng);
                LoopControl::Continue
            }
        }
    }
}
