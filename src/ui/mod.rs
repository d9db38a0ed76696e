pub mod game_common;
pub mod road_scene;

use crate::assets::Sprites;
use crate::core::game_state::GameState;
use ratatui::Frame;

/// Draw one frame of the game.
pub fn draw_ui(frame: &mut Frame, state: &GameState, sprites: &Sprites) {
    let area = frame.size();
    road_scene::render_road_scene(frame, area, state, sprites);
}
