//! Road Rush scene rendering.
//!
//! The 800x600 logical screen is rasterised into a cell buffer (road, lane
//! dividers, obstacles, player) and stamped onto the play field. Sprites are
//! stretched over each car's cell rectangle; without a sprite the car is a
//! solid block of the same size.

use super::game_common::{
    create_game_layout, render_cell_buffer, render_centered_prompt, render_game_over_overlay,
    render_info_panel_frame, render_status_bar, Cell,
};
use crate::assets::{Sprite, Sprites};
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::core::types::{GamePhase, Obstacle, Steering};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const VERGE_BG: Color = Color::Rgb(34, 60, 34);
const ROAD_BG: Color = Color::Rgb(50, 50, 50);
const ROAD_TEXTURE_FG: Color = Color::Rgb(78, 78, 78);
const EDGE_FG: Color = Color::White;
const DIVIDER_FG: Color = Color::Yellow;
const ENEMY_FG: Color = Color::LightRed;
const PLAYER_FG: Color = Color::LightCyan;

const FALLBACK_CAR: char = '█';
const DIVIDER_CHAR: char = '┃';
const EDGE_CHAR: char = '│';

/// Render the whole game screen for the current phase.
pub fn render_road_scene(frame: &mut Frame, area: Rect, state: &GameState, sprites: &Sprites) {
    if state.phase == GamePhase::GameOver {
        render_game_over(frame, area, state);
        return;
    }

    let title = format!(" Road Rush - {} ", state.variant.name());
    let layout = create_game_layout(frame, area, &title, Color::LightRed, 12, 22);

    let field = build_field(
        state,
        sprites,
        layout.content.width as usize,
        layout.content.height as usize,
    );
    render_cell_buffer(frame, layout.content, &field);

    if state.is_paused() {
        render_centered_prompt(
            frame,
            layout.content,
            "[ PAUSED - P to resume ]",
            Color::White,
        );
    }

    render_status_bar_content(frame, layout.status_bar, state);
    render_info_panel(frame, layout.info_panel, state);
}

/// Obstacles ordered far-to-near so nearer cars are painted last.
pub fn paint_order(obstacles: &[Obstacle]) -> Vec<&Obstacle> {
    let mut ordered: Vec<&Obstacle> = obstacles.iter().collect();
    ordered.sort_by(|a, b| a.y.total_cmp(&b.y));
    ordered
}

/// Rasterise the play field into a `height` x `width` cell grid.
pub fn build_field(
    state: &GameState,
    sprites: &Sprites,
    width: usize,
    height: usize,
) -> Vec<Vec<Cell>> {
    let mut buffer = vec![
        vec![
            Cell {
                ch: ' ',
                fg: Color::Reset,
                bg: VERGE_BG,
            };
            width
        ];
        height
    ];
    if width == 0 || height == 0 {
        return buffer;
    }

    let x_scale = width as f64 / SCREEN_WIDTH;
    let y_scale = height as f64 / SCREEN_HEIGHT;

    // ── Road surface ──────────────────────────────────────────────────
    let road_first = (ROAD_LEFT * x_scale).floor() as usize;
    let road_end = ((ROAD_RIGHT * x_scale).ceil() as usize).min(width);
    let scroll_rows = (state.scroll_distance * y_scale).floor() as i64;

    for (row, line) in buffer.iter_mut().enumerate() {
        for col in road_first..road_end {
            let ch = match &sprites.road {
                Some(texture) => {
                    texture.tile((col - road_first) as i64, row as i64 - scroll_rows)
                }
                None => ' ',
            };
            line[col] = Cell {
                ch,
                fg: ROAD_TEXTURE_FG,
                bg: ROAD_BG,
            };
        }
        if road_end > road_first {
            line[road_first].ch = EDGE_CHAR;
            line[road_first].fg = EDGE_FG;
            line[road_end - 1].ch = EDGE_CHAR;
            line[road_end - 1].fg = EDGE_FG;
        }
    }

    // ── Lane dividers, dashed and scrolling with the road ──────────────
    for i in 1..LANE_COUNT {
        let col = ((ROAD_LEFT + i as f64 * LANE_WIDTH) * x_scale) as usize;
        if col >= width {
            continue;
        }
        for (row, line) in buffer.iter_mut().enumerate() {
            let y = (row as f64 + 0.5) / y_scale;
            if (y - state.scroll_distance).rem_euclid(DASH_PERIOD) < DASH_LENGTH {
                line[col].ch = DIVIDER_CHAR;
                line[col].fg = DIVIDER_FG;
            }
        }
    }

    // ── Cars ──────────────────────────────────────────────────────────
    for obstacle in paint_order(&state.obstacles) {
        let rect = car_rect(
            obstacle.x,
            obstacle.y,
            obstacle.width,
            obstacle.height,
            x_scale,
            y_scale,
        );
        stamp_car(&mut buffer, rect, sprites.enemy.as_ref(), ENEMY_FG);
    }

    let p = &state.player;
    let rect = car_rect(p.x, p.y, p.width, p.height, x_scale, y_scale);
    stamp_car(&mut buffer, rect, sprites.player.as_ref(), PLAYER_FG);

    buffer
}

/// Cell rectangle (col0, row0, col1, row1), end-exclusive and possibly
/// off-grid, covering a car given in logical pixels.
fn car_rect(
    cx: f64,
    top: f64,
    w: f64,
    h: f64,
    x_scale: f64,
    y_scale: f64,
) -> (i64, i64, i64, i64) {
    let col0 = ((cx - w / 2.0) * x_scale).round() as i64;
    let col1 = (((cx + w / 2.0) * x_scale).round() as i64).max(col0 + 1);
    let row0 = (top * y_scale).round() as i64;
    let row1 = (((top + h) * y_scale).round() as i64).max(row0 + 1);
    (col0, row0, col1, row1)
}

fn stamp_car(
    buffer: &mut [Vec<Cell>],
    (col0, row0, col1, row1): (i64, i64, i64, i64),
    sprite: Option<&Sprite>,
    fg: Color,
) {
    let height = buffer.len() as i64;
    let w = (col1 - col0) as f64;
    let h = (row1 - row0) as f64;

    for row in row0.max(0)..row1.min(height) {
        let line = &mut buffer[row as usize];
        let width = line.len() as i64;
        for col in col0.max(0)..col1.min(width) {
            let ch = match sprite {
                Some(s) => {
                    let u = (col - col0) as f64 / w;
                    let v = (row - row0) as f64 / h;
                    s.sample(u, v)
                }
                None => FALLBACK_CAR,
            };
            // Sprite spaces are transparent
            if ch == ' ' {
                continue;
            }
            line[col as usize].ch = ch;
            line[col as usize].fg = fg;
        }
    }
}

/// Status bar: run state and the controls for this variant.
fn render_status_bar_content(frame: &mut Frame, area: Rect, state: &GameState) {
    let steer_key = match state.rules.steering {
        Steering::Lanes => "[←/→ A/D]",
        Steering::Free { .. } => "[←/→]",
    };

    if state.is_paused() {
        render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[P/Space]", "Resume"), ("[Esc/Q]", "Quit")],
        );
    } else {
        render_status_bar(
            frame,
            area,
            "Dodge the traffic!",
            Color::LightGreen,
            &[
                (steer_key, "Steer"),
                ("[P/Space]", "Pause"),
                ("[Esc/Q]", "Quit"),
            ],
        );
    }
}

/// HUD panel: score, speed, lane, time and pause hint.
fn render_info_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", state.variant.name()),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Speed: ", label),
            Span::styled(format!("{:.0} px/s", state.speed), value),
        ]),
        Line::from(vec![
            Span::styled(" Lane:  ", label),
            Span::styled(format!("{}/{}", state.player.lane + 1, LANE_COUNT), value),
        ]),
        Line::from(vec![
            Span::styled(" Time:  ", label),
            Span::styled(format!("{:.1}s", state.elapsed), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            if state.is_paused() {
                " P to resume"
            } else {
                " P to pause"
            },
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", FALLBACK_CAR), Style::default().fg(PLAYER_FG)),
            Span::styled("You", label),
        ]),
        Line::from(vec![
            Span::styled(format!(" {} ", FALLBACK_CAR), Style::default().fg(ENEMY_FG)),
            Span::styled("Traffic", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect, state: &GameState) {
    let message = format!("Final score: {}", state.score);
    let detail = format!(
        "Survived {:.1}s, top speed {:.0} px/s",
        state.elapsed, state.speed
    );
    render_game_over_overlay(
        frame,
        area,
        Color::Red,
        "WRECKED!",
        &message,
        &detail,
        "[Esc] Exit now",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Variant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_state() -> GameState {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new(Variant::Lanes, &mut rng);
        state.obstacles.clear();
        state
    }

    fn count(buffer: &[Vec<Cell>], ch: char, fg: Color) -> usize {
        buffer
            .iter()
            .flatten()
            .filter(|c| c.ch == ch && c.fg == fg)
            .count()
    }

    #[test]
    fn test_paint_order_far_to_near() {
        let obstacles = vec![
            Obstacle::new(0, 300.0, 60.0, 90.0),
            Obstacle::new(1, -200.0, 60.0, 90.0),
            Obstacle::new(2, 50.0, 60.0, 90.0),
        ];
        let ys: Vec<f64> = paint_order(&obstacles).iter().map(|o| o.y).collect();
        assert_eq!(ys, vec![-200.0, 50.0, 300.0]);
    }

    #[test]
    fn test_field_dimensions() {
        let field = build_field(&quiet_state(), &Sprites::default(), 80, 24);
        assert_eq!(field.len(), 24);
        assert!(field.iter().all(|r| r.len() == 80));
    }

    #[test]
    fn test_zero_sized_field() {
        let field = build_field(&quiet_state(), &Sprites::default(), 0, 0);
        assert!(field.is_empty());
    }

    #[test]
    fn test_player_fallback_block_drawn() {
        let field = build_field(&quiet_state(), &Sprites::default(), 80, 24);
        assert!(count(&field, FALLBACK_CAR, PLAYER_FG) > 0);
        assert_eq!(count(&field, FALLBACK_CAR, ENEMY_FG), 0);
    }

    #[test]
    fn test_offscreen_obstacle_not_drawn() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle::new(0, -200.0, 60.0, 90.0));
        let field = build_field(&state, &Sprites::default(), 80, 24);
        assert_eq!(count(&field, FALLBACK_CAR, ENEMY_FG), 0);
    }

    #[test]
    fn test_sprite_replaces_fallback() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle::new(0, 100.0, 60.0, 90.0));
        let sprites = Sprites {
            enemy: Sprite::parse("#"),
            ..Default::default()
        };
        let field = build_field(&state, &sprites, 80, 24);
        assert!(count(&field, '#', ENEMY_FG) > 0);
        assert_eq!(count(&field, FALLBACK_CAR, ENEMY_FG), 0);
    }

    #[test]
    fn test_dividers_scroll() {
        let mut state = quiet_state();
        let before = build_field(&state, &Sprites::default(), 80, 24);
        state.scroll_distance = DASH_PERIOD / 2.0;
        let after = build_field(&state, &Sprites::default(), 80, 24);
        let col = ((ROAD_LEFT + LANE_WIDTH) * 80.0 / SCREEN_WIDTH) as usize;
        let column = |f: &Vec<Vec<Cell>>| f.iter().map(|r| r[col].ch).collect::<String>();
        assert!(column(&before).contains(DIVIDER_CHAR));
        assert_ne!(column(&before), column(&after));
    }
}
