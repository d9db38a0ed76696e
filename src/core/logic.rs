//! Road Rush game logic: input phase, update phase, collision detection.

use super::constants::*;
use super::game_state::GameState;
use super::types::*;
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadInput {
    Quit,
    TogglePause,
    Left,
    Right,
    Other,
}

/// Horizontal direction of a steering input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Process one discrete key-down event.
pub fn process_input(state: &mut GameState, input: RoadInput) {
    if state.phase == GamePhase::Exited {
        return;
    }

    // Quit wins from every state, game over included
    if input == RoadInput::Quit {
        log::info!("quit at score {}", state.score);
        state.phase = GamePhase::Exited;
        return;
    }

    if state.is_over() {
        return;
    }

    match input {
        RoadInput::TogglePause => {
            state.phase = match state.phase {
                GamePhase::Running => GamePhase::Paused,
                GamePhase::Paused => GamePhase::Running,
                other => other,
            };
            log::debug!("pause toggled -> {:?}", state.phase);
        }
        RoadInput::Left | RoadInput::Right => {
            if state.is_paused() {
                return;
            }
            let dir = if input == RoadInput::Left {
                Direction::Left
            } else {
                Direction::Right
            };
            match state.rules.steering {
                Steering::Lanes => {
                    shift_lane(&mut state.player, dir);
                }
                Steering::Free { step } => steer_free(&mut state.player, dir, step),
            }
        }
        RoadInput::Quit | RoadInput::Other => {}
    }
}

/// Begin an eased switch to the neighbouring lane.
///
/// Returns false (and changes nothing) when already at the boundary lane.
pub fn shift_lane(player: &mut Player, dir: Direction) -> bool {
    let new_lane = match dir {
        Direction::Left if player.lane > 0 => player.lane - 1,
        Direction::Right if player.lane + 1 < LANE_COUNT => player.lane + 1,
        _ => return false,
    };
    player.lane = new_lane;
    player.start_x = player.x;
    player.target_x = lane_center(new_lane);
    player.progress = 0.0;
    true
}

/// Slide the car by `step` pixels, keeping it fully on the road.
fn steer_free(player: &mut Player, dir: Direction, step: f64) {
    let delta = match dir {
        Direction::Left => -step,
        Direction::Right => step,
    };
    let half = player.width / 2.0;
    player.x = (player.x + delta).clamp(ROAD_LEFT + half, ROAD_RIGHT - half);
    player.start_x = player.x;
    player.target_x = player.x;
    player.progress = 1.0;
    player.lane = lane_at(player.x);
}

/// Ease-out blend: fast start, decelerating into the target.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Fall speed after `elapsed` seconds of unpaused play.
pub fn speed_at(rules: &Rules, elapsed: f64) -> f64 {
    (rules.base_speed + rules.speed_ramp * elapsed.max(0.0)).min(rules.max_speed)
}

/// Step the lane-switch interpolation. No-op once progress has reached 1.
pub fn advance_lane_switch(player: &mut Player, dt: f64) {
    if !player.is_switching() {
        return;
    }
    player.progress = (player.progress + dt / LANE_SWITCH_SECONDS).min(1.0);
    if player.progress >= 1.0 {
        player.x = player.target_x;
    } else {
        player.x = player.start_x + (player.target_x - player.start_x) * ease_out(player.progress);
    }
}

/// Advance the simulation by `dt` seconds. Called once per frame.
///
/// Returns true if the state changed. Paused and terminal states are left
/// untouched, so paused time never reaches the speed ramp.
pub fn tick<R: Rng>(state: &mut GameState, dt: f64, rng: &mut R) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }

    // Clamp so a stalled frame cannot teleport obstacles past the car
    let dt = dt.clamp(0.0, MAX_DT);

    // 1. Speed ramp
    state.elapsed += dt;
    state.speed = speed_at(&state.rules, state.elapsed);

    // 2. Lane switch easing
    advance_lane_switch(&mut state.player, dt);

    // 3. Timed spawning
    if state.rules.spawn_interval.is_some() {
        state.spawn_timer += dt;
        if state.spawn_timer > state.spawn_threshold {
            state.spawn_obstacle(rng);
            state.spawn_timer = 0.0;
            state.spawn_threshold = state.roll_spawn_threshold(rng);
        }
    }

    // 4. Scroll obstacles and road
    let step = state.speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.y += step;
    }
    state.scroll_distance += step;

    // 5. Score passed obstacles, then recycle or drop them
    let passed = pass_obstacles(state, rng);
    state.score += passed;

    // 6. Collision
    if check_collision(state) {
        log::info!(
            "collision after {:.1}s, final score {}",
            state.elapsed,
            state.score
        );
        state.phase = GamePhase::GameOver;
    }

    true
}

/// Count obstacles beyond the despawn line; each is recycled or dropped.
fn pass_obstacles<R: Rng>(state: &mut GameState, rng: &mut R) -> u32 {
    let despawn_y = state.rules.despawn_y();
    let recycle_chance = state.rules.recycle_chance.clamp(0.0, 1.0);
    let (passed, kept): (Vec<Obstacle>, Vec<Obstacle>) = std::mem::take(&mut state.obstacles)
        .into_iter()
        .partition(|o| o.y > despawn_y);
    state.obstacles = kept;

    // Recycled cars are placed against the ones still on the road
    let count = passed.len() as u32;
    for mut obstacle in passed {
        if rng.gen_bool(recycle_chance) {
            state.recycle_obstacle(&mut obstacle, rng);
            state.obstacles.push(obstacle);
        }
    }
    count
}

/// True if the player's shrunk hitbox overlaps any obstacle's.
pub fn check_collision(state: &GameState) -> bool {
    let inset = state.rules.hitbox_inset;
    let player_box = state.player.bounds().shrink(inset);
    state
        .obstacles
        .iter()
        .any(|o| player_box.overlaps(&o.bounds().shrink(inset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: f64 = 1.0 / 60.0;

    fn lanes_game(seed: u64) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new(Variant::Lanes, &mut rng);
        (state, rng)
    }

    /// Lanes game with no timed spawning so tests control every obstacle.
    fn quiet_game(seed: u64) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let rules = Rules {
            spawn_interval: None,
            ..Variant::Lanes.rules()
        };
        let state = GameState::with_rules(Variant::Lanes, rules, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_ease_out_curve() {
        assert!(ease_out(0.0).abs() < f64::EPSILON);
        assert!((ease_out(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((ease_out(0.5) - 0.75).abs() < 1e-12);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn test_lane_never_leaves_bounds() {
        let (mut state, _) = lanes_game(1);
        for _ in 0..10 {
            process_input(&mut state, RoadInput::Left);
        }
        assert_eq!(state.player.lane, 0);
        for _ in 0..10 {
            process_input(&mut state, RoadInput::Right);
        }
        assert_eq!(state.player.lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_boundary_shift_rejected_without_side_effects() {
        let mut player = Player::new(0);
        assert!(!shift_lane(&mut player, Direction::Left));
        assert_eq!(player.lane, 0);
        assert!(!player.is_switching());
    }

    #[test]
    fn test_shift_starts_new_interpolation() {
        let mut player = Player::new(1);
        assert!(shift_lane(&mut player, Direction::Right));
        assert_eq!(player.lane, 2);
        assert!(player.progress.abs() < f64::EPSILON);
        assert!((player.target_x - lane_center(2)).abs() < f64::EPSILON);
        assert!((player.start_x - lane_center(1)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lane_switch_converges_and_snaps() {
        let (mut state, mut rng) = quiet_game(2);
        process_input(&mut state, RoadInput::Left);
        let start = state.player.x;

        tick(&mut state, FRAME, &mut rng);
        let mid = state.player.x;
        assert!(mid < start);
        assert!(mid > lane_center(0));

        for _ in 0..30 {
            tick(&mut state, FRAME, &mut rng);
        }
        assert!(!state.player.is_switching());
        assert!((state.player.x - lane_center(0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interpolation_idempotent_at_rest() {
        let mut player = Player::new(1);
        shift_lane(&mut player, Direction::Right);
        advance_lane_switch(&mut player, LANE_SWITCH_SECONDS * 2.0);
        let rest = player.x;
        for _ in 0..100 {
            advance_lane_switch(&mut player, FRAME);
            assert_eq!(player.x, rest);
        }
    }

    #[test]
    fn test_retarget_mid_switch_starts_from_current_x() {
        let mut player = Player::new(1);
        shift_lane(&mut player, Direction::Right);
        advance_lane_switch(&mut player, LANE_SWITCH_SECONDS / 2.0);
        let mid = player.x;
        shift_lane(&mut player, Direction::Left);
        assert_eq!(player.lane, 1);
        assert_eq!(player.start_x, mid);
    }

    #[test]
    fn test_pause_toggle() {
        let (mut state, _) = lanes_game(3);
        process_input(&mut state, RoadInput::TogglePause);
        assert_eq!(state.phase, GamePhase::Paused);
        process_input(&mut state, RoadInput::TogglePause);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_lane_change_ignored_while_paused() {
        let (mut state, _) = lanes_game(3);
        process_input(&mut state, RoadInput::TogglePause);
        process_input(&mut state, RoadInput::Left);
        assert_eq!(state.player.lane, START_LANE);
    }

    #[test]
    fn test_quit_from_every_phase() {
        for phase in [GamePhase::Running, GamePhase::Paused, GamePhase::GameOver] {
            let (mut state, _) = lanes_game(4);
            state.phase = phase;
            process_input(&mut state, RoadInput::Quit);
            assert_eq!(state.phase, GamePhase::Exited);
        }
    }

    #[test]
    fn test_game_over_ignores_everything_but_quit() {
        let (mut state, _) = lanes_game(4);
        state.phase = GamePhase::GameOver;
        process_input(&mut state, RoadInput::TogglePause);
        process_input(&mut state, RoadInput::Left);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lane, START_LANE);
    }

    #[test]
    fn test_no_update_while_paused() {
        let (mut state, mut rng) = quiet_game(5);
        state.obstacles.push(Obstacle::new(0, -200.0, 60.0, 90.0));
        state.phase = GamePhase::Paused;
        assert!(!tick(&mut state, FRAME, &mut rng));
        assert_eq!(state.obstacles[0].y, -200.0);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_speed_ramp_ignores_paused_time() {
        let (mut a, mut rng_a) = quiet_game(6);
        let (mut b, mut rng_b) = quiet_game(6);

        for i in 0..120 {
            tick(&mut a, FRAME, &mut rng_a);
            if i == 60 {
                process_input(&mut b, RoadInput::TogglePause);
                for _ in 0..300 {
                    tick(&mut b, FRAME, &mut rng_b);
                }
                process_input(&mut b, RoadInput::TogglePause);
            }
            tick(&mut b, FRAME, &mut rng_b);
        }
        assert!((a.speed - b.speed).abs() < 1e-9);
        assert!((a.elapsed - b.elapsed).abs() < 1e-9);
    }

    #[test]
    fn test_speed_non_decreasing_and_capped() {
        let rules = Variant::Lanes.rules();
        let mut last = speed_at(&rules, 0.0);
        for i in 1..2000 {
            let s = speed_at(&rules, i as f64 * 0.1);
            assert!(s >= last);
            last = s;
        }
        assert!((last - rules.max_speed).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dt_clamped() {
        let (mut state, mut rng) = quiet_game(7);
        state.obstacles.push(Obstacle::new(0, -500.0, 60.0, 90.0));
        tick(&mut state, 5.0, &mut rng);
        assert!((state.elapsed - MAX_DT).abs() < 1e-12);
        assert!(state.obstacles[0].y < -400.0);
    }

    #[test]
    fn test_spawn_timer_spawns_and_rerolls() {
        let (mut state, mut rng) = lanes_game(8);
        let threshold = state.spawn_threshold;
        let frames = (threshold / FRAME).ceil() as usize + 1;
        for _ in 0..frames {
            tick(&mut state, FRAME, &mut rng);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.spawn_timer < FRAME * 2.0);
    }

    #[test]
    fn test_pass_scores_once_when_dropped() {
        let (mut state, mut rng) = quiet_game(9);
        state.rules.recycle_chance = 0.0;
        state.obstacles.push(Obstacle::new(0, state.rules.despawn_y() - 1.0, 60.0, 90.0));
        tick(&mut state, FRAME, &mut rng);
        assert_eq!(state.score, 1);
        assert!(state.obstacles.is_empty());
        tick(&mut state, FRAME, &mut rng);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_pass_scores_once_when_recycled() {
        let (mut state, mut rng) = quiet_game(10);
        state.rules.recycle_chance = 1.0;
        state.obstacles.push(Obstacle::new(0, state.rules.despawn_y() - 1.0, 60.0, 90.0));
        tick(&mut state, FRAME, &mut rng);
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].y < 0.0);
        tick(&mut state, FRAME, &mut rng);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_collision_in_same_lane() {
        let (mut state, _) = quiet_game(11);
        state
            .obstacles
            .push(Obstacle::new(START_LANE, CAR_Y, 60.0, 90.0));
        assert!(check_collision(&state));
    }

    #[test]
    fn test_no_collision_in_adjacent_lane() {
        let (mut state, _) = quiet_game(12);
        state.obstacles.push(Obstacle::new(0, CAR_Y, 60.0, 90.0));
        state.obstacles.push(Obstacle::new(2, CAR_Y, 60.0, 90.0));
        assert!(!check_collision(&state));
    }

    #[test]
    fn test_inset_forgives_grazing_contact() {
        let (mut state, _) = quiet_game(13);
        // Bottom edge 4px into the car's top: overlap only before shrinking
        let y = CAR_Y - 90.0 + 4.0;
        state.obstacles.push(Obstacle::new(START_LANE, y, 60.0, 90.0));
        assert!(!check_collision(&state));
        state.rules.hitbox_inset = 0.0;
        assert!(check_collision(&state));
    }

    #[test]
    fn test_collision_ends_run() {
        let (mut state, mut rng) = quiet_game(14);
        state
            .obstacles
            .push(Obstacle::new(START_LANE, CAR_Y - 20.0, 60.0, 90.0));
        tick(&mut state, FRAME, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        let y = state.obstacles[0].y;
        assert!(!tick(&mut state, FRAME, &mut rng));
        assert_eq!(state.obstacles[0].y, y);
    }

    #[test]
    fn test_classic_steering_clamped_to_road() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut state = GameState::new(Variant::Classic, &mut rng);
        for _ in 0..200 {
            process_input(&mut state, RoadInput::Left);
        }
        assert!((state.player.x - (ROAD_LEFT + CAR_WIDTH / 2.0)).abs() < f64::EPSILON);
        assert_eq!(state.player.lane, 0);
        for _ in 0..200 {
            process_input(&mut state, RoadInput::Right);
        }
        assert!((state.player.x - (ROAD_RIGHT - CAR_WIDTH / 2.0)).abs() < f64::EPSILON);
        assert_eq!(state.player.lane, LANE_COUNT - 1);
        assert!(!state.player.is_switching());
    }

    #[test]
    fn test_classic_pool_always_recycled() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut state = GameState::new(Variant::Classic, &mut rng);
        state.obstacles.clear();
        for lane in [0, 2, 0, 2, 0] {
            state.obstacles.push(Obstacle::new(lane, -100.0, 40.0, 80.0));
        }
        for _ in 0..600 {
            // Park the car in the middle lane's row, clear of lanes 0 and 2
            state.obstacles.iter_mut().for_each(|o| {
                if o.lane == 1 {
                    o.lane = 0;
                    o.x = lane_center(0);
                }
            });
            tick(&mut state, FRAME, &mut rng);
            assert_eq!(state.obstacles.len(), CLASSIC_OBSTACLE_COUNT);
        }
        assert!(state.score > 0);
        assert_eq!(state.phase, GamePhase::Running);
    }
}
