//! The single owner of all per-run game data.

use super::constants::*;
use super::types::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Everything the loop reads and writes between frames.
#[derive(Debug, Clone)]
pub struct GameState {
    pub variant: Variant,
    pub rules: Rules,
    pub phase: GamePhase,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,

    // Scoring
    pub score: u32,

    // Speed and timing
    /// Current fall speed (px/s).
    pub speed: f64,
    /// Unpaused play time in seconds.
    pub elapsed: f64,
    /// Total distance the road has scrolled (px), drives divider animation.
    pub scroll_distance: f64,

    // Spawning
    pub spawn_timer: f64,
    /// Seconds the spawn timer must exceed before the next spawn.
    pub spawn_threshold: f64,
}

impl GameState {
    /// Start a run with the variant's default rules.
    pub fn new<R: Rng>(variant: Variant, rng: &mut R) -> Self {
        Self::with_rules(variant, variant.rules(), rng)
    }

    /// Start a run with explicit rules.
    pub fn with_rules<R: Rng>(variant: Variant, rules: Rules, rng: &mut R) -> Self {
        let mut state = Self {
            variant,
            phase: GamePhase::Running,
            player: Player::new(START_LANE),
            obstacles: Vec::with_capacity(rules.initial_obstacles.max(8)),
            score: 0,
            speed: rules.base_speed,
            elapsed: 0.0,
            scroll_distance: 0.0,
            spawn_timer: 0.0,
            spawn_threshold: 0.0,
            rules,
        };
        state.spawn_threshold = state.roll_spawn_threshold(rng);
        for _ in 0..state.rules.initial_obstacles {
            state.spawn_obstacle(rng);
        }
        state
    }

    /// Draw the next spawn threshold from `interval ± jitter`.
    pub fn roll_spawn_threshold<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.rules.spawn_interval {
            Some(interval) if self.rules.spawn_jitter > 0.0 => {
                let lo = (interval - self.rules.spawn_jitter).max(0.05);
                let hi = interval + self.rules.spawn_jitter;
                rng.gen_range(lo..=hi)
            }
            Some(interval) => interval,
            None => f64::INFINITY,
        }
    }

    /// Random lane and off-screen y for a new or recycled obstacle.
    ///
    /// Lanes where the new car would leave the player no gap are skipped
    /// unless every lane would. The y is lifted clear of cars already
    /// queued in the chosen lane.
    fn roll_placement<R: Rng>(&self, rng: &mut R) -> (usize, f64) {
        let y = if self.rules.spawn_y_max > self.rules.spawn_y_min {
            rng.gen_range(self.rules.spawn_y_min..=self.rules.spawn_y_max)
        } else {
            self.rules.spawn_y_min
        };

        let open: Vec<(usize, f64)> = (0..LANE_COUNT)
            .map(|lane| (lane, self.clear_y(lane, y)))
            .filter(|&(lane, y)| !self.closes_road(lane, y))
            .collect();

        match open.choose(rng) {
            Some(&placement) => placement,
            None => {
                let lane = rng.gen_range(0..LANE_COUNT);
                (lane, self.clear_y(lane, y))
            }
        }
    }

    /// `y`, or a spot above the topmost car in `lane` if `y` would touch one.
    fn clear_y(&self, lane: usize, y: f64) -> f64 {
        let height = self.rules.obstacle_height;
        let in_lane = || self.obstacles.iter().filter(move |o| o.lane == lane);
        if !in_lane().any(|o| spans_within(y, height, o, MIN_OBSTACLE_GAP)) {
            return y;
        }
        let top = in_lane().map(|o| o.y).fold(f64::INFINITY, f64::min);
        top - height - MIN_OBSTACLE_GAP
    }

    /// True if a car at (`lane`, `y`) plus the existing ones would fill
    /// every lane within one car length of each other.
    fn closes_road(&self, lane: usize, y: f64) -> bool {
        let height = self.rules.obstacle_height;
        (0..LANE_COUNT).filter(|&l| l != lane).all(|l| {
            self.obstacles
                .iter()
                .any(|o| o.lane == l && spans_within(y, height, o, CAR_HEIGHT))
        })
    }

    /// Push one obstacle at a random lane above the screen.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let (lane, y) = self.roll_placement(rng);
        log::trace!("spawn lane={} y={:.0}", lane, y);
        self.obstacles.push(Obstacle::new(
            lane,
            y,
            self.rules.obstacle_width,
            self.rules.obstacle_height,
        ));
    }

    /// Move an existing obstacle back above the screen in a random lane.
    pub fn recycle_obstacle<R: Rng>(&self, obstacle: &mut Obstacle, rng: &mut R) {
        let (lane, y) = self.roll_placement(rng);
        log::trace!("recycle lane={} y={:.0}", lane, y);
        obstacle.lane = lane;
        obstacle.x = lane_center(lane);
        obstacle.y = y;
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// True if `[top, top + height]` comes within `gap` of the obstacle's span.
fn spans_within(top: f64, height: f64, other: &Obstacle, gap: f64) -> bool {
    top < other.y + other.height + gap && other.y < top + height + gap
}
