//! Road Rush data structures.
//!
//! Every position is in logical pixels on an 800x600 screen with y growing
//! downward. Horizontal positions are car centres; vertical positions are
//! top edges.

use super::constants::*;
use serde::{Deserialize, Serialize};

/// Which of the two games is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Discrete lanes with eased switching, timed spawning and a speed ramp.
    #[default]
    Lanes,
    /// Free steering with a fixed, always-recycled obstacle pool.
    Classic,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lanes => "Lanes",
            Self::Classic => "Classic",
        }
    }

    /// Tuning table for this variant.
    pub fn rules(&self) -> Rules {
        match self {
            Self::Lanes => Rules {
                steering: Steering::Lanes,
                base_speed: 300.0,
                speed_ramp: 6.0,
                max_speed: 900.0,
                spawn_interval: Some(1.1),
                spawn_jitter: 0.35,
                spawn_y_min: -300.0,
                spawn_y_max: -100.0,
                recycle_chance: 0.5,
                hitbox_inset: 8.0,
                obstacle_width: 60.0,
                obstacle_height: 90.0,
                initial_obstacles: 0,
                despawn_margin: 20.0,
            },
            Self::Classic => Rules {
                steering: Steering::Free {
                    step: CLASSIC_STEER_STEP,
                },
                base_speed: CLASSIC_FALL_SPEED,
                speed_ramp: 0.0,
                max_speed: CLASSIC_FALL_SPEED,
                spawn_interval: None,
                spawn_jitter: 0.0,
                spawn_y_min: -600.0,
                spawn_y_max: -100.0,
                recycle_chance: 1.0,
                hitbox_inset: 0.0,
                obstacle_width: 40.0,
                obstacle_height: 80.0,
                initial_obstacles: CLASSIC_OBSTACLE_COUNT,
                despawn_margin: 0.0,
            },
        }
    }
}

/// How left/right input moves the car.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// Hop one lane per key press, eased over `LANE_SWITCH_SECONDS`.
    Lanes,
    /// Slide `step` pixels per key press, clamped to the road edges.
    Free { step: f64 },
}

/// Per-variant tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub steering: Steering,
    /// Fall speed at t=0 (px/s).
    pub base_speed: f64,
    /// Speed gained per second of unpaused play (px/s²).
    pub speed_ramp: f64,
    pub max_speed: f64,
    /// Mean seconds between spawns. `None` disables timed spawning.
    pub spawn_interval: Option<f64>,
    /// Half-width of the uniform range around `spawn_interval`.
    pub spawn_jitter: f64,
    pub spawn_y_min: f64,
    pub spawn_y_max: f64,
    /// Probability that a passed obstacle is recycled instead of dropped.
    pub recycle_chance: f64,
    /// Pixels trimmed from every side of each hitbox.
    pub hitbox_inset: f64,
    pub obstacle_width: f64,
    pub obstacle_height: f64,
    pub initial_obstacles: usize,
    /// Distance below the screen an obstacle must reach to count as passed.
    pub despawn_margin: f64,
}

impl Rules {
    pub fn despawn_y(&self) -> f64 {
        SCREEN_HEIGHT + self.despawn_margin
    }
}

/// Loop state machine. `GameOver` and `Exited` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
    Exited,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Exited)
    }
}

/// The player's car.
#[derive(Debug, Clone)]
pub struct Player {
    pub lane: usize,
    /// Current centre x.
    pub x: f64,
    /// Centre x when the current lane switch began.
    pub start_x: f64,
    /// Centre x the car is easing toward.
    pub target_x: f64,
    /// Lane switch progress in [0, 1]; 1 means at rest.
    pub progress: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Player {
    pub fn new(lane: usize) -> Self {
        let lane = lane.min(LANE_COUNT - 1);
        let x = lane_center(lane);
        Self {
            lane,
            x,
            start_x: x,
            target_x: x,
            progress: 1.0,
            y: CAR_Y,
            width: CAR_WIDTH,
            height: CAR_HEIGHT,
        }
    }

    pub fn is_switching(&self) -> bool {
        self.progress < 1.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_top(self.x, self.y, self.width, self.height)
    }
}

/// An oncoming car.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    /// Centre x (always a lane centre).
    pub x: f64,
    /// Top edge y; negative while above the screen.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(lane: usize, y: f64, width: f64, height: f64) -> Self {
        let lane = lane.min(LANE_COUNT - 1);
        Self {
            lane,
            x: lane_center(lane),
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_top(self.x, self.y, self.width, self.height)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Aabb {
    pub fn from_center_top(cx: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: cx - width / 2.0,
            top,
            right: cx + width / 2.0,
            bottom: top + height,
        }
    }

    /// Trim `inset` from every side. Never inverts the box.
    pub fn shrink(&self, inset: f64) -> Self {
        let cx = (self.left + self.right) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;
        let left = (self.left + inset).min(cx);
        let top = (self.top + inset).min(cy);
        Self {
            left,
            top,
            right: (self.right - inset).max(left),
            bottom: (self.bottom - inset).max(top),
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}
