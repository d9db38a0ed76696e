// Logical screen (pixels). The renderer scales this onto the terminal grid.
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

// Road and lanes
pub const ROAD_WIDTH: f64 = 400.0;
pub const ROAD_LEFT: f64 = (SCREEN_WIDTH - ROAD_WIDTH) / 2.0;
pub const ROAD_RIGHT: f64 = ROAD_LEFT + ROAD_WIDTH;
pub const LANE_COUNT: usize = 3;
pub const LANE_WIDTH: f64 = ROAD_WIDTH / LANE_COUNT as f64;

// Lane divider dash pattern (vertical period and painted length)
pub const DASH_PERIOD: f64 = 80.0;
pub const DASH_LENGTH: f64 = 45.0;

// Minimum vertical space between two obstacles queued in one lane
pub const MIN_OBSTACLE_GAP: f64 = 20.0;

// Player car
pub const CAR_WIDTH: f64 = 70.0;
pub const CAR_HEIGHT: f64 = 90.0;
pub const CAR_BOTTOM_GAP: f64 = 10.0;
pub const CAR_Y: f64 = SCREEN_HEIGHT - CAR_HEIGHT - CAR_BOTTOM_GAP;
pub const START_LANE: usize = 1;

// Lane switch easing duration in seconds
pub const LANE_SWITCH_SECONDS: f64 = 0.15;

// Frame timing
pub const DEFAULT_FPS: u32 = 60;
pub const MAX_DT: f64 = 0.1;
/// Slowest frame rate whose frame time still fits under `MAX_DT`.
pub const MIN_FPS: u32 = 10;
pub const MAX_FPS: u32 = 240;
pub const GAME_OVER_DISPLAY_MS: u64 = 2000;

// Classic variant (5 px/frame at 60 FPS, 7 px/frame steering)
pub const CLASSIC_FALL_SPEED: f64 = 300.0;
pub const CLASSIC_STEER_STEP: f64 = 14.0;
pub const CLASSIC_OBSTACLE_COUNT: usize = 5;

/// Horizontal centre of a lane in logical pixels.
pub fn lane_center(lane: usize) -> f64 {
    ROAD_LEFT + lane as f64 * LANE_WIDTH + LANE_WIDTH / 2.0
}

/// Lane whose corridor contains `x`, clamped to the road.
pub fn lane_at(x: f64) -> usize {
    let idx = ((x - ROAD_LEFT) / LANE_WIDTH).floor();
    idx.clamp(0.0, (LANE_COUNT - 1) as f64) as usize
}
