//! Emoji Sentry - a single-screen reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic match simulation (targets, spawning, scoring)
//! - `render`: Drawer seam between the simulation and a canvas
//!
//! The simulation never schedules itself: the host feeds it frame ticks,
//! one-second countdown ticks, and pointer events, which keeps the whole
//! core runnable headless in tests.

pub mod render;
pub mod sim;

pub use render::{TargetDrawer, draw_frame};
pub use sim::{MatchEvent, MatchPhase, MatchState, Outcome};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Match countdown length (seconds)
    pub const MATCH_DURATION_SECS: i32 = 45;

    /// Interval between automatic spawns at difficulty 1 (ms)
    pub const BASE_SPAWN_CADENCE_MS: f64 = 1000.0;
    /// Spawn cadence never drops below this (ms)
    pub const SPAWN_CADENCE_FLOOR_MS: f64 = 400.0;
    /// Cadence reduction per difficulty step (ms)
    pub const SPAWN_CADENCE_STEP_MS: f64 = 100.0;

    /// Difficulty multiplier increase per step (no ceiling)
    pub const DIFFICULTY_STEP: f64 = 0.1;
    /// A difficulty step fires every time this many countdown seconds elapse
    pub const DIFFICULTY_STEP_INTERVAL_SECS: i32 = 10;

    /// Target lifetime at difficulty 1 (ms); divided by the multiplier at spawn
    pub const BASE_TARGET_LIFETIME_MS: f64 = 2000.0;
    /// Maximum pointer-to-center distance that counts as a hit (px)
    pub const HIT_RADIUS: f32 = 40.0;
    /// Spawn positions are inset from the canvas edges by this margin (px)
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Pop-in scale increment per frame tick (toward 1.0)
    pub const APPEAR_SCALE_STEP: f32 = 0.1;

    /// Every frame tick advances this much simulated time regardless of the
    /// real inter-frame gap (the source design's frozen-dt policy)
    pub const FRAME_DT_MS: f64 = 16.0;

    /// Score awarded for hitting a hostile target
    pub const HOSTILE_REWARD: i32 = 10;
    /// Score removed for hitting a friendly target
    pub const FRIENDLY_SCORE_PENALTY: i32 = 20;
    /// Countdown seconds removed for hitting a friendly target
    pub const FRIENDLY_TIME_PENALTY_SECS: i32 = 5;
    /// Final score required for a successful match
    pub const WIN_SCORE: i32 = 100;
}

/// Squared distance between two points, for cheap radius comparisons
#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}
