//! Match state and core simulation types
//!
//! One `MatchState` owns everything mutable for a match: the countdown, the
//! score, the active targets, and the RNG. Hosts create one instance and keep
//! it for the lifetime of the page/process; `start()` fully resets it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Whether hitting a target rewards or penalizes the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Shoot these: saboteurs, mines, drones
    Hostile,
    /// Do NOT shoot these
    Friendly,
}

/// A fixed target archetype: what it looks like and which side it is on
#[derive(Debug)]
pub struct TargetTemplate {
    pub symbol: &'static str,
    pub disposition: Disposition,
    /// Idle sway rate used by the drawer; no gameplay effect
    pub anim_speed: f32,
}

/// The fixed template set; category is chosen uniformly at spawn
pub const TARGET_TEMPLATES: &[TargetTemplate] = &[
    TargetTemplate { symbol: "💂", disposition: Disposition::Hostile, anim_speed: 1.0 },
    TargetTemplate { symbol: "💣", disposition: Disposition::Hostile, anim_speed: 0.0 },
    TargetTemplate { symbol: "🚁", disposition: Disposition::Hostile, anim_speed: 2.0 },
    TargetTemplate { symbol: "🎅", disposition: Disposition::Friendly, anim_speed: 1.5 },
    TargetTemplate { symbol: "🦌", disposition: Disposition::Friendly, anim_speed: 2.0 },
];

/// One clickable target on the canvas
#[derive(Debug)]
pub struct Target {
    pub pos: Vec2,
    pub template: &'static TargetTemplate,
    /// Pointer-to-center distance counted as a hit
    pub hit_radius: f32,
    /// Lifetime at spawn; frozen even if difficulty changes afterwards
    pub max_lifetime_ms: f64,
    pub remaining_ms: f64,
    /// Pop-in animation state, 0.0 -> 1.0
    pub scale: f32,
}

impl Target {
    /// Spawn a target at `pos` with a lifetime derived from the current
    /// difficulty multiplier
    pub fn new(pos: Vec2, template: &'static TargetTemplate, difficulty: f64) -> Self {
        let max_lifetime_ms = BASE_TARGET_LIFETIME_MS / difficulty;
        Self {
            pos,
            template,
            hit_radius: HIT_RADIUS,
            max_lifetime_ms,
            remaining_ms: max_lifetime_ms,
            scale: 0.0,
        }
    }

    /// Advance decay and the pop-in animation by one frame delta
    pub fn update(&mut self, dt_ms: f64) {
        self.remaining_ms -= dt_ms;
        if self.scale < 1.0 {
            self.scale = (self.scale + APPEAR_SCALE_STEP).min(1.0);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    /// Render alpha: fades with remaining lifetime. Visual countdown only,
    /// never a scored quantity.
    pub fn opacity(&self) -> f32 {
        ((self.remaining_ms / self.max_lifetime_ms) as f32).clamp(0.0, 1.0)
    }

    pub fn disposition(&self) -> Disposition {
        self.template.disposition
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Before the first start
    Idle,
    /// Countdown live, targets spawning
    Running,
    /// Resolved; restart permitted
    Ended,
}

/// End-of-match resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Score reached the win threshold
    Success,
    Failure,
}

impl Outcome {
    pub fn from_score(score: i32) -> Self {
        if score >= WIN_SCORE {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "mission accomplished",
            Outcome::Failure => "mission failed",
        }
    }
}

/// Notifications for the presentation layer, drained by the host after every
/// simulation entry point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    ScoreChanged(i32),
    TimeChanged(i32),
    /// A target was hit; drives transient flash effects, not scoring
    HitFeedback { pos: Vec2, disposition: Disposition },
    MatchEnded {
        score: i32,
        outcome: Outcome,
        /// True when the friendly-fire time penalty ended the match
        penalty_flash: bool,
    },
}

/// Complete match state
#[derive(Debug)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub score: i32,
    /// Countdown seconds; can briefly go negative via the friendly-fire penalty
    pub time_remaining: i32,
    /// Scalar >= 1, shortens lifetimes and cadence as the match progresses
    pub difficulty: f64,
    /// Minimum interval between automatic spawns (ms)
    pub spawn_cadence_ms: f64,
    /// Frame timestamp of the most recent spawn (ms)
    pub last_spawn_ms: f64,
    /// Playable canvas size (px); spawns are inset by `SPAWN_MARGIN`
    pub bounds: Vec2,
    /// Active targets in spawn order (newest last)
    pub targets: Vec<Target>,
    /// Pending presentation events
    pub events: Vec<MatchEvent>,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// Create an idle match; call `start()` to begin playing
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            phase: MatchPhase::Idle,
            score: 0,
            time_remaining: MATCH_DURATION_SECS,
            difficulty: 1.0,
            spawn_cadence_ms: BASE_SPAWN_CADENCE_MS,
            last_spawn_ms: 0.0,
            bounds,
            targets: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a match, fully resetting all per-match state. Valid from any
    /// phase: starting while one is running is a restart, never a resume.
    pub fn start(&mut self) {
        self.phase = MatchPhase::Running;
        self.score = 0;
        self.time_remaining = MATCH_DURATION_SECS;
        self.difficulty = 1.0;
        self.spawn_cadence_ms = BASE_SPAWN_CADENCE_MS;
        self.last_spawn_ms = 0.0;
        self.targets.clear();
        self.events.clear();
        self.events.push(MatchEvent::ScoreChanged(self.score));
        self.events.push(MatchEvent::TimeChanged(self.time_remaining));
        log::info!("match started ({}s countdown)", MATCH_DURATION_SECS);
    }

    pub fn running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Uniform random choice from the template set
    pub(crate) fn random_template(&mut self) -> &'static TargetTemplate {
        let idx = self.rng.random_range(0..TARGET_TEMPLATES.len());
        &TARGET_TEMPLATES[idx]
    }

    /// Random in-bounds spawn position, inset so targets never clip an edge
    pub(crate) fn random_position(&mut self) -> Vec2 {
        let max_x = (self.bounds.x - SPAWN_MARGIN).max(SPAWN_MARGIN + 1.0);
        let max_y = (self.bounds.y - SPAWN_MARGIN).max(SPAWN_MARGIN + 1.0);
        Vec2::new(
            self.rng.random_range(SPAWN_MARGIN..max_x),
            self.rng.random_range(SPAWN_MARGIN..max_y),
        )
    }

    /// Take all pending presentation events
    pub fn drain_events(&mut self) -> impl Iterator<Item = MatchEvent> + '_ {
        self.events.drain(..)
    }
}
