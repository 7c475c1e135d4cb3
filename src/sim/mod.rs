//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frozen frame delta only (no wall-clock measurement)
//! - Seeded RNG only
//! - Stable target order (spawn order; newest targets resolve hits first)
//! - No rendering or platform dependencies

pub mod hit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use hit::pointer_down;
pub use spawn::{difficulty_step, spawn_due};
pub use state::{
    Disposition, MatchEvent, MatchPhase, MatchState, Outcome, Target, TargetTemplate,
    TARGET_TEMPLATES,
};
pub use tick::{frame, second};
