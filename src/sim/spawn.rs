//! Spawn scheduling and the difficulty ramp
//!
//! Spawning is cadence-gated: one new target whenever enough time has passed
//! since the last spawn. There is deliberately no cap on concurrent targets;
//! uncleared targets piling up is part of the difficulty pressure, and decay
//! keeps the set small in practice.

use crate::consts::*;
use crate::sim::state::{MatchState, Target};

/// True when the cadence gate is open and a target should spawn
#[inline]
pub fn spawn_due(now_ms: f64, last_spawn_ms: f64, cadence_ms: f64) -> bool {
    now_ms - last_spawn_ms > cadence_ms
}

/// Construct one target with a random category and in-bounds position, append
/// it to the active set, and close the cadence gate at `now_ms`
pub fn spawn_target(state: &mut MatchState, now_ms: f64) {
    let template = state.random_template();
    let pos = state.random_position();
    state
        .targets
        .push(Target::new(pos, template, state.difficulty));
    state.last_spawn_ms = now_ms;
}

/// One difficulty step: tighten the spawn cadence (floored) and raise the
/// multiplier (unbounded). Invoked whenever the countdown crosses a multiple
/// of `DIFFICULTY_STEP_INTERVAL_SECS` - escalation is coupled to wall-clock
/// countdown progress, never to player performance.
pub fn difficulty_step(state: &mut MatchState) {
    state.spawn_cadence_ms =
        (state.spawn_cadence_ms - SPAWN_CADENCE_STEP_MS).max(SPAWN_CADENCE_FLOOR_MS);
    state.difficulty += DIFFICULTY_STEP;
    log::debug!(
        "difficulty step: cadence={}ms multiplier={:.1}",
        state.spawn_cadence_ms,
        state.difficulty
    );
}
