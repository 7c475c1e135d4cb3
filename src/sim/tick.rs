//! Frame and countdown ticks
//!
//! Two externally driven clocks advance a match: the frame tick (one call per
//! display refresh opportunity, advancing a frozen 16 ms of simulated time)
//! and the one-second countdown tick. Both are no-ops unless the match is
//! running, so a host that keeps scheduling after the end draws at most one
//! extra frame and nothing more.

use crate::consts::*;
use crate::sim::spawn;
use crate::sim::state::{MatchEvent, MatchPhase, MatchState, Outcome};

/// One frame tick at timestamp `now_ms`: spawn if the cadence gate is open,
/// advance every active target, then drop the expired ones.
///
/// Each call advances exactly `FRAME_DT_MS` of simulated time regardless of
/// the real inter-frame gap (frozen-dt policy inherited from the source
/// design).
pub fn frame(state: &mut MatchState, now_ms: f64) {
    if !state.running() {
        return;
    }

    if spawn::spawn_due(now_ms, state.last_spawn_ms, state.spawn_cadence_ms) {
        spawn::spawn_target(state, now_ms);
    }

    for target in state.targets.iter_mut().rev() {
        target.update(FRAME_DT_MS);
    }
    state.targets.retain(|t| !t.is_expired());
}

/// One countdown tick: a second elapses, the difficulty ramp is consulted,
/// and the timeout end condition is checked.
pub fn second(state: &mut MatchState) {
    if !state.running() {
        return;
    }

    state.time_remaining -= 1;
    state.events.push(MatchEvent::TimeChanged(state.time_remaining));

    if state.time_remaining % DIFFICULTY_STEP_INTERVAL_SECS == 0 {
        spawn::difficulty_step(state);
    }

    if state.time_remaining <= 0 {
        end_match(state, false);
    }
}

/// Transition `Running -> Ended`, resolving the outcome from the score.
/// `penalty_flash` marks ends forced by the friendly-fire time penalty.
pub fn end_match(state: &mut MatchState, penalty_flash: bool) {
    state.phase = MatchPhase::Ended;
    let outcome = Outcome::from_score(state.score);
    state.events.push(MatchEvent::MatchEnded {
        score: state.score,
        outcome,
        penalty_flash,
    });
    log::info!(
        "match ended: {} (score {}, {}s left)",
        outcome.as_str(),
        state.score,
        state.time_remaining
    );
}
