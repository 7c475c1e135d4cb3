//! Pointer hit resolution and scoring
//!
//! One pointer event resolves to at most one target. Iteration runs newest to
//! oldest, so when targets overlap the most recently spawned one - drawn on
//! top - wins. This is deliberately topmost-wins, not nearest-target.

use glam::Vec2;

use crate::consts::*;
use crate::dist_sq;
use crate::sim::state::{Disposition, MatchEvent, MatchState};
use crate::sim::tick::end_match;

/// Resolve a pointer-down at `pos` (canvas-local coordinates).
///
/// On a hit the target is removed and scoring applied; a friendly hit also
/// costs countdown time and can end the match on the spot, without waiting
/// for the next one-second tick. A miss changes nothing.
///
/// Returns the disposition of the hit target, if any.
pub fn pointer_down(state: &mut MatchState, pos: Vec2) -> Option<Disposition> {
    if !state.running() {
        return None;
    }

    let idx = state
        .targets
        .iter()
        .rposition(|t| dist_sq(pos, t.pos) < t.hit_radius * t.hit_radius)?;

    let target = state.targets.remove(idx);
    let disposition = target.disposition();
    match disposition {
        Disposition::Hostile => {
            state.score += HOSTILE_REWARD;
        }
        Disposition::Friendly => {
            state.score -= FRIENDLY_SCORE_PENALTY;
            state.time_remaining -= FRIENDLY_TIME_PENALTY_SECS;
            state.events.push(MatchEvent::TimeChanged(state.time_remaining));
            log::debug!(
                "friendly fire: score={} time={}s",
                state.score,
                state.time_remaining
            );
        }
    }
    state.events.push(MatchEvent::ScoreChanged(state.score));
    state.events.push(MatchEvent::HitFeedback {
        pos: target.pos,
        disposition,
    });

    // The time penalty can overshoot past zero; end now rather than waiting
    // for the countdown tick.
    if state.time_remaining <= 0 {
        end_match(state, true);
    }

    Some(disposition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{MatchPhase, Outcome, Target, TARGET_TEMPLATES};
    use proptest::prelude::*;

    // Template indices: 0..=2 hostile, 3..=4 friendly
    const HOSTILE: usize = 0;
    const FRIENDLY: usize = 3;

    fn running_state() -> MatchState {
        let mut state = MatchState::new(1, Vec2::new(800.0, 600.0));
        state.start();
        state.events.clear();
        state
    }

    fn push_target(state: &mut MatchState, template_idx: usize, pos: Vec2) {
        let difficulty = state.difficulty;
        state
            .targets
            .push(Target::new(pos, &TARGET_TEMPLATES[template_idx], difficulty));
    }

    #[test]
    fn test_hostile_hit_scores_and_removes_one() {
        let mut state = running_state();
        push_target(&mut state, HOSTILE, Vec2::new(100.0, 100.0));

        let hit = pointer_down(&mut state, Vec2::new(110.0, 95.0));
        assert_eq!(hit, Some(Disposition::Hostile));
        assert_eq!(state.score, 10);
        assert_eq!(state.time_remaining, 45);
        assert!(state.targets.is_empty());
        assert!(state
            .events
            .contains(&MatchEvent::ScoreChanged(10)));
    }

    #[test]
    fn test_friendly_hit_penalizes_score_and_time() {
        let mut state = running_state();
        push_target(&mut state, FRIENDLY, Vec2::new(200.0, 200.0));

        let hit = pointer_down(&mut state, Vec2::new(200.0, 200.0));
        assert_eq!(hit, Some(Disposition::Friendly));
        assert_eq!(state.score, -20);
        assert_eq!(state.time_remaining, 40);
        assert!(state.targets.is_empty());
        assert!(state.events.contains(&MatchEvent::TimeChanged(40)));
    }

    #[test]
    fn test_topmost_wins_on_overlap() {
        let mut state = running_state();
        // Older hostile under a newer friendly at the same spot
        push_target(&mut state, HOSTILE, Vec2::new(300.0, 300.0));
        push_target(&mut state, FRIENDLY, Vec2::new(305.0, 300.0));

        let hit = pointer_down(&mut state, Vec2::new(300.0, 300.0));
        assert_eq!(hit, Some(Disposition::Friendly));
        // The older target survives
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].disposition(), Disposition::Hostile);
    }

    #[test]
    fn test_exactly_at_radius_is_a_miss() {
        let mut state = running_state();
        push_target(&mut state, HOSTILE, Vec2::new(100.0, 100.0));
        // dist == hit_radius fails the strict `<` test
        let hit = pointer_down(&mut state, Vec2::new(140.0, 100.0));
        assert_eq!(hit, None);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_miss_and_empty_are_no_ops() {
        let mut state = running_state();
        assert_eq!(pointer_down(&mut state, Vec2::new(50.0, 50.0)), None);
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());

        push_target(&mut state, HOSTILE, Vec2::new(100.0, 100.0));
        assert_eq!(pointer_down(&mut state, Vec2::new(500.0, 500.0)), None);
        assert_eq!(state.score, 0);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_hit_ignored_when_not_running() {
        let mut state = MatchState::new(1, Vec2::new(800.0, 600.0));
        push_target(&mut state, HOSTILE, Vec2::new(100.0, 100.0));
        assert_eq!(pointer_down(&mut state, Vec2::new(100.0, 100.0)), None);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_removed_target_cannot_be_hit_again() {
        let mut state = running_state();
        push_target(&mut state, HOSTILE, Vec2::new(100.0, 100.0));
        assert!(pointer_down(&mut state, Vec2::new(100.0, 100.0)).is_some());
        assert_eq!(pointer_down(&mut state, Vec2::new(100.0, 100.0)), None);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_penalty_overshoot_ends_match_synchronously() {
        let mut state = running_state();
        state.time_remaining = 3;
        state.score = 120;
        push_target(&mut state, FRIENDLY, Vec2::new(100.0, 100.0));

        pointer_down(&mut state, Vec2::new(100.0, 100.0));
        assert_eq!(state.time_remaining, -2);
        assert_eq!(state.phase, MatchPhase::Ended);
        assert!(state.events.iter().any(|e| matches!(
            e,
            MatchEvent::MatchEnded {
                score: 100,
                outcome: Outcome::Success,
                penalty_flash: true,
            }
        )));
    }

    proptest! {
        #[test]
        fn prop_score_is_sum_of_hits(hostile_flags in proptest::collection::vec(any::<bool>(), 0..50)) {
            let mut state = running_state();
            // Keep the countdown far from zero so penalties never end the match
            state.time_remaining = 100_000;

            let mut expected = 0;
            for &hostile in &hostile_flags {
                let idx = if hostile { HOSTILE } else { FRIENDLY };
                push_target(&mut state, idx, Vec2::new(400.0, 300.0));
                let hit = pointer_down(&mut state, Vec2::new(400.0, 300.0));
                prop_assert!(hit.is_some());
                expected += if hostile { 10 } else { -20 };
            }
            prop_assert_eq!(state.score, expected);
            prop_assert!(state.targets.is_empty());
        }
    }
}
