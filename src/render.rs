//! Drawer seam between the simulation and the presentation layer
//!
//! The simulation never draws; `draw_frame` is a read-only pass over
//! `MatchState` that hands every visible target to a `TargetDrawer`. The wasm
//! shell implements the trait over a canvas 2d context; tests use a recording
//! drawer.

use glam::Vec2;

use crate::sim::state::MatchState;

/// Minimal drawing surface the game needs: wipe the frame, place a symbol
pub trait TargetDrawer {
    fn clear(&mut self, bounds: Vec2);
    /// Draw `symbol` centered at `pos`. `size` is the font size in px and
    /// `alpha` the opacity in [0, 1]. `sway` is the template's idle sway
    /// rate, a purely decorative hint.
    fn draw_symbol(&mut self, symbol: &str, pos: Vec2, size: f32, alpha: f32, sway: f32);
}

/// Render one frame: clear, then draw every active target newest-first.
/// Size follows the pop-in scale; opacity follows remaining lifetime, which
/// doubles as the visual countdown affordance.
pub fn draw_frame(state: &MatchState, drawer: &mut impl TargetDrawer) {
    drawer.clear(state.bounds);
    for target in state.targets.iter().rev() {
        let size = target.hit_radius * 2.0 * target.scale;
        drawer.draw_symbol(
            target.template.symbol,
            target.pos,
            size,
            target.opacity(),
            target.template.anim_speed,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Target, TARGET_TEMPLATES};

    #[derive(Default)]
    struct RecordingDrawer {
        clears: usize,
        symbols: Vec<(String, Vec2, f32, f32)>,
    }

    impl TargetDrawer for RecordingDrawer {
        fn clear(&mut self, _bounds: Vec2) {
            self.clears += 1;
        }
        fn draw_symbol(&mut self, symbol: &str, pos: Vec2, size: f32, alpha: f32, _sway: f32) {
            self.symbols.push((symbol.to_string(), pos, size, alpha));
        }
    }

    #[test]
    fn test_draw_frame_clears_and_draws_each_target() {
        let mut state = MatchState::new(5, Vec2::new(800.0, 600.0));
        state.start();
        state
            .targets
            .push(Target::new(Vec2::new(100.0, 100.0), &TARGET_TEMPLATES[0], 1.0));
        state
            .targets
            .push(Target::new(Vec2::new(200.0, 200.0), &TARGET_TEMPLATES[3], 1.0));

        let mut drawer = RecordingDrawer::default();
        draw_frame(&state, &mut drawer);

        assert_eq!(drawer.clears, 1);
        assert_eq!(drawer.symbols.len(), 2);
        // Newest first
        assert_eq!(drawer.symbols[0].1, Vec2::new(200.0, 200.0));
        assert_eq!(drawer.symbols[1].1, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_size_and_alpha_follow_target_state() {
        let mut state = MatchState::new(5, Vec2::new(800.0, 600.0));
        state.start();
        let mut t = Target::new(Vec2::new(100.0, 100.0), &TARGET_TEMPLATES[0], 1.0);
        t.scale = 0.5;
        t.remaining_ms = t.max_lifetime_ms / 4.0;
        state.targets.push(t);

        let mut drawer = RecordingDrawer::default();
        draw_frame(&state, &mut drawer);

        let (_, _, size, alpha) = drawer.symbols[0];
        assert_eq!(size, 40.0); // 40 * 2 * 0.5
        assert!((alpha - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_empty_state_only_clears() {
        let state = MatchState::new(5, Vec2::new(800.0, 600.0));
        let mut drawer = RecordingDrawer::default();
        draw_frame(&state, &mut drawer);
        assert_eq!(drawer.clears, 1);
        assert!(drawer.symbols.is_empty());
    }
}
