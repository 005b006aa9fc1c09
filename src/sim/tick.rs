//! Per-frame simulation step
//!
//! Order within a frame: gravity, scroll-or-move, drag, horizontal move,
//! screen wrap, landing, bookkeeping. Each step is its own function so the
//! host (and tests) can reason about them separately; `tick` runs them all.

use super::collision::{lands_on, wrap_x};
use super::state::GameState;

/// Vertical regime of the player for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Moving down (or at rest): the player moves
    Falling,
    /// Moving up in the lower half: the player moves
    Rising,
    /// Moving up above the midline: the world scrolls instead
    Scrolling,
}

impl Motion {
    pub fn classify(y: f32, dy: f32, midline: f32) -> Self {
        if dy >= 0.0 {
            Motion::Falling
        } else if y < midline {
            Motion::Scrolling
        } else {
            Motion::Rising
        }
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub motion: Motion,
    /// Platforms appended at the top while scrolling
    pub added: usize,
    /// The player landed on a platform
    pub bounced: bool,
    /// Platforms dropped off the bottom
    pub retired: usize,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) -> FrameReport {
    state.time_ticks += 1;

    apply_gravity(state);
    let (motion, added) = resolve_vertical(state);
    apply_drag(state);
    state.player.pos.x += state.player.vel.x;
    wrap_player(state);
    let bounced = resolve_landing(state);
    let retired = finish_frame(state);

    FrameReport {
        motion,
        added,
        bounced,
        retired,
    }
}

pub fn apply_gravity(state: &mut GameState) {
    state.player.vel.y += state.tuning.gravity;
}

/// Move the player vertically, or scroll the world down by the player's
/// upward speed once it is above the midline. Returns the regime used and
/// how many platforms were generated.
pub fn resolve_vertical(state: &mut GameState) -> (Motion, usize) {
    let dy = state.player.vel.y;
    let motion = Motion::classify(state.player.pos.y, dy, state.tuning.midline());

    match motion {
        Motion::Scrolling => {
            state.world.scroll(-dy);
            state.climbed += -dy;
            let added = state.world.extend_to_top(&state.tuning);
            if added > 0 {
                log::trace!(
                    "Scrolled {:.2}, generated {} platforms (gap {:.1}..{:.1})",
                    -dy,
                    added,
                    state.world.min_space(),
                    state.world.max_space()
                );
            }
            (motion, added)
        }
        Motion::Falling | Motion::Rising => {
            state.player.pos.y += dy;
            (motion, 0)
        }
    }
}

/// Coast toward zero horizontal speed while no direction key is held.
/// Stops exactly at zero instead of flipping direction.
pub fn apply_drag(state: &mut GameState) {
    if state.controls.held {
        return;
    }

    let drag = state.tuning.drag;
    let vel = &mut state.player.vel;
    if state.controls.direction < 0 {
        vel.x += drag;
        if vel.x > 0.0 {
            vel.x = 0.0;
            state.controls.direction = 0;
        }
    } else if state.controls.direction > 0 {
        vel.x -= drag;
        if vel.x < 0.0 {
            vel.x = 0.0;
            state.controls.direction = 0;
        }
    }
}

pub fn wrap_player(state: &mut GameState) {
    let player = &mut state.player;
    if let Some(x) = wrap_x(player.pos.x, player.size.x, state.tuning.canvas_width) {
        player.pos.x = x;
    }
}

/// Bounce off the first platform the player falls onto. Returns true on landing.
pub fn resolve_landing(state: &mut GameState) -> bool {
    let mut bounced = false;
    for platform in state.world.platforms() {
        let surface = platform.aabb(&state.tuning);
        if lands_on(
            &state.player.aabb(),
            state.player.vel.y,
            state.prev_player_y,
            &surface,
        ) {
            state.player.pos.y = surface.top() - state.player.size.y;
            state.player.vel.y = state.tuning.bounce_velocity;
            bounced = true;
        }
    }

    if bounced {
        state.bounces += 1;
        log::trace!("Bounce #{} at y={:.1}", state.bounces, state.player.pos.y);
    }
    bounced
}

/// Remember this frame's y for the next crossing test and drop platforms
/// below the canvas. Returns the number retired.
pub fn finish_frame(state: &mut GameState) -> usize {
    state.prev_player_y = state.player.pos.y;
    state.world.retire(&state.tuning)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::{Controls, Key, KeyEvent, Platform};
    use crate::tuning::Tuning;

    fn new_state() -> GameState {
        GameState::new(12345, Tuning::default())
    }

    /// State whose column holds exactly `platforms`
    fn state_with_platforms(platforms: &[Platform]) -> GameState {
        let mut state = new_state();
        let column = state.world.platforms_mut();
        column.clear();
        column.extend_from_slice(platforms);
        state
    }

    #[test]
    fn test_first_frame_falls_by_gravity() {
        let mut state = new_state();
        assert_eq!(state.player.pos, Vec2::new(140.0, 370.0));

        let report = tick(&mut state);
        assert_eq!(report.motion, Motion::Falling);
        assert!(!report.bounced);
        assert!((state.player.vel.y - 0.03).abs() < 1e-6);
        assert!((state.player.pos.y - 370.03).abs() < 1e-4);
        assert_eq!(state.prev_player_y, state.player.pos.y);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Motion::classify(100.0, 0.0, 240.0), Motion::Falling);
        assert_eq!(Motion::classify(100.0, 1.0, 240.0), Motion::Falling);
        assert_eq!(Motion::classify(300.0, -1.0, 240.0), Motion::Rising);
        assert_eq!(Motion::classify(240.0, -1.0, 240.0), Motion::Rising);
        assert_eq!(Motion::classify(239.0, -1.0, 240.0), Motion::Scrolling);
    }

    #[test]
    fn test_scroll_moves_world_not_player() {
        let mut state = new_state();
        state.player.pos.y = 200.0;
        state.player.vel.y = -2.0;
        let before: Vec<Platform> = state.platforms().to_vec();

        let (motion, _) = resolve_vertical(&mut state);
        assert_eq!(motion, Motion::Scrolling);
        assert_eq!(state.player.pos.y, 200.0);
        for (old, new) in before.iter().zip(state.platforms()) {
            assert_eq!(new.pos.x, old.pos.x);
            assert!((new.pos.y - (old.pos.y + 2.0)).abs() < 1e-4);
        }
        assert!((state.climbed - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_generates_to_top() {
        let mut state = new_state();
        state.player.pos.y = 100.0;
        state.player.vel.y = -150.0;
        let count = state.platforms().len();

        let (_, added) = resolve_vertical(&mut state);
        assert!(added > 0);
        assert_eq!(state.platforms().len(), count + added);
        assert!(state.world.top().unwrap().pos.y <= 0.0);
        assert!(state.world.min_space() > state.tuning.min_platform_space);
    }

    #[test]
    fn test_move_leaves_world_alone() {
        let mut state = new_state();
        state.player.pos.y = 300.0;
        state.player.vel.y = -2.0;
        let before: Vec<Platform> = state.platforms().to_vec();

        let (motion, added) = resolve_vertical(&mut state);
        assert_eq!(motion, Motion::Rising);
        assert_eq!(added, 0);
        assert_eq!(state.player.pos.y, 298.0);
        assert_eq!(state.platforms(), &before[..]);
    }

    #[test]
    fn test_drag_decays_to_zero_without_flipping() {
        let mut state = new_state();
        state.handle_key(KeyEvent::Down(Key::Left));
        state.handle_key(KeyEvent::Up);

        apply_drag(&mut state);
        assert!((state.player.vel.x + 0.7).abs() < 1e-6);
        apply_drag(&mut state);
        apply_drag(&mut state);
        assert!((state.player.vel.x + 0.1).abs() < 1e-5);
        apply_drag(&mut state);
        assert_eq!(state.player.vel.x, 0.0);
        assert_eq!(state.controls.direction, 0);

        // Idle stays idle
        apply_drag(&mut state);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn test_drag_skipped_while_held() {
        let mut state = new_state();
        state.handle_key(KeyEvent::Down(Key::Right));
        apply_drag(&mut state);
        assert_eq!(state.player.vel.x, 1.0);
        assert_eq!(state.controls, Controls { direction: 1, held: true });
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut state = new_state();
        state.handle_key(KeyEvent::Down(Key::Right));
        tick(&mut state);
        tick(&mut state);
        assert!((state.player.pos.x - 142.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_left_to_right() {
        let mut state = new_state();
        state.player.pos.x = -state.player.size.x - 1.0;
        tick(&mut state);
        assert_eq!(state.player.pos.x, state.tuning.canvas_width);
    }

    #[test]
    fn test_wrap_right_to_left() {
        let mut state = new_state();
        state.player.pos.x = state.tuning.canvas_width + 1.0;
        tick(&mut state);
        assert_eq!(state.player.pos.x, -state.player.size.x);
    }

    #[test]
    fn test_bounce_snaps_to_platform_top() {
        let mut state = state_with_platforms(&[Platform::new(100.0, 300.0)]);
        state.player.pos = Vec2::new(110.0, 259.0);
        state.prev_player_y = 259.0;
        state.player.vel.y = 0.97;

        let report = tick(&mut state);
        assert!(report.bounced);
        assert_eq!(state.player.pos.y, 300.0 - state.player.size.y);
        assert_eq!(state.player.vel.y, state.tuning.bounce_velocity);
        assert_eq!(state.bounces, 1);
        assert_eq!(state.prev_player_y, 260.0);
    }

    #[test]
    fn test_one_bounce_per_frame() {
        let mut state =
            state_with_platforms(&[Platform::new(100.0, 300.0), Platform::new(120.0, 300.5)]);
        state.player.pos = Vec2::new(110.0, 259.0);
        state.prev_player_y = 259.0;
        state.player.vel.y = 0.97;

        tick(&mut state);
        assert_eq!(state.bounces, 1);
        assert_eq!(state.player.pos.y, 260.0);
        assert_eq!(state.player.vel.y, state.tuning.bounce_velocity);
    }

    #[test]
    fn test_no_bounce_while_rising_through() {
        let mut state = state_with_platforms(&[Platform::new(100.0, 300.0)]);
        state.player.pos = Vec2::new(110.0, 290.0);
        state.prev_player_y = 292.0;
        state.player.vel.y = -2.0;

        let report = tick(&mut state);
        assert!(!report.bounced);
        assert!(state.player.vel.y < 0.0);
    }

    #[test]
    fn test_retire_on_next_frame() {
        let mut state = new_state();
        let count = state.platforms().len();
        state.world.platforms_mut()[0].pos.y = state.tuning.canvas_height;

        let report = tick(&mut state);
        assert_eq!(report.retired, 1);
        assert_eq!(state.platforms().len(), count - 1);
        assert!(state
            .platforms()
            .iter()
            .all(|p| p.pos.y < state.tuning.canvas_height));
    }

    #[test]
    fn test_player_settles_into_bounce_loop() {
        // With no input the player bounces in place on the start platform
        let mut state = new_state();
        let mut bounced = false;
        for _ in 0..400 {
            bounced |= tick(&mut state).bounced;
        }
        assert!(bounced);
        assert!(state.player.pos.y < state.tuning.canvas_height);
        assert_eq!(state.climbed, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();

        let script = [
            (30, KeyEvent::Down(Key::Right)),
            (90, KeyEvent::Up),
            (200, KeyEvent::Down(Key::Left)),
            (260, KeyEvent::Up),
        ];

        for frame in 0..2000 {
            for (at, event) in script {
                if at == frame {
                    state1.handle_key(event);
                    state2.handle_key(event);
                }
            }
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.platforms(), state2.platforms());
        assert_eq!(state1.bounces, state2.bounces);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut state = new_state();
        for frame in 0..5000u32 {
            // Steer back and forth so the player climbs off different platforms
            match frame % 400 {
                0 => state.handle_key(KeyEvent::Down(Key::Left)),
                60 => state.handle_key(KeyEvent::Up),
                200 => state.handle_key(KeyEvent::Down(Key::Right)),
                260 => state.handle_key(KeyEvent::Up),
                _ => {}
            }
            tick(&mut state);

            assert!(state
                .platforms()
                .iter()
                .all(|p| p.pos.y < state.tuning.canvas_height));
            assert!(state.world.max_space() <= state.tuning.space_cap());
            assert!(state.world.min_space() <= state.world.max_space());
        }
    }

    proptest! {
        #[test]
        fn prop_scroll_or_move_exclusive(y in -100.0f32..600.0, dy in -10.0f32..10.0) {
            let mut state = new_state();
            state.player.pos.y = y;
            state.player.vel.y = dy;
            let before: Vec<Platform> = state.platforms().to_vec();

            let (motion, _) = resolve_vertical(&mut state);
            if y < state.tuning.midline() && dy < 0.0 {
                prop_assert_eq!(motion, Motion::Scrolling);
                prop_assert_eq!(state.player.pos.y, y);
                for (old, new) in before.iter().zip(state.platforms()) {
                    prop_assert!((new.pos.y - old.pos.y + dy).abs() < 1e-3);
                }
            } else {
                prop_assert_eq!(state.player.pos.y, y + dy);
                prop_assert_eq!(state.platforms(), &before[..]);
            }
        }

        #[test]
        fn prop_wrap_lands_on_opposite_side(offset in 0.5f32..500.0) {
            let mut state = new_state();
            let width = state.player.size.x;
            let canvas = state.tuning.canvas_width;

            state.player.pos.x = -width - offset;
            wrap_player(&mut state);
            prop_assert_eq!(state.player.pos.x, canvas);

            state.player.pos.x = canvas + offset;
            wrap_player(&mut state);
            prop_assert_eq!(state.player.pos.x, -width);
        }
    }
}
