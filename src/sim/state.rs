//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::world::WorldGenerator;
use crate::tuning::Tuning;

/// A landing surface. Size comes from `Tuning`; only the position moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
}

impl Platform {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }

    pub fn aabb(&self, tuning: &Tuning) -> Aabb {
        Aabb::new(self.pos, Vec2::new(tuning.platform_width, tuning.platform_height))
    }
}

/// The bouncing player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity in units per frame
    pub vel: Vec2,
}

impl Player {
    /// Spawn centered above the first platform
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.canvas_width / 2.0 - tuning.player_start_x_offset,
                tuning.platform_start() - tuning.player_start_offset,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel: Vec2::ZERO,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
}

/// A key transition from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    /// Any key released; which one doesn't matter
    Up,
}

/// Input state shared between key events and frames (last write wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// -1 left, +1 right, 0 idle
    pub direction: i8,
    /// A direction key is currently down
    pub held: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Platform column and difficulty ramp
    pub world: WorldGenerator,
    pub player: Player,
    pub controls: Controls,
    /// Player y at the end of the previous frame (for the crossing test)
    pub prev_player_y: f32,
    /// Frames simulated
    pub time_ticks: u64,
    /// Total distance the world has scrolled down
    pub climbed: f32,
    /// Landings so far
    pub bounces: u32,
}

impl GameState {
    /// Create a new game with a freshly generated platform column
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let world = WorldGenerator::initialize(&tuning, seed);
        let player = Player::spawn(&tuning);

        log::info!(
            "New game: seed={} canvas={}x{} platforms={}",
            seed,
            tuning.canvas_width,
            tuning.canvas_height,
            world.platforms().len()
        );

        Self {
            seed,
            prev_player_y: player.pos.y,
            tuning,
            world,
            player,
            controls: Controls::default(),
            time_ticks: 0,
            climbed: 0.0,
            bounces: 0,
        }
    }

    /// Live platforms in generation order (last = highest)
    pub fn platforms(&self) -> &[Platform] {
        self.world.platforms()
    }

    /// Apply a key transition immediately
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(Key::Left) => {
                self.controls.held = true;
                self.controls.direction = -1;
                self.player.vel.x = -self.tuning.move_speed;
            }
            KeyEvent::Down(Key::Right) => {
                self.controls.held = true;
                self.controls.direction = 1;
                self.player.vel.x = self.tuning.move_speed;
            }
            KeyEvent::Down(Key::Jump) => {
                if self.tuning.jump_enabled {
                    self.player.vel.y = self.tuning.jump_velocity;
                }
            }
            KeyEvent::Up => self.controls.held = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(7, Tuning::default());
        let first = state.platforms()[0];
        assert_eq!(first.pos, Vec2::new(120.0, 430.0));
        assert_eq!(state.player.pos, Vec2::new(140.0, 370.0));
        assert_eq!(state.player.size, Vec2::new(50.0, 40.0));
        assert_eq!(state.prev_player_y, state.player.pos.y);
        assert!(state.platforms().last().unwrap().pos.y <= 0.0);
    }

    #[test]
    fn test_spawn_follows_tuning() {
        let tuning = Tuning {
            player_start_x_offset: 0.0,
            player_start_offset: 100.0,
            ..Tuning::default()
        };
        let player = Player::spawn(&tuning);
        assert_eq!(player.pos, Vec2::new(160.0, 330.0));
    }

    #[test]
    fn test_direction_keys() {
        let mut state = GameState::new(1, Tuning::default());

        state.handle_key(KeyEvent::Down(Key::Left));
        assert_eq!(state.controls, Controls { direction: -1, held: true });
        assert_eq!(state.player.vel.x, -1.0);

        state.handle_key(KeyEvent::Down(Key::Right));
        assert_eq!(state.controls, Controls { direction: 1, held: true });
        assert_eq!(state.player.vel.x, 1.0);

        state.handle_key(KeyEvent::Up);
        assert!(!state.controls.held);
        assert_eq!(state.controls.direction, 1);
        assert_eq!(state.player.vel.x, 1.0);
    }

    #[test]
    fn test_jump_key_respects_flag() {
        let mut state = GameState::new(1, Tuning::default());
        state.handle_key(KeyEvent::Down(Key::Jump));
        assert_eq!(state.player.vel.y, 0.0);

        let tuning = Tuning {
            jump_enabled: true,
            ..Tuning::default()
        };
        let mut state = GameState::new(1, tuning);
        state.handle_key(KeyEvent::Down(Key::Jump));
        assert_eq!(state.player.vel.y, state.tuning.jump_velocity);
        assert!(!state.controls.held);
    }
}
