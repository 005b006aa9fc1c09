//! Leaf Hop - An endless vertical platform-bouncing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, physics, collisions)
//! - `renderer`: Render surface abstraction and per-frame draw calls
//! - `host`: Frame scheduling, asset gate and input mapping
//! - `tuning`: Data-driven game balance

pub mod host;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError, TuningPreset};

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 320.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Platform sprite size
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 60.0;
    /// First platform sits this far above the bottom of the canvas
    pub const PLATFORM_START_OFFSET: f32 = 50.0;
    /// Platforms keep this distance from the left and right canvas edges
    pub const EDGE_MARGIN: f32 = 25.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Player spawns this far above the first platform's top
    pub const PLAYER_START_OFFSET: f32 = 60.0;
    /// Player spawns this far left of the canvas center
    pub const PLAYER_START_X_OFFSET: f32 = 20.0;

    /// Vertical acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.03;
    /// Horizontal deceleration per frame when no direction key is held
    pub const DRAG: f32 = 0.3;
    /// Vertical velocity applied on landing
    pub const BOUNCE_VELOCITY: f32 = -3.0;
    /// Vertical velocity applied by the jump key
    pub const JUMP_VELOCITY: f32 = -3.5;
    /// Horizontal velocity set by a direction key
    pub const MOVE_SPEED: f32 = 1.0;

    /// Initial vertical gap range between consecutive platforms
    pub const MIN_PLATFORM_SPACE: f32 = 15.0;
    pub const MAX_PLATFORM_SPACE: f32 = 20.0;
    /// Gap growth per platform generated while scrolling
    pub const PLATFORM_SPACE_STEP: f32 = 0.5;

    /// Redraws allowed when placing an early platform outside the center band
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
}
