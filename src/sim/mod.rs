//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only (owned by the world generator)
//! - Platforms kept in generation order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Aabb, lands_on, wrap_x};
pub use state::{Controls, GameState, Key, KeyEvent, Platform, Player};
pub use tick::{FrameReport, Motion, tick};
pub use world::WorldGenerator;
