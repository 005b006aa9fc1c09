//! Rendering module
//!
//! The simulation never draws. Each frame the host hands a `RenderSurface`
//! to `draw_frame`, which clears the canvas and issues one image draw per
//! platform and then one for the player.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::GameState;

/// Images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Platform,
}

/// A 2D surface that can be cleared and can draw preloaded images
pub trait RenderSurface {
    /// Clear the rectangle at `origin` with `size`
    fn clear(&mut self, origin: Vec2, size: Vec2);
    /// Draw `sprite` with its top-left corner at `pos`, scaled to `size`
    fn draw_image(&mut self, sprite: Sprite, pos: Vec2, size: Vec2);
}

/// Draw one frame: clear, platforms, then the player on top
pub fn draw_frame<S: RenderSurface + ?Sized>(state: &GameState, surface: &mut S) {
    let tuning = &state.tuning;
    surface.clear(
        Vec2::ZERO,
        Vec2::new(tuning.canvas_width, tuning.canvas_height),
    );

    let platform_size = Vec2::new(tuning.platform_width, tuning.platform_height);
    for platform in state.platforms() {
        surface.draw_image(Sprite::Platform, platform.pos, platform_size);
    }

    surface.draw_image(Sprite::Player, state.player.pos, state.player.size);
}
