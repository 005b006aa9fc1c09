//! Collision detection for axis-aligned boxes
//!
//! Landing uses a crossing test rather than plain overlap: the player only
//! bounces when its bottom edge was above the platform top last frame and
//! passes through it this frame while falling. Rising through a platform or
//! brushing its side never counts.

use glam::Vec2;

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict horizontal overlap (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Whether a falling `body` moving by `dy` this frame lands on top of `surface`.
///
/// `prev_y` is the body's top edge at the end of the previous frame.
pub fn lands_on(body: &Aabb, dy: f32, prev_y: f32, surface: &Aabb) -> bool {
    let falling = dy > 0.0;
    let was_above = prev_y + body.size.y <= surface.top();
    let crosses_top = body.top() + dy < surface.top() && body.bottom() + dy > surface.top();

    falling && was_above && body.overlaps_x(surface) && crosses_top
}

/// Horizontal screen wrap: leaving one side re-enters from the other.
///
/// Returns the wrapped x, or `None` if the body is still (partly) on screen.
pub fn wrap_x(x: f32, width: f32, canvas_width: f32) -> Option<f32> {
    if x + width < 0.0 {
        Some(canvas_width)
    } else if x > canvas_width {
        Some(-width)
    } else {
        None
    }
}
