//! Procedural platform column
//!
//! Platforms are generated bottom-up: each new one sits above the previous by
//! the platform height plus a random gap. The gap range widens as the player
//! climbs, capped at half the canvas so the next platform stays reachable.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Platform;
use crate::tuning::Tuning;

/// Owns the live platforms, the difficulty ramp and the run's RNG
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    /// Generation order; the last element is the highest platform
    platforms: Vec<Platform>,
    min_space: f32,
    max_space: f32,
    rng: Pcg32,
}

impl WorldGenerator {
    /// Seed the start platform and fill the canvas up past its top edge
    pub fn initialize(tuning: &Tuning, seed: u64) -> Self {
        let start = Platform::new(
            tuning.canvas_width / 2.0 - tuning.platform_width / 2.0,
            tuning.platform_start(),
        );

        let mut world = Self {
            platforms: vec![start],
            min_space: tuning.min_platform_space,
            max_space: tuning.max_platform_space,
            rng: Pcg32::seed_from_u64(seed),
        };

        let mut y = start.pos.y;
        while y > 0.0 {
            y -= tuning.platform_height + world.random_space();
            let x = world.place_initial_x(y, tuning);
            world.platforms.push(Platform::new(x, y));
        }

        log::debug!(
            "World filled: {} platforms, top at y={:.1}",
            world.platforms.len(),
            y
        );
        world
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    #[cfg(test)]
    pub(crate) fn platforms_mut(&mut self) -> &mut Vec<Platform> {
        &mut self.platforms
    }

    /// Highest (most recently generated) platform
    pub fn top(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Current minimum gap between platforms
    pub fn min_space(&self) -> f32 {
        self.min_space
    }

    /// Current maximum gap between platforms
    pub fn max_space(&self) -> f32 {
        self.max_space
    }

    /// Append one platform above the current top and ramp up the difficulty
    pub fn extend(&mut self, tuning: &Tuning) {
        let base_y = self
            .top()
            .map(|p| p.pos.y)
            .unwrap_or(tuning.canvas_height);
        let y = base_y - (tuning.platform_height + self.random_space());
        let x = self.random_x(tuning);
        self.platforms.push(Platform::new(x, y));

        self.min_space += tuning.platform_space_step;
        self.max_space = (self.max_space + tuning.platform_space_step).min(tuning.space_cap());
        // Keep the gap range non-empty once the max hits its cap
        self.min_space = self.min_space.min(self.max_space);

        log::debug!(
            "Platform added at ({:.1}, {:.1}), gap now {:.1}..{:.1}",
            x,
            y,
            self.min_space,
            self.max_space
        );
    }

    /// Extend until the top platform is at or above the canvas top. Returns the number added.
    pub fn extend_to_top(&mut self, tuning: &Tuning) -> usize {
        let mut added = 0;
        while self.top().is_none_or(|p| p.pos.y > 0.0) {
            self.extend(tuning);
            added += 1;
        }
        added
    }

    /// Move every platform down by `amount`
    pub fn scroll(&mut self, amount: f32) {
        for platform in &mut self.platforms {
            platform.pos.y += amount;
        }
    }

    /// Drop platforms that scrolled past the bottom. Returns the number removed.
    pub fn retire(&mut self, tuning: &Tuning) -> usize {
        let before = self.platforms.len();
        self.platforms.retain(|p| p.pos.y < tuning.canvas_height);
        let retired = before - self.platforms.len();
        if retired > 0 {
            log::trace!("Retired {} platforms, {} live", retired, self.platforms.len());
        }
        retired
    }

    /// Whether `x` would put an early platform in the start column
    pub fn in_center_band(x: f32, tuning: &Tuning) -> bool {
        let (band_lo, band_hi) = center_band(tuning);
        x > band_lo && x < band_hi
    }

    fn random_space(&mut self) -> f32 {
        if self.max_space > self.min_space {
            self.rng.random_range(self.min_space..self.max_space)
        } else {
            self.min_space
        }
    }

    fn random_x(&mut self, tuning: &Tuning) -> f32 {
        let (lo, hi) = x_range(tuning);
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }

    /// Below the midline, redraw x until it leaves the center band
    fn place_initial_x(&mut self, y: f32, tuning: &Tuning) -> f32 {
        let mut x = self.random_x(tuning);
        if y <= tuning.midline() {
            return x;
        }

        for _ in 1..tuning.max_placement_attempts {
            if !Self::in_center_band(x, tuning) {
                return x;
            }
            x = self.random_x(tuning);
        }
        if !Self::in_center_band(x, tuning) {
            return x;
        }

        let fallback = band_edge_x(x, tuning);
        log::warn!(
            "No x outside the center band after {} draws at y={:.1}, using {:.1}",
            tuning.max_placement_attempts,
            y,
            fallback
        );
        fallback
    }
}

/// Allowed platform x range (left edge)
fn x_range(tuning: &Tuning) -> (f32, f32) {
    (
        tuning.edge_margin,
        tuning.canvas_width - tuning.edge_margin - tuning.platform_width,
    )
}

/// Open interval of x values that overlap the start platform's column
fn center_band(tuning: &Tuning) -> (f32, f32) {
    let center = tuning.canvas_width / 2.0;
    (
        center - tuning.platform_width * 1.5,
        center + tuning.platform_width / 2.0,
    )
}

/// Deterministic x just outside the band, nearest to `x`. Falls back to `x`
/// clamped into range when the canvas is too narrow for either side.
fn band_edge_x(x: f32, tuning: &Tuning) -> f32 {
    let (lo, hi) = x_range(tuning);
    let (band_lo, band_hi) = center_band(tuning);

    let left = (band_lo >= lo).then_some(band_lo);
    let right = (band_hi <= hi).then_some(band_hi);

    match (left, right) {
        (Some(l), Some(r)) => {
            if (x - l).abs() <= (r - x).abs() {
                l
            } else {
                r
            }
        }
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (None, None) => x.clamp(lo, hi.max(lo)),
    }
}
