//! Game balance and canvas configuration
//!
//! Every constant the simulation reads lives in `Tuning`, so a whole balance
//! profile can be swapped by loading JSON or picking a preset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Built-in balance profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Small 80x60 leaves
    #[default]
    Compact,
    /// Wide 120x80 leaves
    Classic,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Compact => "Compact",
            TuningPreset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" => Some(TuningPreset::Compact),
            "classic" => Some(TuningPreset::Classic),
            _ => None,
        }
    }

    /// Platform sprite size for this preset
    pub fn platform_size(&self) -> (f32, f32) {
        match self {
            TuningPreset::Compact => (PLATFORM_WIDTH, PLATFORM_HEIGHT),
            TuningPreset::Classic => (120.0, 80.0),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum TuningError {
    /// JSON could not be parsed into `Tuning`
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Data-driven balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    /// Distance of the first platform above the canvas bottom
    pub platform_start_offset: f32,
    /// Horizontal margin platforms keep from both canvas edges
    pub edge_margin: f32,
    /// Starting gap range between consecutive platforms
    pub min_platform_space: f32,
    pub max_platform_space: f32,
    /// Gap growth per platform appended while scrolling
    pub platform_space_step: f32,
    /// Redraw cap for center-band avoidance
    pub max_placement_attempts: u32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_offset: f32,
    /// Spawn x is this far left of the canvas center
    pub player_start_x_offset: f32,
    pub gravity: f32,
    pub drag: f32,
    pub bounce_velocity: f32,
    pub move_speed: f32,

    // === Jump key ===
    pub jump_enabled: bool,
    pub jump_velocity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_start_offset: PLATFORM_START_OFFSET,
            edge_margin: EDGE_MARGIN,
            min_platform_space: MIN_PLATFORM_SPACE,
            max_platform_space: MAX_PLATFORM_SPACE,
            platform_space_step: PLATFORM_SPACE_STEP,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_start_offset: PLAYER_START_OFFSET,
            player_start_x_offset: PLAYER_START_X_OFFSET,
            gravity: GRAVITY,
            drag: DRAG,
            bounce_velocity: BOUNCE_VELOCITY,
            move_speed: MOVE_SPEED,

            jump_enabled: false,
            jump_velocity: JUMP_VELOCITY,
        }
    }
}

impl Tuning {
    /// Create tuning from a preset (applies preset defaults)
    pub fn from_preset(preset: TuningPreset) -> Self {
        let (platform_width, platform_height) = preset.platform_size();
        Self {
            platform_width,
            platform_height,
            ..Self::default()
        }
    }

    /// Same balance, different canvas
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Parse JSON over the defaults and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall generation or break physics
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.canvas_width > 0.0) {
            return invalid("canvas_width", "must be positive");
        }
        if !(self.canvas_height > 0.0) {
            return invalid("canvas_height", "must be positive");
        }
        if !(self.platform_width > 0.0) {
            return invalid("platform_width", "must be positive");
        }
        if !(self.platform_height > 0.0) {
            return invalid("platform_height", "must be positive");
        }
        if !(self.player_width > 0.0) {
            return invalid("player_width", "must be positive");
        }
        if !(self.player_height > 0.0) {
            return invalid("player_height", "must be positive");
        }
        if !(self.platform_height + self.min_platform_space > 0.0) {
            return invalid(
                "min_platform_space",
                "platform_height + min_platform_space must be positive",
            );
        }
        if self.min_platform_space > self.max_platform_space {
            return invalid("max_platform_space", "must be at least min_platform_space");
        }
        if self.max_platform_space > self.space_cap() {
            return invalid(
                "max_platform_space",
                "must not exceed half the canvas height",
            );
        }
        if self.platform_space_step < 0.0 {
            return invalid("platform_space_step", "must not be negative");
        }
        if self.gravity < 0.0 {
            return invalid("gravity", "must not be negative");
        }
        if self.drag < 0.0 {
            return invalid("drag", "must not be negative");
        }
        if !(self.bounce_velocity < 0.0) {
            return invalid("bounce_velocity", "must be negative (upward)");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity", "must be negative (upward)");
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts", "must be at least 1");
        }
        Ok(())
    }

    /// Vertical midpoint of the canvas; scrolling starts above it
    #[inline]
    pub fn midline(&self) -> f32 {
        self.canvas_height / 2.0
    }

    /// Upper bound for the platform gap (player must still reach the next platform)
    #[inline]
    pub fn space_cap(&self) -> f32 {
        self.canvas_height / 2.0
    }

    /// y of the first platform
    #[inline]
    pub fn platform_start(&self) -> f32 {
        self.canvas_height - self.platform_start_offset
    }
}
