//! Brickfall - a fixed-timestep Breakout game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AABB collisions, tick driver)
//! - `renderer`: Quad geometry handed to an external renderer
//! - `platform`: Input event model
//! - `settings`: Stage and tuning configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BoundaryPolicy, HitboxScale, InputPolicy, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical ticks per second (one tick = 1/60 s)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Largest wall-clock frame fed into the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;
    /// Maximum logical ticks per outer loop iteration
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// Stage dimensions (world units)
    pub const STAGE_WIDTH: f32 = 4.0;
    pub const STAGE_HEIGHT: f32 = 3.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 0.6;
    pub const PADDLE_HEIGHT: f32 = 0.15;
    /// Paddle bottom edge as a fraction of stage height
    pub const PADDLE_LIFT: f32 = 0.05;
    /// Stage units per second
    pub const PADDLE_SPEED: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.05;
    /// Stage units per second
    pub const BALL_SPEED: f32 = 1.0;
    /// Max serve deviation from straight down (radians)
    pub const SERVE_SPREAD: f32 = 0.35;

    /// Block grid defaults
    pub const GRID_ROWS: u32 = 4;
    pub const GRID_COLS: u32 = 8;
    pub const BLOCK_WIDTH: f32 = 0.4;
    pub const BLOCK_HEIGHT: f32 = 0.15;
    pub const BLOCK_GAP: f32 = 0.05;
    pub const GRID_TOP_MARGIN: f32 = 0.2;
}

/// Sign of a scalar, with zero counted as positive
///
/// `sign(0.0) == 1.0`. Collision merging relies on this: a zero component
/// shares its sign with any positive one.
#[inline]
pub fn sign(a: f32) -> f32 {
    if a < 0.0 { -1.0 } else { 1.0 }
}

/// Midpoint of two points
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Component-wise negation
#[inline]
pub fn negate(v: Vec2) -> Vec2 {
    Vec2::new(-v.x, -v.y)
}
