//! Stage and tuning configuration
//!
//! Loaded once at startup from JSON; every field has a default so partial
//! files are fine.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How the ball and paddle treat the left/right stage edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundaryPolicy {
    /// Boxed arena: clamp to the edge and invert horizontal velocity
    #[default]
    Bounce,
    /// Cylindrical arena: leaving one side re-enters on the other
    Wrap,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Bounce => "bounce",
            BoundaryPolicy::Wrap => "wrap",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounce" | "box" | "boxed" => Some(BoundaryPolicy::Bounce),
            "wrap" | "cylinder" => Some(BoundaryPolicy::Wrap),
            _ => None,
        }
    }
}

/// Ball hitbox relative to its drawn sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitboxScale {
    /// Hitbox equals the sprite
    Full,
    /// Half-size hitbox centered inside the sprite
    #[default]
    HalfCentered,
}

impl HitboxScale {
    /// Offset of the hitbox's top-left corner from the sprite's, and its size
    pub fn apply(&self, pos: Vec2, size: Vec2) -> (Vec2, Vec2) {
        match self {
            HitboxScale::Full => (pos, size),
            HitboxScale::HalfCentered => (pos + size * 0.25, size * 0.5),
        }
    }
}

/// How unbalanced key press/release pairs affect the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputPolicy {
    /// Raw running sum; repeated presses speed the paddle up
    Accumulate,
    /// Keep the accumulator within -1..=1
    #[default]
    Clamp,
}

/// Block grid layout for a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
    pub block_size: Vec2,
    /// Spacing between neighbouring blocks (both axes)
    pub gap: f32,
    /// Distance from the stage top to the first row's top edge
    pub top_margin: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            block_size: Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT),
            gap: BLOCK_GAP,
            top_margin: GRID_TOP_MARGIN,
        }
    }
}

impl GridLayout {
    pub fn block_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Total extent of the grid including gaps
    pub fn extent(&self) -> Vec2 {
        let cols = self.cols as f32;
        let rows = self.rows as f32;
        Vec2::new(
            cols * self.block_size.x + (cols - 1.0).max(0.0) * self.gap,
            rows * self.block_size.y + (rows - 1.0).max(0.0) * self.gap,
        )
    }
}

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Stage ===
    /// Arena (width, height); origin at bottom-left, y up
    pub stage: Vec2,
    pub boundary: BoundaryPolicy,

    // === Timing ===
    pub tick_rate_hz: u32,
    /// Wall-clock frames longer than this are truncated (seconds)
    pub max_frame_time: f32,
    /// Catch-up cap; 0 disables it
    pub max_ticks_per_frame: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Stage units per second
    pub ball_speed: f32,
    pub ball_hitbox: HitboxScale,
    /// Serve angle jitter around straight down (radians)
    pub serve_spread: f32,

    // === Paddle ===
    pub paddle_size: Vec2,
    /// Stage units per second
    pub paddle_speed: f32,
    pub paddle_input: InputPolicy,

    // === Blocks ===
    pub grid: GridLayout,

    /// Serve RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stage: Vec2::new(STAGE_WIDTH, STAGE_HEIGHT),
            boundary: BoundaryPolicy::Bounce,

            tick_rate_hz: TICK_RATE_HZ,
            max_frame_time: MAX_FRAME_TIME,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_hitbox: HitboxScale::HalfCentered,
            serve_spread: SERVE_SPREAD,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_speed: PADDLE_SPEED,
            paddle_input: InputPolicy::Clamp,

            grid: GridLayout::default(),

            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Duration of one logical tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate_hz.max(1)))
    }

    /// Tick duration in seconds, for per-tick speeds
    pub fn tick_secs(&self) -> f32 {
        self.tick_duration().as_secs_f32()
    }

    /// Ball travel per tick
    pub fn ball_step(&self) -> f32 {
        self.ball_speed * self.tick_secs()
    }

    /// Paddle travel per tick per unit of input
    pub fn paddle_step(&self) -> f32 {
        self.paddle_speed * self.tick_secs()
    }

    /// Catch-up cap, `None` when disabled
    pub fn tick_cap(&self) -> Option<u32> {
        (self.max_ticks_per_frame > 0).then_some(self.max_ticks_per_frame)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.stage.x > 0.0 && self.stage.y > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "stage must be positive, got {}x{}",
                self.stage.x, self.stage.y
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::Invalid("tick_rate_hz must be non-zero".into()));
        }
        if self.tick_duration().is_zero() {
            return Err(SettingsError::Invalid(format!(
                "tick_rate_hz {} gives a tick shorter than 1ns",
                self.tick_rate_hz
            )));
        }
        if self.max_frame_time <= 0.0 {
            return Err(SettingsError::Invalid("max_frame_time must be positive".into()));
        }
        if self.ball_radius <= 0.0 || self.ball_speed <= 0.0 {
            return Err(SettingsError::Invalid("ball radius and speed must be positive".into()));
        }
        if self.paddle_size.x <= 0.0 || self.paddle_size.y <= 0.0 || self.paddle_speed < 0.0 {
            return Err(SettingsError::Invalid("paddle size must be positive".into()));
        }
        if self.grid.block_count() == 0 {
            return Err(SettingsError::Invalid("block grid is empty".into()));
        }
        let extent = self.grid.extent();
        if extent.x > self.stage.x || extent.y + self.grid.top_margin > self.stage.y {
            return Err(SettingsError::Invalid(format!(
                "block grid {}x{} does not fit the stage",
                extent.x, extent.y
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_tick_duration_60hz() {
        let settings = Settings::default();
        assert_eq!(settings.tick_duration(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "boundary": "Wrap", "seed": 7 }"#).unwrap();
        assert_eq!(settings.boundary, BoundaryPolicy::Wrap);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.tick_rate_hz, TICK_RATE_HZ);
        assert_eq!(settings.grid, GridLayout::default());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let err = Settings::from_json(r#"{ "tick_rate_hz": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_sub_nanosecond_tick() {
        let err = Settings::from_json(r#"{ "tick_rate_hz": 2000000000 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(Settings::from_json(r#"{ "tick_rate_hz": 1000000000 }"#).is_ok());
    }

    #[test]
    fn test_huge_grid_is_invalid_not_overflow() {
        let grid = GridLayout {
            rows: 70_000,
            cols: 70_000,
            ..GridLayout::default()
        };
        assert_eq!(grid.block_count(), 4_900_000_000);
        let settings = Settings {
            grid,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_rejects_grid_wider_than_stage() {
        let err = Settings::from_json(r#"{ "grid": { "cols": 40 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_boundary_from_str() {
        assert_eq!(BoundaryPolicy::from_str("WRAP"), Some(BoundaryPolicy::Wrap));
        assert_eq!(BoundaryPolicy::from_str("boxed"), Some(BoundaryPolicy::Bounce));
        assert_eq!(BoundaryPolicy::from_str("sphere"), None);
    }

    #[test]
    fn test_half_centered_hitbox() {
        let (pos, size) =
            HitboxScale::HalfCentered.apply(Vec2::new(1.0, 1.0), Vec2::new(0.4, 0.4));
        assert_eq!(size, Vec2::new(0.2, 0.2));
        assert!((pos - Vec2::new(1.1, 1.1)).length() < 1e-6);
    }
}
