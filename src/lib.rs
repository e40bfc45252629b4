//! Brick Breaker - a Breakout-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `difficulty`: Difficulty tiers and their tuning profiles
//! - `settings`: Data-driven game configuration
//! - `view`: Renderer-facing snapshot of the simulation

pub mod difficulty;
pub mod error;
pub mod settings;
pub mod sim;
pub mod view;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{GameError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Ball radius (pixels)
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball respawn height above the bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 30.0;

    /// Paddle thickness (pixels)
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Keyboard paddle speed (pixels per frame)
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Enemy obstacle size (square)
    pub const ENEMY_SIZE: f32 = 30.0;
    /// Maximum enemy speed per axis (pixels per frame)
    pub const ENEMY_MAX_SPEED: f32 = 2.0;

    /// Points per destroyed brick, multiplied by the current level
    pub const POINTS_PER_LEVEL: u64 = 10;

    /// Maximum brick hue (green) at full health, in degrees
    pub const BRICK_FULL_HEALTH_HUE: f32 = 120.0;
}
