//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, speeds in pixels per frame
//! - Seeded RNG only
//! - Stable iteration order (column-major bricks, enemies in spawn order)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod enemy;
pub mod layout;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickGrid, BrickHit, BrickStatus, CollisionResult};
pub use collision::{FloorContact, paddle_bounce};
pub use enemy::{Enemy, enemy_overlaps_ball, spawn_enemies, step_enemy};
pub use layout::{Layout, LayoutKind};
pub use scheduler::{Autopilot, FrameLoop, FrameSink, InputSource, LoopControl, NullSink, RunSummary, run};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, TickOutcome, hit_bricks, tick};
