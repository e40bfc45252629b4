//! Renderer-facing snapshot of the simulation
//!
//! The host draws from a [`Scene`], never from `GameState` directly, so the
//! browser side only has to deal with plain serialized rectangles.

use serde::Serialize;

use crate::consts::BRICK_FULL_HEALTH_HUE;
use crate::sim::{GamePhase, GameState};

/// Base opacity of the background image with a full wall of bricks
const BACKGROUND_BASE_ALPHA: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSprite {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickSprite {
    pub rect: Rect,
    /// HSL hue in degrees: 120 (green) at full health down towards 0 (red)
    pub hue: f32,
}

/// Values for the score/level/lives display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub phase: GamePhase,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub ball: BallSprite,
    pub paddle: Rect,
    /// Active bricks only
    pub bricks: Vec<BrickSprite>,
    pub enemies: Vec<Rect>,
    /// Background image opacity; the picture is revealed as bricks fall
    pub background_alpha: f32,
    pub hud: Hud,
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        let layout = &state.layout;
        let (brick_w, brick_h) = state.grid.brick_size();

        let bricks: Vec<BrickSprite> = state
            .grid
            .iter()
            .filter(|b| b.is_active())
            .map(|b| BrickSprite {
                rect: Rect { x: b.x, y: b.y, w: brick_w, h: brick_h },
                hue: b.health_ratio() * BRICK_FULL_HEALTH_HUE,
            })
            .collect();

        let total = state.grid.total().max(1) as f32;
        let revealed = 1.0 - bricks.len() as f32 / total;

        Self {
            width: layout.width,
            height: layout.height,
            ball: BallSprite {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                radius: state.ball.radius,
            },
            paddle: Rect {
                x: state.paddle.x,
                y: state.paddle.top(layout),
                w: state.paddle.width,
                h: state.paddle.height,
            },
            bricks,
            enemies: state
                .enemies
                .iter()
                .map(|e| Rect { x: e.pos.x, y: e.pos.y, w: e.width, h: e.height })
                .collect(),
            background_alpha: BACKGROUND_BASE_ALPHA + revealed * (1.0 - BACKGROUND_BASE_ALPHA),
            hud: Hud {
                score: state.score,
                level: state.level,
                lives: state.lives,
                phase: state.phase,
            },
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
