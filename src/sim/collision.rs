//! Ball reflection against walls, ceiling and paddle
//!
//! All checks look one frame ahead (`pos + vel`) and only flip or re-aim the
//! velocity; the ball itself is advanced later in the tick.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::layout::Layout;
use super::state::Paddle;

/// What the ball's next vertical step runs into at the bottom of the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloorContact {
    /// Still above the paddle line
    Clear,
    /// Over the paddle; carries the normalized hit point in `[0, 1]`
    Paddle { hit_point: f32 },
    /// Past the paddle line with no paddle underneath
    Miss,
}

/// Invert horizontal velocity if the next step would leave `[r, width - r]`
pub fn reflect_side_walls(pos: Vec2, vel: &mut Vec2, radius: f32, layout: &Layout) -> bool {
    let next_x = pos.x + vel.x;
    if next_x > layout.width - radius || next_x < radius {
        vel.x = -vel.x;
        return true;
    }
    false
}

/// Invert vertical velocity if the next step would pass the ceiling
pub fn reflect_ceiling(pos: Vec2, vel: &mut Vec2, radius: f32) -> bool {
    if pos.y + vel.y < radius {
        vel.y = -vel.y;
        return true;
    }
    false
}

/// Classify the ball's next step against the paddle line at the bottom
pub fn floor_contact(pos: Vec2, vel: Vec2, radius: f32, paddle: &Paddle, layout: &Layout) -> FloorContact {
    if pos.y + vel.y <= layout.height - radius {
        return FloorContact::Clear;
    }

    if pos.x > paddle.x && pos.x < paddle.x + paddle.width {
        FloorContact::Paddle {
            hit_point: paddle_hit_point(pos.x, paddle),
        }
    } else {
        FloorContact::Miss
    }
}

/// Where along the paddle the ball landed: 0 = left edge, 1 = right edge
#[inline]
pub fn paddle_hit_point(ball_x: f32, paddle: &Paddle) -> f32 {
    ((ball_x - paddle.x) / paddle.width).clamp(0.0, 1.0)
}

/// Re-aim the ball off the paddle, preserving speed.
///
/// The hit point maps linearly onto a half circle of launch angles measured
/// from straight up: the left edge sends the ball flat to the left, the
/// centre sends it straight up, the right edge flat to the right.
pub fn paddle_bounce(vel: Vec2, hit_point: f32) -> Vec2 {
    let angle = hit_point.clamp(0.0, 1.0) * PI - FRAC_PI_2;
    let speed = vel.length();
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}
