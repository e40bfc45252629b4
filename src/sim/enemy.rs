//! Roaming enemy obstacles
//!
//! Enemies drift around the upper half of the field and knock the ball back
//! vertically when it passes through them. They are never destroyed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::layout::Layout;
use crate::consts::{ENEMY_MAX_SPEED, ENEMY_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
}

/// Spawn `count` enemies at random spots in the upper half of the field
pub fn spawn_enemies<R: Rng>(count: usize, layout: &Layout, rng: &mut R) -> Vec<Enemy> {
    (0..count)
        .map(|_| Enemy {
            pos: Vec2::new(
                rng.random_range(0.0..layout.width - ENEMY_SIZE),
                rng.random_range(0.0..layout.enemy_ceiling()),
            ),
            vel: Vec2::new(
                rng.random_range(-ENEMY_MAX_SPEED..ENEMY_MAX_SPEED),
                rng.random_range(-ENEMY_MAX_SPEED..ENEMY_MAX_SPEED),
            ),
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
        })
        .collect()
}

/// Move one enemy, bouncing off the edges of its region
pub fn step_enemy(enemy: &mut Enemy, layout: &Layout) {
    let next = enemy.pos + enemy.vel;
    if next.x > layout.width - enemy.width || next.x < 0.0 {
        enemy.vel.x = -enemy.vel.x;
    }
    if next.y > layout.enemy_ceiling() || next.y < 0.0 {
        enemy.vel.y = -enemy.vel.y;
    }
    enemy.pos += enemy.vel;
}

/// Strict test of the ball's centre against the enemy box
pub fn enemy_overlaps_ball(enemy: &Enemy, ball_pos: Vec2) -> bool {
    ball_pos.x > enemy.pos.x
        && ball_pos.x < enemy.pos.x + enemy.width
        && ball_pos.y > enemy.pos.y
        && ball_pos.y < enemy.pos.y + enemy.height
}
