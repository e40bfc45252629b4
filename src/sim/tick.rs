//! Per-frame simulation step
//!
//! One call to [`tick`] is one display frame. Speeds are in pixels per
//! frame, so there is no delta time.

use super::bricks::CollisionResult;
use super::collision::{FloorContact, floor_contact, paddle_bounce, reflect_ceiling, reflect_side_walls};
use super::enemy::{enemy_overlaps_ball, step_enemy};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{PADDLE_SPEED, POINTS_PER_LEVEL};

/// Input sampled at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Absolute pointer x in field coordinates; overrides the keys
    pub pointer_x: Option<f32>,
    /// Keyboard paddle speed (pixels per frame)
    pub paddle_speed: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            move_left: false,
            move_right: false,
            pointer_x: None,
            paddle_speed: PADDLE_SPEED,
        }
    }
}

/// How a frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game isn't running; nothing changed
    Skipped,
    /// Normal frame
    Advanced,
    /// Grid cleared; ball and paddle were reset for the next level
    LevelUp,
    /// Ball missed the paddle and was respawned
    LifeLost,
    /// Ball missed the paddle on the last life
    GameOver,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }
    state.frame += 1;

    step_enemies(state);

    if hit_bricks(state) {
        return TickOutcome::LevelUp;
    }

    let layout = state.layout;
    let radius = state.ball.radius;
    let pos = state.ball.pos;
    reflect_side_walls(pos, &mut state.ball.vel, radius, &layout);

    if !reflect_ceiling(pos, &mut state.ball.vel, radius) {
        match floor_contact(pos, state.ball.vel, radius, &state.paddle, &layout) {
            FloorContact::Clear => {}
            FloorContact::Paddle { hit_point } => {
                state.ball.vel = paddle_bounce(state.ball.vel, hit_point);
                state.push_event(GameEvent::PaddleBounce);
            }
            FloorContact::Miss => {
                state.lose_life();
                return if state.phase == GamePhase::GameOver {
                    TickOutcome::GameOver
                } else {
                    TickOutcome::LifeLost
                };
            }
        }
    }

    move_paddle(state, input);
    state.ball.pos += state.ball.vel;

    TickOutcome::Advanced
}

/// Move every enemy, then knock the ball back vertically once per enemy
/// it sits inside
fn step_enemies(state: &mut GameState) {
    let layout = state.layout;
    let mut deflections = 0;
    for enemy in &mut state.enemies {
        step_enemy(enemy, &layout);
        if enemy_overlaps_ball(enemy, state.ball.pos) {
            state.ball.vel.y = -state.ball.vel.y;
            deflections += 1;
        }
    }
    for _ in 0..deflections {
        state.push_event(GameEvent::EnemyDeflect);
    }
}

/// Resolve the ball against the brick grid and award points.
///
/// Returns true if the hit cleared the grid and triggered a level-up.
pub fn hit_bricks(state: &mut GameState) -> bool {
    let CollisionResult::Hit(hit) = state.grid.resolve_collision(state.ball.pos, state.ball.radius) else {
        return false;
    };

    state.ball.vel.y = -state.ball.vel.y;

    if !hit.destroyed {
        state.push_event(GameEvent::BrickHit {
            col: hit.col,
            row: hit.row,
            remaining_health: hit.remaining_health,
        });
        return false;
    }

    let points = state.level as u64 * POINTS_PER_LEVEL;
    state.score += points;
    state.push_event(GameEvent::BrickDestroyed {
        col: hit.col,
        row: hit.row,
        points,
    });
    log::debug!("Brick ({}, {}) destroyed, score={}", hit.col, hit.row, state.score);

    if state.grid.is_clear() {
        state.level_up();
        return true;
    }
    false
}

/// Apply this frame's paddle input; a pointer wins over the keys, and
/// right wins over left
fn move_paddle(state: &mut GameState, input: &TickInput) {
    let layout = state.layout;
    if let Some(pointer_x) = input.pointer_x {
        state.paddle.follow_pointer(pointer_x, &layout);
    } else if input.move_right {
        state.paddle.shift(input.paddle_speed, &layout);
    } else if input.move_left {
        state.paddle.shift(-input.paddle_speed, &layout);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::layout::Layout;
    use crate::sim::state::spawn_point;

    fn running(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(Layout::CLASSIC, difficulty, 1);
        state.start();
        state
    }

    #[test]
    fn test_tick_skipped_unless_running() {
        let mut state = GameState::new(Layout::CLASSIC, Difficulty::Easy, 1);
        let before = state.ball.pos;
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Skipped);
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.frame, 0);

        state.start();
        state.pause();
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Skipped);
    }

    #[test]
    fn test_tick_moves_ball_by_velocity() {
        let mut state = running(Difficulty::Easy);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Advanced);
        assert_eq!(state.ball.pos, Vec2::new(424.0, 566.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_keyboard_moves_paddle() {
        let mut state = running(Difficulty::Easy);
        let start_x = state.paddle.x;

        let right = TickInput { move_right: true, ..Default::default() };
        tick(&mut state, &right);
        assert_eq!(state.paddle.x, start_x + 7.0);

        // Right wins when both are held
        let both = TickInput { move_left: true, move_right: true, ..Default::default() };
        tick(&mut state, &both);
        assert_eq!(state.paddle.x, start_x + 14.0);

        let left = TickInput { move_left: true, ..Default::default() };
        tick(&mut state, &left);
        assert_eq!(state.paddle.x, start_x + 7.0);
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let mut state = running(Difficulty::Easy);
        let input = TickInput {
            move_left: true,
            pointer_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.center_x(), 100.0);
    }

    #[test]
    fn test_paddle_bounce_in_tick() {
        let mut state = running(Difficulty::Easy);
        state.ball.pos = Vec2::new(state.paddle.center_x(), 588.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default());
        assert!(state.ball.vel.x.abs() < 1e-4);
        assert!((state.ball.vel.y + 5.0).abs() < 1e-4);
        assert!(state.events().contains(&GameEvent::PaddleBounce));
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn test_miss_respawns_ball_exactly() {
        let mut state = running(Difficulty::Normal);
        state.enemies.clear();
        state.ball.pos = Vec2::new(30.0, 588.0);
        state.ball.vel = Vec2::new(-2.5, 6.0);

        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::LifeLost);
        assert_eq!(state.lives, 2);
        assert_eq!(state.ball.pos, spawn_point(&state.layout));
        assert_eq!(state.ball.vel, Vec2::new(5.0, -5.0));
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_brick_hit_flips_and_scores() {
        let mut state = running(Difficulty::Easy);
        state.level = 3;
        let brick = state.grid.get(4, 0).unwrap().clone();
        state.ball.pos = Vec2::new(brick.x + 20.0, brick.y + 10.0);
        state.ball.vel = Vec2::new(1.0, -4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 30);
        assert_eq!(state.ball.vel.y, 4.0);
        assert!(!state.grid.get(4, 0).unwrap().is_active());
        assert!(state.events().contains(&GameEvent::BrickDestroyed { col: 4, row: 0, points: 30 }));
    }

    #[test]
    fn test_damaged_brick_awards_nothing() {
        let mut state = running(Difficulty::Easy);
        let brick = state.grid.get(0, 14).unwrap().clone();
        state.ball.pos = Vec2::new(brick.x + 20.0, brick.y + 10.0);
        state.ball.vel = Vec2::new(1.0, -4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.grid.get(0, 14).unwrap().health, 4);
        assert!(state.events().contains(&GameEvent::BrickHit { col: 0, row: 14, remaining_health: 4 }));
    }

    #[test]
    fn test_enemy_deflects_ball_vertically() {
        let mut state = running(Difficulty::Normal);
        state.enemies.truncate(1);
        state.enemies[0].pos = Vec2::new(400.0, 400.0);
        state.enemies[0].vel = Vec2::ZERO;
        state.ball.pos = Vec2::new(415.0, 415.0);
        state.ball.vel = Vec2::new(3.0, -4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, Vec2::new(3.0, 4.0));
        assert!(state.events().contains(&GameEvent::EnemyDeflect));
    }

    #[test]
    fn test_two_overlapping_enemies_cancel() {
        let mut state = running(Difficulty::Normal);
        for enemy in &mut state.enemies {
            enemy.pos = Vec2::new(400.0, 400.0);
            enemy.vel = Vec2::ZERO;
        }
        state.ball.pos = Vec2::new(415.0, 415.0);
        state.ball.vel = Vec2::new(3.0, -4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, Vec2::new(3.0, -4.0));
    }
}
