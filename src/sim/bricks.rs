//! Destructible brick grid
//!
//! Bricks are stored column-major and scanned in that order: every row of
//! column 0, then every row of column 1, and so on. A ball can hit at most
//! one brick per scan.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    pub status: BrickStatus,
    pub health: u32,
    pub max_health: u32,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Strict point-in-box test (edges don't count)
    #[inline]
    pub fn contains(&self, point: Vec2, width: f32, height: f32) -> bool {
        point.x > self.x && point.x < self.x + width && point.y > self.y && point.y < self.y + height
    }

    /// Remaining health as a fraction of starting health
    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }
}

/// Which brick a ball hit and what happened to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    pub col: usize,
    pub row: usize,
    pub destroyed: bool,
    pub remaining_health: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    None,
    Hit(BrickHit),
}

/// Rows x columns of bricks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    brick_width: f32,
    brick_height: f32,
    /// Column-major: index = col * rows + row
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a grid for `layout`, with health from its row bands
    pub fn for_layout(layout: &Layout) -> Self {
        Self::new(layout, |row| layout.row_health(row))
    }

    /// Build a grid for `layout` with a custom per-row starting health
    pub fn new(layout: &Layout, row_health: impl Fn(usize) -> u32) -> Self {
        let mut bricks = Vec::with_capacity(layout.rows * layout.cols);
        for col in 0..layout.cols {
            for row in 0..layout.rows {
                let (x, y) = layout.brick_origin(col, row);
                let health = row_health(row).max(1);
                bricks.push(Brick {
                    x,
                    y,
                    status: BrickStatus::Active,
                    health,
                    max_health: health,
                });
            }
        }

        Self {
            rows: layout.rows,
            cols: layout.cols,
            brick_width: layout.brick_width,
            brick_height: layout.brick_height,
            bricks,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn brick_size(&self) -> (f32, f32) {
        (self.brick_width, self.brick_height)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.bricks.get(col * self.rows + row)
    }

    /// All bricks in scan order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn total(&self) -> usize {
        self.bricks.len()
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    /// True once every brick has been destroyed
    pub fn is_clear(&self) -> bool {
        !self.bricks.iter().any(Brick::is_active)
    }

    /// Restore every brick to full health
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.status = BrickStatus::Active;
            brick.health = brick.max_health;
        }
    }

    /// Damage the first active brick containing the ball's centre.
    ///
    /// Only the centre point is tested, not the ball's full circle, so
    /// `_ball_radius` is unused.
    pub fn resolve_collision(&mut self, ball_pos: Vec2, _ball_radius: f32) -> CollisionResult {
        let (w, h) = (self.brick_width, self.brick_height);
        let rows = self.rows;

        let Some(index) = self
            .bricks
            .iter()
            .position(|b| b.is_active() && b.contains(ball_pos, w, h))
        else {
            return CollisionResult::None;
        };

        let brick = &mut self.bricks[index];
        brick.health = brick.health.saturating_sub(1);
        let destroyed = brick.health == 0;
        if destroyed {
            brick.status = BrickStatus::Destroyed;
        }

        CollisionResult::Hit(BrickHit {
            col: index / rows,
            row: index % rows,
            destroyed,
            remaining_health: brick.health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn centre_of(grid: &BrickGrid, col: usize, row: usize) -> Vec2 {
        let brick = grid.get(col, row).unwrap();
        let (w, h) = grid.brick_size();
        Vec2::new(brick.x + w / 2.0, brick.y + h / 2.0)
    }

    #[test]
    fn test_initial_health_by_row() {
        let grid = BrickGrid::for_layout(&Layout::CLASSIC);
        assert_eq!(grid.total(), 300);
        assert_eq!(grid.get(0, 0).unwrap().health, 1);
        assert_eq!(grid.get(7, 4).unwrap().health, 2);
        assert_eq!(grid.get(19, 14).unwrap().max_health, 5);
        assert!(grid.get(20, 0).is_none());
        assert!(grid.get(0, 15).is_none());
    }

    #[test]
    fn test_custom_row_health() {
        let grid = BrickGrid::new(&Layout::COMPACT, |row| (row / 2) as u32 + 1);
        assert_eq!(grid.get(0, 0).unwrap().health, 1);
        assert_eq!(grid.get(0, 3).unwrap().health, 2);
        assert_eq!(grid.get(4, 5).unwrap().health, 3);
    }

    #[test]
    fn test_positions_from_indices() {
        let grid = BrickGrid::for_layout(&Layout::CLASSIC);
        let brick = grid.get(3, 2).unwrap();
        assert_eq!(brick.x, 3.0 * 42.0);
        assert_eq!(brick.y, 2.0 * 22.0 + 30.0);
    }

    #[test]
    fn test_hit_decrements_then_destroys() {
        let mut grid = BrickGrid::for_layout(&Layout::CLASSIC);
        let pos = centre_of(&grid, 2, 3); // health 2

        let first = grid.resolve_collision(pos, 10.0);
        assert_eq!(
            first,
            CollisionResult::Hit(BrickHit { col: 2, row: 3, destroyed: false, remaining_health: 1 })
        );

        let second = grid.resolve_collision(pos, 10.0);
        assert!(matches!(second, CollisionResult::Hit(BrickHit { destroyed: true, .. })));
        assert_eq!(grid.get(2, 3).unwrap().status, BrickStatus::Destroyed);

        // Destroyed bricks no longer collide
        assert_eq!(grid.resolve_collision(pos, 10.0), CollisionResult::None);
        assert_eq!(grid.get(2, 3).unwrap().health, 0);
    }

    #[test]
    fn test_edges_and_gaps_miss() {
        let mut grid = BrickGrid::for_layout(&Layout::CLASSIC);
        let brick = grid.get(1, 1).unwrap().clone();
        // On the left edge
        let edge = Vec2::new(brick.x, brick.y + 5.0);
        assert_eq!(grid.resolve_collision(edge, 10.0), CollisionResult::None);
        // In the padding gap between columns 0 and 1
        let gap = Vec2::new(brick.x - 1.0, brick.y + 5.0);
        assert_eq!(grid.resolve_collision(gap, 10.0), CollisionResult::None);
        // Below the grid
        assert_eq!(grid.resolve_collision(Vec2::new(100.0, 500.0), 10.0), CollisionResult::None);
    }

    #[test]
    fn test_overlapping_bricks_hit_once_in_column_order() {
        // Negative padding makes neighbouring bricks overlap:
        // columns span x 30..105, 75..150; rows span y 30..50, 20..40
        let layout = Layout {
            brick_padding: -30.0,
            ..Layout::COMPACT
        };
        let mut grid = BrickGrid::for_layout(&layout);
        let total = grid.total();
        let pos = Vec2::new(90.0, 35.0);

        // Inside (0,0), (0,1), (1,0) and (1,1): only the first one is damaged
        assert_eq!(
            grid.resolve_collision(pos, 10.0),
            CollisionResult::Hit(BrickHit { col: 0, row: 0, destroyed: true, remaining_health: 0 })
        );
        assert!(grid.get(1, 0).unwrap().is_active());
        assert_eq!(grid.active_count(), total - 1);

        // Column 0 is finished before column 1 is looked at
        let second = grid.resolve_collision(pos, 10.0);
        assert!(matches!(second, CollisionResult::Hit(BrickHit { col: 0, row: 1, .. })));
        assert!(grid.get(1, 0).unwrap().is_active());
        assert_eq!(grid.active_count(), total - 2);
    }

    #[test]
    fn test_reset_restores_grid() {
        let mut grid = BrickGrid::for_layout(&Layout::COMPACT);
        let pos = centre_of(&grid, 0, 0);
        grid.resolve_collision(pos, 10.0);
        assert_eq!(grid.active_count(), grid.total() - 1);

        grid.reset();
        assert_eq!(grid.active_count(), grid.total());
        assert!(grid.iter().all(|b| b.health == b.max_health));
    }

    #[test]
    fn test_clear_after_destroying_everything() {
        let mut grid = BrickGrid::for_layout(&Layout::COMPACT);
        for col in 0..grid.cols() {
            for row in 0..grid.rows() {
                let pos = centre_of(&grid, col, row);
                while grid.get(col, row).unwrap().is_active() {
                    assert!(!grid.is_clear());
                    grid.resolve_collision(pos, 10.0);
                }
            }
        }
        assert!(grid.is_clear());
        assert_eq!(grid.active_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_is_clear_iff_all_destroyed(
            hits in proptest::collection::vec((0usize..5, 0usize..6), 0..120)
        ) {
            let mut grid = BrickGrid::for_layout(&Layout::COMPACT);
            for (col, row) in hits {
                let pos = centre_of(&grid, col, row);
                grid.resolve_collision(pos, 10.0);
            }
            let all_destroyed = grid.iter().all(|b| b.status == BrickStatus::Destroyed);
            prop_assert_eq!(grid.is_clear(), all_destroyed);
        }

        #[test]
        fn prop_health_never_increases(
            hits in proptest::collection::vec((0usize..5, 0usize..6), 1..80)
        ) {
            let mut grid = BrickGrid::for_layout(&Layout::COMPACT);
            let mut previous: Vec<(u32, BrickStatus)> =
                grid.iter().map(|b| (b.health, b.status)).collect();

            for (col, row) in hits {
                let pos = centre_of(&grid, col, row);
                grid.resolve_collision(pos, 10.0);

                for (brick, (health, status)) in grid.iter().zip(previous.iter()) {
                    prop_assert!(brick.health <= *health);
                    if *status == BrickStatus::Destroyed {
                        prop_assert_eq!(brick.status, BrickStatus::Destroyed);
                    }
                    prop_assert_eq!(brick.status == BrickStatus::Destroyed, brick.health == 0);
                }
                previous = grid.iter().map(|b| (b.health, b.status)).collect();
            }
        }
    }
}
