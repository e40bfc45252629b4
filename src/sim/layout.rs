//! Field and brick grid geometry
//!
//! Grid dimensions are fixed per variant; only the variant is selectable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Which fixed layout to play on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Wide field with a deep 15x20 wall of bricks
    #[default]
    Classic,
    /// Small field with a few rows of wide bricks
    Compact,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Classic => "classic",
            LayoutKind::Compact => "compact",
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            LayoutKind::Classic => Layout::CLASSIC,
            LayoutKind::Compact => Layout::COMPACT,
        }
    }
}

impl FromStr for LayoutKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(LayoutKind::Classic),
            "compact" => Ok(LayoutKind::Compact),
            _ => Err(GameError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playfield and brick grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub rows: usize,
    pub cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
    /// Rows per health band: row `r` starts with `r / band + 1` health
    pub health_band: usize,
}

impl Layout {
    pub const CLASSIC: Layout = Layout {
        width: 840.0,
        height: 600.0,
        rows: 15,
        cols: 20,
        brick_width: 40.0,
        brick_height: 20.0,
        brick_padding: 2.0,
        offset_top: 30.0,
        offset_left: 0.0,
        health_band: 3,
    };

    pub const COMPACT: Layout = Layout {
        width: 480.0,
        height: 320.0,
        rows: 6,
        cols: 5,
        brick_width: 75.0,
        brick_height: 20.0,
        brick_padding: 10.0,
        offset_top: 30.0,
        offset_left: 30.0,
        health_band: 2,
    };

    /// Starting health for bricks in `row` (top rows are weakest)
    #[inline]
    pub fn row_health(&self, row: usize) -> u32 {
        (row / self.health_band.max(1)) as u32 + 1
    }

    /// Top-left corner of the brick at (`col`, `row`)
    #[inline]
    pub fn brick_origin(&self, col: usize, row: usize) -> (f32, f32) {
        (
            col as f32 * (self.brick_width + self.brick_padding) + self.offset_left,
            row as f32 * (self.brick_height + self.brick_padding) + self.offset_top,
        )
    }

    /// Lower bound of the region enemies roam in
    #[inline]
    pub fn enemy_ceiling(&self) -> f32 {
        self.height / 2.0
    }
}
