//! Difficulty tiers
//!
//! Each tier maps to a fixed tuning profile. The set is closed, so a lookup
//! can never miss; parsing a tier name is the only fallible step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty tier selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tuning values for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    /// Initial ball speed per axis (pixels per frame)
    pub ball_speed: f32,
    /// Paddle width (pixels)
    pub paddle_width: f32,
    /// Starting lives
    pub lives: u32,
    /// Added to each velocity component's magnitude on level-up
    pub speed_increase: f32,
    /// Number of enemy obstacles spawned per game
    pub enemy_count: usize,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                ball_speed: 4.0,
                paddle_width: 100.0,
                lives: 5,
                speed_increase: 0.2,
                enemy_count: 0,
            },
            Difficulty::Normal => DifficultyProfile {
                ball_speed: 5.0,
                paddle_width: 75.0,
                lives: 3,
                speed_increase: 0.3,
                enemy_count: 2,
            },
            Difficulty::Hard => DifficultyProfile {
                ball_speed: 6.0,
                paddle_width: 50.0,
                lives: 2,
                speed_increase: 0.4,
                enemy_count: 4,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tiers() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Normal ".parse::<Difficulty>().unwrap(), Difficulty::Normal);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_parse_unknown_tier_fails() {
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, GameError::UnknownDifficulty(ref name) if name == "nightmare"));
    }

    #[test]
    fn test_name_roundtrip() {
        for tier in Difficulty::ALL {
            assert_eq!(tier.as_str().parse::<Difficulty>().unwrap(), tier);
        }
    }

    #[test]
    fn test_harder_tiers_are_harsher() {
        let easy = Difficulty::Easy.profile();
        let normal = Difficulty::Normal.profile();
        let hard = Difficulty::Hard.profile();

        assert!(easy.ball_speed < normal.ball_speed && normal.ball_speed < hard.ball_speed);
        assert!(easy.paddle_width > normal.paddle_width && normal.paddle_width > hard.paddle_width);
        assert!(easy.lives > normal.lives && normal.lives > hard.lives);
        assert_eq!(easy.enemy_count, 0);
        assert_eq!(hard.enemy_count, 4);
    }

    #[test]
    fn test_serde_lowercase_names() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
