//! Game settings
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_SPEED;
use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::sim::{GameState, LayoutKind, TickInput};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty tier for new games
    pub difficulty: Difficulty,
    /// Field and brick grid variant
    pub layout: LayoutKind,
    /// Keyboard paddle speed (pixels per frame)
    pub paddle_speed: f32,
    /// Seed for enemy placement; hosts pick one when unset
    pub seed: Option<u64>,
    /// Stop headless runs after this many frames
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            layout: LayoutKind::Classic,
            paddle_speed: PADDLE_SPEED,
            seed: None,
            max_frames: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply command-line style arguments on top of these settings.
    ///
    /// Accepts `--difficulty <name>` and `--layout <name>`; any other
    /// leading `--` argument is rejected. A bare argument is returned as
    /// the settings file path, if any.
    pub fn apply_args<I, S>(&mut self, args: I) -> Result<Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            if !arg.starts_with("--") {
                path = Some(arg.to_string());
                continue;
            }
            let value = args
                .next()
                .ok_or_else(|| GameError::MissingValue(arg.to_string()))?;
            match arg {
                "--difficulty" => self.difficulty = value.as_ref().parse::<Difficulty>()?,
                "--layout" => self.layout = value.as_ref().parse::<LayoutKind>()?,
                _ => return Err(GameError::UnknownOption(arg.to_string())),
            }
        }
        Ok(path)
    }

    /// Build an idle game from these settings, using `fallback_seed` when
    /// no seed is configured
    pub fn new_game(&self, fallback_seed: u64) -> GameState {
        let seed = self.seed.unwrap_or(fallback_seed);
        GameState::new(self.layout.layout(), self.difficulty, seed)
    }

    /// Neutral per-frame input carrying the configured paddle speed
    pub fn base_input(&self) -> TickInput {
        TickInput {
            paddle_speed: self.paddle_speed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Layout;

    #[test]
    fn test_args_override_layout_and_difficulty() {
        let mut settings = Settings::default();
        let path = settings
            .apply_args(["--layout", "Compact", "game.json", "--difficulty", "easy"])
            .unwrap();
        assert_eq!(path.as_deref(), Some("game.json"));
        assert_eq!(settings.layout, LayoutKind::Compact);
        assert_eq!(settings.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_bad_args_rejected() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.apply_args(["--layout", "hex"]),
            Err(GameError::UnknownLayout(_))
        ));
        assert!(matches!(
            settings.apply_args(["--difficulty", "insane"]),
            Err(GameError::UnknownDifficulty(_))
        ));
        assert!(matches!(
            settings.apply_args(["--speed", "9"]),
            Err(GameError::UnknownOption(_))
        ));
        assert!(matches!(
            settings.apply_args(["--layout"]),
            Err(GameError::MissingValue(_))
        ));
        assert_eq!(settings.layout, LayoutKind::Classic);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "hard" }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.layout, LayoutKind::Classic);
        assert_eq!(settings.paddle_speed, 7.0);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let err = Settings::from_json(r#"{ "difficulty": "insane" }"#).unwrap_err();
        assert!(matches!(err, GameError::Settings(_)));
    }

    #[test]
    fn test_new_game_uses_configured_seed() {
        let settings = Settings::from_json(r#"{ "layout": "compact", "seed": 77 }"#).unwrap();
        let state = settings.new_game(1);
        assert_eq!(state.seed, 77);
        assert_eq!(state.layout, Layout::COMPACT);

        let unseeded = Settings::default().new_game(5);
        assert_eq!(unseeded.seed, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }

    #[test]
    fn test_base_input_speed() {
        let settings = Settings {
            paddle_speed: 12.0,
            ..Default::default()
        };
        assert_eq!(settings.base_input().paddle_speed, 12.0);
        assert!(settings.base_input().pointer_x.is_none());
    }
}
