//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; the host only
//! feeds it input and reads it back.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::BrickGrid;
use super::enemy::{Enemy, spawn_enemies};
use super::layout::Layout;
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initialized, waiting for the first start
    Idle,
    /// Active gameplay
    Running,
    /// Suspended by the player
    Paused,
    /// Lives exhausted; waiting for a restart
    GameOver,
}

/// Notable things that happened during a frame, for UI and audio sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    BrickHit { col: usize, row: usize, remaining_health: u32 },
    BrickDestroyed { col: usize, row: usize, points: u64 },
    LevelUp { level: u32 },
    PaddleBounce,
    EnemyDeflect,
    LifeLost { lives_left: u32 },
    GameOver { score: u64, level: u32 },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A ball at the spawn point, heading up and to the right at `speed`
    pub fn spawn(layout: &Layout, speed: f32) -> Self {
        Self {
            pos: spawn_point(layout),
            vel: Vec2::new(speed, -speed),
            radius: BALL_RADIUS,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Where the ball respawns: horizontally centred, just above the paddle
pub fn spawn_point(layout: &Layout) -> Vec2 {
    Vec2::new(layout.width / 2.0, layout.height - BALL_SPAWN_OFFSET)
}

/// The player's paddle, resting on the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn centered(layout: &Layout, width: f32) -> Self {
        Self {
            x: (layout.width - width) / 2.0,
            width,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn recenter(&mut self, layout: &Layout) {
        self.x = (layout.width - self.width) / 2.0;
    }

    /// Move by `dx`, staying inside the field
    pub fn shift(&mut self, dx: f32, layout: &Layout) {
        self.x = (self.x + dx).clamp(0.0, self.max_x(layout));
    }

    /// Centre the paddle under an absolute pointer position
    pub fn follow_pointer(&mut self, pointer_x: f32, layout: &Layout) {
        self.x = (pointer_x - self.width / 2.0).clamp(0.0, self.max_x(layout));
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Top edge of the paddle
    pub fn top(&self, layout: &Layout) -> f32 {
        layout.height - self.height
    }

    fn max_x(&self, layout: &Layout) -> f32 {
        (layout.width - self.width).max(0.0)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Field and grid geometry
    pub layout: Layout,
    /// Difficulty in effect for the current game
    pub difficulty: Difficulty,
    /// Difficulty to use at the next init/restart
    pub selected_difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BrickGrid,
    /// Enemy obstacles in spawn order
    pub enemies: Vec<Enemy>,
    /// Simulated frames since the last init
    pub frame: u64,
    /// Seed for enemy placement
    pub seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fully initialized game, waiting in [`GamePhase::Idle`]
    pub fn new(layout: Layout, difficulty: Difficulty, seed: u64) -> Self {
        let profile = difficulty.profile();
        let mut rng = Pcg32::seed_from_u64(seed);
        let enemies = spawn_enemies(profile.enemy_count, &layout, &mut rng);

        Self {
            layout,
            difficulty,
            selected_difficulty: difficulty,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lives: profile.lives,
            ball: Ball::spawn(&layout, profile.ball_speed),
            paddle: Paddle::centered(&layout, profile.paddle_width),
            grid: BrickGrid::for_layout(&layout),
            enemies,
            frame: 0,
            seed,
            rng,
            events: Vec::new(),
        }
    }

    /// Profile of the difficulty in effect
    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    /// Reinitialize everything with the selected difficulty and go idle.
    ///
    /// The RNG keeps running, so each new game gets fresh enemy positions.
    pub fn init(&mut self) {
        self.difficulty = self.selected_difficulty;
        let profile = self.difficulty.profile();

        self.phase = GamePhase::Idle;
        self.score = 0;
        self.level = 1;
        self.lives = profile.lives;
        self.ball = Ball::spawn(&self.layout, profile.ball_speed);
        self.paddle = Paddle::centered(&self.layout, profile.paddle_width);
        self.grid.reset();
        self.enemies = spawn_enemies(profile.enemy_count, &self.layout, &mut self.rng);
        self.frame = 0;
        self.events.clear();

        log::info!(
            "Game initialized: difficulty={}, lives={}, enemies={}",
            self.difficulty,
            self.lives,
            self.enemies.len()
        );
    }

    /// Begin play from [`GamePhase::Idle`]. Returns whether the game started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            log::debug!("start ignored in phase {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Game started");
        true
    }

    /// Fully reinitialize and begin play, from any phase
    pub fn restart(&mut self) {
        self.init();
        self.phase = GamePhase::Running;
        log::info!("Game restarted");
    }

    /// Toggle between running and paused. Returns the resulting phase.
    pub fn pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
        log::info!("Pause toggled: {:?}", self.phase);
        self.phase
    }

    /// Choose a difficulty.
    ///
    /// Outside of play this reinitializes immediately. During play (running
    /// or paused) it is deferred to the next init/restart.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.selected_difficulty = difficulty;
        if self.is_in_play() {
            log::info!("Difficulty {} will apply on restart", difficulty);
        } else {
            self.init();
        }
    }

    /// True while the loop should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    fn is_in_play(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    /// Bump the level: faster ball, fresh grid, everything recentred.
    /// Score and lives carry over.
    pub fn level_up(&mut self) {
        self.level += 1;
        let increase = self.profile().speed_increase;
        self.ball.vel = Vec2::new(
            grow_magnitude(self.ball.vel.x, increase),
            grow_magnitude(self.ball.vel.y, increase),
        );
        self.grid.reset();
        self.ball.pos = spawn_point(&self.layout);
        self.paddle.recenter(&self.layout);

        log::info!("Level up: level={}, ball speed={:.2}", self.level, self.ball.speed());
        self.push_event(GameEvent::LevelUp { level: self.level });
    }

    /// Take away a life after a paddle miss. Respawns the ball, or ends the
    /// game when no lives remain.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.push_event(GameEvent::LifeLost { lives_left: self.lives });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over: score={}, level={}", self.score, self.level);
            self.push_event(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
            return;
        }

        let speed = self.profile().ball_speed;
        self.ball = Ball::spawn(&self.layout, speed);
        self.paddle.recenter(&self.layout);
        log::info!("Life lost: {} remaining", self.lives);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Grow `v`'s magnitude by `amount`, keeping its sign (zero counts as negative)
fn grow_magnitude(v: f32, amount: f32) -> f32 {
    if v > 0.0 { v + amount } else { v - amount }
}
