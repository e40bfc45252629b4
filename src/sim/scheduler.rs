//! Frame scheduling
//!
//! The simulation never schedules itself. A host either calls [`run`] to
//! drive frames back to back (tests, headless runs) or calls
//! [`FrameLoop::on_frame`] from its own display callback and reschedules
//! only while it returns [`LoopControl::Continue`].

use super::state::GameState;
use super::tick::{TickInput, TickOutcome, tick};

/// Supplies the input snapshot for each frame
pub trait InputSource {
    fn sample(&mut self, state: &GameState) -> TickInput;
}

/// Receives the state after each frame (renderer, HUD, event log)
pub trait FrameSink {
    fn present(&mut self, state: &mut GameState, outcome: TickOutcome);
}

/// A sink that discards every frame and its events
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, state: &mut GameState, _outcome: TickOutcome) {
        state.drain_events();
    }
}

/// Fixed input every frame
impl InputSource for TickInput {
    fn sample(&mut self, _state: &GameState) -> TickInput {
        *self
    }
}

/// Whether a display callback should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Per-callback driver for display-synchronized hosts
#[derive(Debug, Default)]
pub struct FrameLoop {
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run exactly one frame
    pub fn on_frame<I, S>(&mut self, state: &mut GameState, input: &mut I, sink: &mut S) -> LoopControl
    where
        I: InputSource,
        S: FrameSink,
    {
        if !state.is_running() {
            return LoopControl::Stop;
        }

        let frame_input = input.sample(state);
        let outcome = tick(state, &frame_input);
        self.frames += 1;
        sink.present(state, outcome);

        if state.is_running() {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }

    /// Frames run through this loop
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Summary of a finished [`run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub game_over: bool,
}

/// Drive frames until the game stops running or `max_frames` is reached.
///
/// Events accumulate on the state until drained, so `sink` should call
/// [`GameState::drain_events`] (as [`NullSink`] does).
pub fn run<I, S>(state: &mut GameState, input: &mut I, sink: &mut S, max_frames: Option<u64>) -> RunSummary
where
    I: InputSource,
    S: FrameSink,
{
    let mut frame_loop = FrameLoop::new();
    while max_frames.is_none_or(|max| frame_loop.frames() < max) {
        if frame_loop.on_frame(state, input, sink) == LoopControl::Stop {
            break;
        }
    }

    let summary = RunSummary {
        frames: frame_loop.frames(),
        score: state.score,
        level: state.level,
        lives: state.lives,
        game_over: state.phase == super::state::GamePhase::GameOver,
    };
    log::info!("Run finished: {:?}", summary);
    summary
}

/// Input source that chases the ball with the pointer.
///
/// Aims slightly off-centre, varying with the frame counter, so paddle hits
/// don't settle into a single repeating angle.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Fraction of the paddle width to swing the aim point by
    pub wobble: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { wobble: 0.3 }
    }
}

impl InputSource for Autopilot {
    fn sample(&mut self, state: &GameState) -> TickInput {
        let time_factor = state.frame as f32 * 0.05;
        let swing = time_factor.sin() * 0.7 + (time_factor * 0.37).sin() * 0.3;
        let offset = swing * self.wobble * state.paddle.width / 2.0;
        TickInput {
            pointer_x: Some(state.ball.pos.x + offset),
            ..Default::default()
        }
    }
}
