//! Brick Breaker entry point
//!
//! Native builds run a headless autopilot game and print a summary.
//! WASM builds wire the page's buttons, keys and pointer to the simulation
//! and drive it with `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlSelectElement, KeyboardEvent, MouseEvent};

    use brick_breaker::sim::{
        FrameLoop, FrameSink, GameEvent, GamePhase, GameState, InputSource, LoopControl, TickInput,
        TickOutcome,
    };
    use brick_breaker::view::Scene;
    use brick_breaker::{Difficulty, Settings};

    // The page supplies `window.drawScene(scene)` for the canvas drawing
    #[wasm_bindgen(inline_js = "
        export function present_scene(json) {
            if (window.drawScene) {
                window.drawScene(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_scene(json: &str);
    }

    /// Latest key/pointer state, sampled once per frame
    struct HostInput {
        base: TickInput,
        left: bool,
        right: bool,
        pointer_x: Option<f32>,
    }

    impl InputSource for HostInput {
        fn sample(&mut self, _state: &GameState) -> TickInput {
            TickInput {
                move_left: self.left,
                move_right: self.right,
                pointer_x: self.pointer_x.take(),
                ..self.base
            }
        }
    }

    /// Pushes each frame to the page: canvas scene, HUD text, game-over alert
    struct PageSink;

    impl FrameSink for PageSink {
        fn present(&mut self, state: &mut GameState, _outcome: TickOutcome) {
            for event in state.drain_events() {
                if let GameEvent::GameOver { score, level } = event {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&format!(
                            "Game over!\nScore: {score}\nLevel: {level}"
                        ));
                    }
                    // Back to idle so the Start button works again
                    state.init();
                }
            }
            draw(state);
        }
    }

    fn draw(state: &GameState) {
        match Scene::capture(state).to_json() {
            Ok(json) => present_scene(&json),
            Err(e) => log::error!("Failed to serialize scene: {}", e),
        }
        update_hud(state);
    }

    fn update_hud(state: &GameState) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&state.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("level") {
            el.set_text_content(Some(&state.level.to_string()));
        }
        if let Some(el) = document.get_element_by_id("lives") {
            el.set_text_content(Some(&state.lives.to_string()));
        }
    }

    /// Game instance holding all host-side state
    struct Game {
        state: GameState,
        input: HostInput,
        frame_loop: FrameLoop,
        /// Pending animation frame, if one is scheduled
        animation_id: Option<i32>,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64) -> Self {
            Self {
                state: settings.new_game(seed),
                input: HostInput {
                    base: settings.base_input(),
                    left: false,
                    right: false,
                    pointer_x: None,
                },
                frame_loop: FrameLoop::new(),
                animation_id: None,
            }
        }

        fn cancel_frame(&mut self) {
            if let Some(id) = self.animation_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Brick Breaker starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let mut settings = Settings::default();
        if let Some(select) = selector(&document) {
            match select.value().parse::<Difficulty>() {
                Ok(difficulty) => settings.difficulty = difficulty,
                Err(e) => log::warn!("{}; using {}", e, settings.difficulty),
            }
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(&settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_pointer(&document, game.clone());
        setup_buttons(&document, game.clone());

        draw(&game.borrow().state);
    }

    fn selector(document: &web_sys::Document) -> Option<HtmlSelectElement> {
        document.get_element_by_id("difficulty")?.dyn_into().ok()
    }

    fn request_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let looped = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(looped);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().animation_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let control = {
            let mut g = game.borrow_mut();
            g.animation_id = None;
            let Game {
                state,
                input,
                frame_loop,
                ..
            } = &mut *g;
            frame_loop.on_frame(state, input, &mut PageSink)
        };

        if control == LoopControl::Continue {
            request_frame(game);
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let resumed = {
                    let mut g = game.borrow_mut();
                    match event.key().as_str() {
                        "Right" | "ArrowRight" => g.input.right = true,
                        "Left" | "ArrowLeft" => g.input.left = true,
                        "p" | "P" | "Escape" => {
                            toggle_pause(&mut g);
                        }
                        _ => {}
                    }
                    g.state.is_running() && g.animation_id.is_none()
                };
                if resumed {
                    request_frame(game.clone());
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Right" | "ArrowRight" => g.input.right = false,
                    "Left" | "ArrowLeft" => g.input.left = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Toggle pause; pausing drops the pending frame
    fn toggle_pause(g: &mut Game) {
        if g.state.pause() == GamePhase::Paused {
            g.cancel_frame();
        }
    }

    fn setup_pointer(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(canvas) = document.get_element_by_id("gameCanvas") else {
            log::warn!("No #gameCanvas element; pointer control disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            game.borrow_mut().input.pointer_x = Some(event.offset_x() as f32);
        });
        let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let started = game.borrow_mut().state.start();
                if started {
                    request_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    g.cancel_frame();
                    g.state.restart();
                }
                request_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = selector(document) {
            let changed = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let difficulty = match changed.value().parse::<Difficulty>() {
                    Ok(d) => d,
                    Err(e) => {
                        log::error!("{}", e);
                        return;
                    }
                };
                let mut g = game.borrow_mut();
                g.state.set_difficulty(difficulty);
                if !g.state.is_running() {
                    draw(&g.state);
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use brick_breaker::Settings;
    use brick_breaker::sim::{Autopilot, FrameSink, GameEvent, GameState, TickOutcome, run};

    /// Headless runs stop here unless the settings say otherwise
    const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;

    /// Logs gameplay events as they happen
    struct EventLog;

    impl FrameSink for EventLog {
        fn present(&mut self, state: &mut GameState, _outcome: TickOutcome) {
            for event in state.drain_events() {
                match event {
                    GameEvent::LevelUp { .. } | GameEvent::LifeLost { .. } | GameEvent::GameOver { .. } => {
                        log::info!("frame {}: {:?}", state.frame, event)
                    }
                    _ => log::trace!("frame {}: {:?}", state.frame, event),
                }
            }
        }
    }

    pub fn run_headless() -> brick_breaker::Result<()> {
        // brick-breaker [settings.json] [--difficulty NAME] [--layout NAME]
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut settings = Settings::default();
        if let Some(path) = settings.apply_args(&args)? {
            // Flags win over the file
            settings = Settings::load(path)?;
            settings.apply_args(&args)?;
        }

        let fallback_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let mut state = settings.new_game(fallback_seed);
        log::info!(
            "Brick Breaker (native) starting: difficulty={}, layout={}, seed={}",
            settings.difficulty,
            settings.layout,
            state.seed
        );

        state.start();
        let max_frames = settings.max_frames.unwrap_or(DEFAULT_MAX_FRAMES);
        let summary = run(&mut state, &mut Autopilot::default(), &mut EventLog, Some(max_frames));

        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run_headless() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
