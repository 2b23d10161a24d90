//! Ember Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use ember_dodge::{Settings, Tuning};
    use ember_dodge::audio::{AudioManager, SoundEffect};
    use ember_dodge::platform::{FrameClock, KeyState};
    use ember_dodge::renderer::{CanvasSink, Frame, build_frame};
    use ember_dodge::sim::{GameState, tick};

    thread_local! {
        /// Handle for the exported `restartGame()` binding
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sink: CanvasSink,
        clock: FrameClock,
        keys: KeyState,
        audio: AudioManager,
        settings: Settings,
        /// Whether the game-over panel is currently shown
        panel_shown: bool,
    }

    impl Game {
        fn new(seed: u64, sink: CanvasSink) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new("backgroundMusic", &settings);
            Self {
                state: GameState::new(seed),
                sink,
                clock: FrameClock::new(),
                keys: KeyState::default(),
                audio,
                settings,
                panel_shown: false,
            }
        }

        /// Advance one animation frame
        fn update(&mut self, time: f64) {
            let dt_ms = self.clock.delta_ms(time);
            let input = self.keys.to_tick_input();
            tick(&mut self.state, &input, dt_ms);

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) -> Frame {
            let frame = build_frame(&self.state);
            frame.replay(&mut self.sink);
            frame
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, frame: &Frame) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = &frame.hud;

            if let Some(el) = document.get_element_by_id("health") {
                el.set_text_content(Some(&hud.health.to_string()));
            }
            if let Some(el) = document.get_element_by_id("survivalTime") {
                el.set_text_content(Some(&hud.survival_label));
            }

            // Only touch the panel on transitions
            let over = hud.game_over.is_some();
            if over == self.panel_shown {
                return;
            }
            self.panel_shown = over;

            if let Some(report) = hud.game_over {
                if let Some(el) = document.get_element_by_id("finalSurvivalTime") {
                    el.set_text_content(Some(&report.survival_secs.to_string()));
                }
                if let Some(el) = document.get_element_by_id("rankComment") {
                    el.set_text_content(Some(report.rank.comment()));
                }
            }
            set_display(&document, "gameOver", if over { "flex" } else { "none" });
        }

        /// Flip the music preference and persist it
        fn toggle_music(&mut self) {
            self.settings.music_enabled = !self.settings.music_enabled;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Music {}", if self.settings.music_enabled { "on" } else { "off" });
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            self.state.reset();
            self.clock.reset();
            self.keys.release_all();
            // Music carries on from where it was
            self.audio.ensure_music_playing();
        }
    }

    fn set_display(document: &Document, id: &str, value: &str) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(e) = el.style().set_property("display", value) {
            log::warn!("Failed to set #{} display: {:?}", id, e);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Ember Dodge starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
            .dyn_into()?;

        let tuning = Tuning::default();
        let sink = CanvasSink::new(
            &canvas,
            tuning.arena_width as u32,
            tuning.arena_height as u32,
        )?;

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, sink)));
        log::info!("Game initialized with seed: {}", seed);

        set_display(&document, "gameOver", "none");
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        setup_input_handlers(&window, game.clone());
        setup_restart_button(&document, game.clone());
        setup_focus_handlers(&window, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Ember Dodge running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.keys.apply_key(&key, true) {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                } else if (key == "m" || key == "M") && !event.repeat() {
                    g.toggle_music();
                }
                g.audio.ensure_music_playing();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.apply_key(&event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Any click counts as the gesture browsers want before audio
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow().audio.ensure_music_playing();
            });
            let _ = window
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur: keyup events never arrive while unfocused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys.release_all();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            let frame = g.render();
            g.update_hud(&frame);
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-btn; restart only via restartGame()");
        }
    }

    /// Reset the running session (bound to `restartGame()` in JS)
    pub fn restart_game() {
        GAME.with(|slot| match slot.borrow().as_ref() {
            Some(game) => game.borrow_mut().restart(),
            None => log::warn!("restartGame() called before the game started"),
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = restartGame)]
pub fn restart_game() {
    wasm_game::restart_game();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: one session at 60 fps with nobody at the keys
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ember_dodge::Tuning;
    use ember_dodge::sim::{GameEvent, GameState, TickInput, tick};

    const SEED: u64 = 0x5EED;
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const FRAME_CAP: u32 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Ember Dodge (native) starting...");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Bad tuning file {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => Tuning::default(),
    };

    let mut state = GameState::with_tuning(SEED, tuning);
    let input = TickInput::default();
    let mut detonations = 0u32;
    let mut hits = 0u32;

    let mut frames = 0;
    while frames < FRAME_CAP && !state.is_over() {
        tick(&mut state, &input, FRAME_MS);
        frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Detonated { .. } => detonations += 1,
                GameEvent::GameOver(_) => {}
                _ => hits += 1,
            }
        }

        if frames % 600 == 0 {
            log::debug!(
                "frame {}: health {}, {} hazards, {} embers",
                frames,
                state.health,
                state.hazards.len(),
                state.embers.len()
            );
        }
    }

    match state.report {
        Some(report) => log::info!(
            "Game over after {} frames: survived {}s, rank {:?} ({}), {} hits, {} detonations",
            frames,
            report.survival_secs,
            report.rank,
            report.rank.comment(),
            hits,
            detonations
        ),
        None => log::info!(
            "Frame cap reached: still alive at {}s with {} health",
            state.survival_secs(),
            state.health
        ),
    }
}
