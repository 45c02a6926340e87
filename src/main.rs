//! Gapwing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gapwing::Settings;
    use gapwing::audio::{AudioManager, SoundEffect};
    use gapwing::consts::*;
    use gapwing::persistence;
    use gapwing::renderer::RenderState;
    use gapwing::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);

            Self {
                state: GameState::new(seed, persistence::read_best()),
                render_state: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks and dispatch the resulting events
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut steps = 0;
            while self.accumulator >= TICK_DT && steps < MAX_TICKS_PER_FRAME {
                // Queued input is applied only at tick boundaries, so the
                // event callbacks never race the simulation
                let input = self.input;
                let events = tick(&mut self.state, &input);
                self.dispatch(&events);

                self.accumulator -= TICK_DT;
                steps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Map simulation events onto the audio/persistence adapters.
        /// Everything here is fire-and-forget; nothing reports back to
        /// the sim.
        fn dispatch(&mut self, events: &[GameEvent]) {
            for event in events {
                match *event {
                    GameEvent::CountdownTicked(n) => log::debug!("Countdown: {}", n),
                    GameEvent::CountdownFinished => self.audio.play_background(),
                    GameEvent::Paused => self.audio.pause_background(),
                    GameEvent::Resumed => self.audio.play_background(),
                    GameEvent::Flapped => self.audio.play(SoundEffect::Flap),
                    GameEvent::PipeCleared(_) => self.audio.play(SoundEffect::Score),
                    GameEvent::CoinCollected(_) => self.audio.play(SoundEffect::Coin),
                    GameEvent::DifficultyRamped { scroll_speed, gap } => {
                        log::info!("Difficulty up: speed={} gap={}", scroll_speed, gap);
                    }
                    GameEvent::GameOver { score, new_best } => {
                        self.audio.pause_background();
                        self.audio.reset_background();
                        self.audio.play(SoundEffect::GameOver);
                        if new_best {
                            persistence::write_best(score);
                        }
                        log::info!("Game over at {} (best {})", score, self.state.best_score);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.best_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Countdown overlay
            if let Some(el) = document.get_element_by_id("countdown") {
                if let GamePhase::CountingDown { remaining, .. } = self.state.phase {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&remaining.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Pause overlay
            if let Some(el) = document.get_element_by_id("pause-overlay") {
                if self.state.phase == GamePhase::Paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Game over overlay with final stats
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::Over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("final-best") {
                        best_el.set_text_content(Some(&self.state.best_score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Full reset: a restart is a brand-new session, not a transition
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state = GameState::new(seed, persistence::read_best());
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.audio.reset_background();
            log::info!("Restarted with seed: {}", seed);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gapwing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Gapwing running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: flap and pause
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        g.input.flap = true;
                        g.audio.resume();
                    }
                    "p" | "P" | "Escape" => g.input.pause = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse: flap, or restart once the run is over
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Over {
                    g.restart();
                } else {
                    g.input.flap = true;
                    g.audio.resume();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: same as mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Over {
                    g.restart();
                } else {
                    g.input.flap = true;
                    g.audio.resume();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Over {
                    g.restart();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Running {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Running {
                    g.input.pause = true;
                }
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus regained: unmute (the run stays paused until the player
        // resumes it)
        {
            let window2 = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(false);
                }
            });
            let _ =
                window2.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                TICK_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gapwing (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless smoke run of the simulation
    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use gapwing::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(0xC0FFEE, 0);
    let mut ticks = 0u32;

    while state.phase != GamePhase::Over && ticks < 60 * 60 {
        // Flap on a fixed rhythm; good enough to clear a few pipes
        let input = TickInput {
            flap: ticks % 20 == 0,
            ..Default::default()
        };
        tick(&mut state, &input);
        ticks += 1;
    }

    println!(
        "Headless demo: {} ticks, score {}, {} pipes spawned",
        ticks,
        state.score,
        state.spawned_count()
    );
}
