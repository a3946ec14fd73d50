//! Grid Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires keyboard, touch and on-screen buttons into the
//! engine, renders the grid to a 2D canvas, and surfaces engine events as
//! toasts. The engine itself never sees any of this.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use grid_snake::consts::*;
    use grid_snake::input::{self, Command};
    use grid_snake::platform::LocalStorage;
    use grid_snake::sim::{Direction, Engine, GameEvent};
    use grid_snake::{Settings, Theme};

    /// Per-theme canvas palette
    struct Palette {
        background: &'static str,
        snake: &'static str,
        head: &'static str,
        food: &'static str,
    }

    fn palette(theme: Theme) -> Palette {
        match theme {
            Theme::Classic => Palette {
                background: "#f4f4f4",
                snake: "#2e7d32",
                head: "#1b5e20",
                food: "#c62828",
            },
            Theme::Cyberpunk => Palette {
                background: "#0a0a14",
                snake: "#00ffc8",
                head: "#ff2bd6",
                food: "#ffe600",
            },
        }
    }

    /// Game instance holding the engine and all adapter state
    struct Game {
        engine: Engine<LocalStorage>,
        settings: Settings,
        accumulator: f64,
        last_time: f64,
        touch_start: Option<(f32, f32)>,
        toast_until: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = LocalStorage::new();
            let settings = Settings::load(&store);
            Self {
                engine: Engine::new(seed, store),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                touch_start: None,
                toast_until: 0.0,
            }
        }

        /// Run fixed-interval ticks out of the frame-time accumulator
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms.min(1000.0);
            while self.accumulator >= TICK_MS {
                if let Some(event) = self.engine.tick() {
                    self.notify(event);
                }
                self.accumulator -= TICK_MS;
            }
        }

        /// Apply a normalized input command
        fn apply(&mut self, command: Command) {
            match command {
                Command::Turn(direction) => self.engine.set_direction(direction),
                Command::StartOrPause => {
                    let event = if self.engine.state().over {
                        self.engine.start()
                    } else {
                        self.engine.pause()
                    };
                    self.notify(event);
                }
            }
        }

        /// Forward an engine event to the toast element. Purely cosmetic;
        /// a missing DOM node just drops the message.
        fn notify(&mut self, event: GameEvent) {
            let message = match event {
                GameEvent::Started => "Game started".to_string(),
                GameEvent::Paused => "Paused".to_string(),
                GameEvent::Resumed => "Resumed".to_string(),
                GameEvent::Reset => "Reset".to_string(),
                GameEvent::FoodEaten { score } => format!("+{} ({})", FOOD_POINTS, score),
                GameEvent::NewHighScore { score } => format!("New high score: {}", score),
                GameEvent::GameOver { score } => format!("Game over - score {}", score),
            };

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(el) = document.get_element_by_id("toast") {
                    el.set_text_content(Some(&message));
                    let _ = el.set_attribute("class", "toast show");
                }
            }
            self.toast_until = js_sys::Date::now() + 1500.0;
        }

        /// Draw the grid, snake and food
        fn render(&self, ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement) {
            let colors = palette(self.settings.theme);
            let cell = canvas.width() as f64 / GRID_SIZE as f64;
            let state = self.engine.state();

            ctx.set_fill_style_str(colors.background);
            ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

            ctx.set_fill_style_str(colors.food);
            ctx.fill_rect(
                state.food.x as f64 * cell,
                state.food.y as f64 * cell,
                cell - 1.0,
                cell - 1.0,
            );

            for (i, segment) in state.snake.iter().enumerate() {
                ctx.set_fill_style_str(if i == 0 { colors.head } else { colors.snake });
                ctx.fill_rect(
                    segment.x as f64 * cell,
                    segment.y as f64 * cell,
                    cell - 1.0,
                    cell - 1.0,
                );
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let state = self.engine.state();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&state.high_score.to_string()));
            }

            // D-pad buttons only act on a running game
            for id in ["btn-up", "btn-down", "btn-left", "btn-right"] {
                if let Some(el) = document.get_element_by_id(id) {
                    if state.running {
                        let _ = el.remove_attribute("disabled");
                    } else {
                        let _ = el.set_attribute("disabled", "");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", if state.over { "" } else { "hidden" });
            }

            if js_sys::Date::now() > self.toast_until {
                if let Some(el) = document.get_element_by_id("toast") {
                    let _ = el.set_attribute("class", "toast");
                }
            }
        }

        fn toggle_theme(&mut self) {
            self.settings.theme = self.settings.theme.toggled();
            let mut store = LocalStorage::new();
            self.settings.save(&mut store);

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(el) = document.get_element_by_id("app") {
                    let class = match self.settings.theme {
                        Theme::Classic => "app",
                        Theme::Cyberpunk => "app cyberpunk",
                    };
                    let _ = el.set_attribute("class", class);
                }
            }
            log::info!("Theme: {}", self.settings.theme.as_str());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Engine initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game, canvas, ctx);

        log::info!("Grid Snake running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = input::map_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().apply(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start: remember where the gesture began
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().touch_start =
                        Some((touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: resolve the swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let (Some(start), Some(touch)) = (g.touch_start.take(), event.changed_touches().get(0))
                else {
                    return;
                };
                let end = (touch.client_x() as f32, touch.client_y() as f32);
                if let Some(direction) = input::swipe_direction(start, end) {
                    g.engine.set_direction(direction);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let directions = [
            ("btn-up", Direction::Up),
            ("btn-down", Direction::Down),
            ("btn-left", Direction::Left),
            ("btn-right", Direction::Right),
        ];
        for (id, direction) in directions {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().engine.set_direction(direction);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let event = g.engine.start();
                g.notify(event);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.engine.state().over {
                    let event = g.engine.pause();
                    g.notify(event);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let event = g.engine.reset();
                g.notify(event);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("theme-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().toggle_theme();
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
                    if g.engine.state().running {
                        let event = g.engine.pause();
                        g.notify(event);
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
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.engine.state().running {
                    let event = g.engine.pause();
                    g.notify(event);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(
        game: Rc<RefCell<Game>>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    ) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, canvas, ctx, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(
        game: Rc<RefCell<Game>>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        time: f64,
    ) {
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                TICK_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render(&ctx, &canvas);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game, canvas, ctx);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grid_snake::platform::MemoryStore;
    use grid_snake::sim::Engine;

    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    log::info!("The browser build is the playable one; this just smoke-tests the engine.");

    let mut engine = Engine::new(0, MemoryStore::new());
    engine.start();
    for _ in 0..5 {
        engine.tick();
    }
    println!(
        "5 ticks from spawn: head at ({}, {}), score {}",
        engine.state().head().x,
        engine.state().head().y,
        engine.state().score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
