//! Brickfall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brickfall::platform::{InputAction, action_for_key};
    use brickfall::renderer::{RenderError, RenderState};
    use brickfall::sim::{GameEvent, HudStatus, World};
    use brickfall::{Game, Settings, Tuning};

    /// Game plus the GPU state that draws it
    struct App {
        game: Game,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
        document: Document,
    }

    impl App {
        fn render(&mut self) {
            match self.render_state.render(&self.game.snapshot()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Match canvas, surface and world to the element's layout size
        fn fit_canvas(&mut self) {
            let (css_w, css_h, phys_w, phys_h) = canvas_size(&self.canvas);
            self.canvas.set_width(phys_w);
            self.canvas.set_height(phys_h);
            self.render_state.resize(phys_w, phys_h);
            self.game.on_resize(css_w, css_h);
        }

        /// Forward drained sim events to the HUD and overlays
        fn apply_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::Status(status) => self.update_hud(status),
                    GameEvent::LevelStarted { level } => {
                        self.hide("overlayLose");
                        self.hide("overlayMsg");
                        self.set_text("levelTitle", &format!("Level {}", level));
                    }
                    GameEvent::LevelCleared { .. } => {
                        self.set_text("overlayMsg", "Level complete!");
                        self.show("overlayMsg");
                    }
                    GameEvent::NoticeExpired => self.hide("overlayMsg"),
                    GameEvent::BallsLost {
                        level,
                        level_score,
                        total_score,
                        lives,
                    } => {
                        self.set_text("loseTitle", "Lost!");
                        self.set_text(
                            "loseInfo",
                            &format!(
                                "Level {} - Level score: {} - Total: {} - Lives: {}",
                                level, level_score, total_score, lives
                            ),
                        );
                        self.show("overlayLose");
                    }
                }
            }
        }

        fn update_hud(&self, status: HudStatus) {
            self.set_text("score", &format!("Score: {}", status.total_score));
            self.set_text("levelScore", &format!("Level score: {}", status.level_score));
            self.set_text("lives", &format!("Lives: {}", status.lives));
            self.set_text("level", &format!("Level: {}", status.level));
            self.set_text("levelTitle", &format!("Level {}", status.level));
        }

        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn show(&self, id: &str) {
            if let Some(el) = self.element(id) {
                let classes = el.class_list();
                let _ = classes.remove_1("hidden");
                let _ = classes.add_1("show");
            }
        }

        fn hide(&self, id: &str) {
            if let Some(el) = self.element(id) {
                let classes = el.class_list();
                let _ = classes.remove_1("show");
                let _ = classes.add_1("hidden");
            }
        }
    }

    /// (css width, css height, physical width, physical height)
    fn canvas_size(canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let rect = canvas.get_bounding_client_rect();
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let css_w = rect.width().max(1.0);
        let css_h = rect.height().max(1.0);
        (
            css_w as f32,
            css_h as f32,
            (css_w * dpr) as u32,
            (css_h * dpr) as u32,
        )
    }

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    async fn init_gpu(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| js_err(&format!("logger init failed: {}", e)))?;

        log::info!("Brickfall starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let (css_w, css_h, phys_w, phys_h) = canvas_size(&canvas);
        canvas.set_width(phys_w);
        canvas.set_height(phys_h);

        let render_state = match init_gpu(&canvas, phys_w, phys_h).await {
            Ok(rs) => rs,
            Err(e) => {
                log::error!("Renderer setup failed: {}", e);
                let _ = window.alert_with_message(&format!("WebGPU/WebGL unavailable: {}", e));
                return Err(js_err(&e.to_string()));
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            seed,
            Tuning::default(),
            Settings::default(),
            World::new(css_w, css_h),
        );

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            canvas: canvas.clone(),
            document: document.clone(),
        }));

        setup_input_handlers(&window, &canvas, app.clone());
        setup_overlay_buttons(&document, app.clone());
        setup_resize(&window, app.clone());

        request_animation_frame(app);

        log::info!("Brickfall running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Key down / up
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = action_for_key(&event.code(), pressed) {
                    event.prevent_default();
                    app.borrow_mut().game.on_input(action);
                }
            });
            let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click launches
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.on_input(InputAction::Launch);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss would otherwise leave a key stuck down
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.on_blur();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_buttons(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("btnNext") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.advance_or_reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnRetry") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.retry_same_level();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time_ms: f64) {
        {
            let mut a = app.borrow_mut();
            a.game.frame(time_ms / 1000.0);
            a.render();
            a.apply_events();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Runs the simulation without a window, steering the paddle itself

    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use brickfall::platform::InputAction;
    use brickfall::sim::{GameEvent, GameState, World};
    use brickfall::{ConfigError, Game, QualityPreset, Settings, Tuning};

    const STEP: f32 = 1.0 / 60.0;
    const DEFAULT_SECONDS: u32 = 30;
    /// Paddle stops steering when the target is this close to its center
    const DEAD_ZONE: f32 = 6.0;

    pub fn run() -> Result<(), ConfigError> {
        let tuning = match std::env::var("BRICKFALL_TUNING") {
            Ok(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_path(Path::new(&path))?
            }
            Err(_) => Tuning::default(),
        };

        let settings = match std::env::var("BRICKFALL_QUALITY") {
            Ok(name) => match QualityPreset::parse(&name) {
                Some(preset) => Settings::from_preset(preset),
                None => {
                    log::warn!("Unknown quality preset {:?}, using default", name);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };
        log::info!("Quality: {}", settings.quality.as_str());

        let mut args = std::env::args().skip(1);
        let seconds = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring bad duration {:?}, using {}s", arg, DEFAULT_SECONDS);
                DEFAULT_SECONDS
            }),
            None => DEFAULT_SECONDS,
        };
        let seed = args
            .next()
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(clock_seed);

        let mut game = Game::new(seed, tuning, settings, World::default());
        let frames = seconds.saturating_mul(60);
        log::info!("Simulating {} frames at 60 Hz", frames);

        for _ in 0..frames {
            steer(&mut game);
            game.update(STEP);

            for event in game.drain_events() {
                match event {
                    GameEvent::Status(status) => log::trace!("{:?}", status),
                    GameEvent::BallsLost { level, lives, .. } => {
                        log::info!("Balls lost on level {} ({} lives left), advancing", level, lives);
                        game.advance_or_reset();
                    }
                    other => log::info!("{:?}", other),
                }
            }
        }

        let status = game.status();
        println!(
            "Finished after {}s: level {}, total score {}, level score {}, lives {}",
            seconds, status.level, status.total_score, status.level_score, status.lives
        );
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Follow the lowest launched ball; launch when everything is resting
    fn steer(game: &mut Game) {
        let target = lowest_launched_ball(game.state());
        let Some(target_x) = target else {
            game.on_input(InputAction::MoveLeft(false));
            game.on_input(InputAction::MoveRight(false));
            game.on_input(InputAction::Launch);
            return;
        };

        let center = game.state().paddle.center_x();
        game.on_input(InputAction::MoveLeft(target_x < center - DEAD_ZONE));
        game.on_input(InputAction::MoveRight(target_x > center + DEAD_ZONE));
    }

    fn lowest_launched_ball(state: &GameState) -> Option<f32> {
        state
            .balls
            .iter()
            .filter(|b| b.launched)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brickfall (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("brickfall: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
