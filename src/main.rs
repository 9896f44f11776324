//! Forest Sphere entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use forest_sphere::Settings;
    use forest_sphere::renderer::RenderState;
    use forest_sphere::sim::{Controls, GameMode, TickInput, WorldState, tick};
    use forest_sphere::ui::{CONTROL_NAMES, ControlPane};

    /// Game instance holding all state
    struct Game {
        state: WorldState,
        render_state: Option<RenderState>,
        settings: Settings,
        /// Keyboard movement flags
        keys: Controls,
        /// On-screen button state
        pane: ControlPane,
        /// One-shot jump request, cleared after each frame
        jump_requested: bool,
        last_time: f64,
        /// Cleared by stop(); no tick runs once false
        running: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mode = if settings.harvest_mode {
                GameMode::Harvest
            } else {
                GameMode::Explore
            };
            Self {
                state: WorldState::new(seed, mode),
                render_state: None,
                settings,
                keys: Controls::default(),
                pane: ControlPane::default(),
                jump_requested: false,
                last_time: 0.0,
                running: true,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Keyboard and on-screen buttons both drive movement
        fn merged_controls(&self) -> Controls {
            let pad = self.pane.controls();
            Controls {
                forward: self.keys.forward || pad.forward,
                back: self.keys.back || pad.back,
                left: self.keys.left || pad.left,
                right: self.keys.right || pad.right,
            }
        }

        /// Run one simulation tick
        fn update(&mut self, dt: f32, time: f64) {
            let input = TickInput {
                controls: self.merged_controls(),
                jump: self.jump_requested,
            };
            tick(&mut self.state, &input, dt);
            self.jump_requested = false;

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

        /// Render the current frame
        fn render(&mut self) {
            let quality = self.settings.quality;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, quality) {
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
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-status") {
                let message = self.state.status.message();
                if el.text_content().as_deref() != Some(message) {
                    el.set_text_content(Some(message));
                }
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                    let _ = el.set_attribute("class", "hud-item");
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Button active styling from the explicit pane state
            for name in CONTROL_NAMES {
                if let Some(el) = document.get_element_by_id(&format!("btn-{name}")) {
                    let _ = el
                        .class_list()
                        .toggle_with_force("active", self.pane.pressed(name));
                }
            }
        }

        /// Tear down the loop; no tick runs after this
        fn stop(&mut self) {
            self.running = false;
            log::info!("Game loop stopped");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Forest Sphere starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("World initialized with seed: {}", seed);

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

        setup_start_screen();
        setup_rotate_hint();
        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, game.clone());
        setup_teardown(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Forest Sphere running!");
    }

    /// Start button hides the welcome overlay
    fn setup_start_screen() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("start-screen") {
                    let _ = el.set_attribute("class", "start-screen hidden");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Advisory hint on portrait-orientation phones
    fn setup_rotate_hint() {
        fn check_orientation() {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let Some(hint) = document.get_element_by_id("rotate-hint") else {
                return;
            };
            let agent = window.navigator().user_agent().unwrap_or_default();
            let is_mobile = agent.contains("Mobi") || agent.contains("Android");
            let portrait = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .zip(window.inner_height().ok().and_then(|h| h.as_f64()))
                .map(|(w, h)| w < h)
                .unwrap_or(false);
            let class = if is_mobile && portrait {
                "rotate-hint"
            } else {
                "rotate-hint hidden"
            };
            let _ = hint.set_attribute("class", class);
        }

        check_orientation();
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            check_orientation();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Camera drag: starts on the canvas, moves/ends anywhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut()
                    .state
                    .camera
                    .drag_start(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut()
                    .state
                    .camera
                    .drag_move(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        // Global pointer release: end the drag and release every control,
        // so a pointer lifted outside a button can never wedge movement on
        for event_name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.state.camera.drag_end();
                g.pane.release_all();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => g.keys.forward = true,
                    "KeyS" | "ArrowDown" => g.keys.back = true,
                    "KeyA" | "ArrowLeft" => g.keys.left = true,
                    "KeyD" | "ArrowRight" => g.keys.right = true,
                    "Space" => g.jump_requested = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => g.keys.forward = false,
                    "KeyS" | "ArrowDown" => g.keys.back = false,
                    "KeyA" | "ArrowLeft" => g.keys.left = false,
                    "KeyD" | "ArrowRight" => g.keys.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // On-screen control pad (Pointer Events; pointerleave also releases)
        for name in CONTROL_NAMES {
            let Some(btn) = document.get_element_by_id(&format!("btn-{name}")) else {
                continue;
            };
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.pane.set(name, true);
                    if name == "jump" {
                        g.jump_requested = true;
                    }
                });
                let _ = btn.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            for event_name in ["pointerup", "pointerleave"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    game.borrow_mut().pane.set(name, false);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop the loop when the page goes away
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().stop();
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
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
            if !g.running {
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
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
    use forest_sphere::sim::{GameMode, TickInput, WorldState, tick};

    env_logger::init();
    log::info!("Forest Sphere (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: walk forward for ten simulated seconds
    let mut state = WorldState::new(42, GameMode::Explore);
    let mut input = TickInput::default();
    input.controls.forward = true;
    for _ in 0..600 {
        tick(&mut state, &input, 1.0 / 60.0);
    }

    println!(
        "after 600 ticks: pos=({:.2}, {:.2}, {:.2}) status={}",
        state.player.pos.x,
        state.player.pos.y,
        state.player.pos.z,
        state.status.message()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
