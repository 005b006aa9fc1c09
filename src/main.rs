//! Leaf Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use leaf_hop::Tuning;
    use leaf_hop::host::{FrameLoop, FrameScheduler, key_event};
    use leaf_hop::renderer::CanvasSurface;
    use leaf_hop::sim::GameState;

    const PLAYER_IMAGE: &str = "image/greenbird.png";
    const PLATFORM_IMAGE: &str = "image/brownleafnobg.png";

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Schedules frames with `requestAnimationFrame`
    struct AnimationFrames {
        game: Weak<RefCell<Game>>,
    }

    impl FrameScheduler for AnimationFrames {
        fn request_frame(&mut self) {
            let game = self.game.clone();
            let closure = Closure::once(move |_time: f64| {
                if let Some(game) = game.upgrade() {
                    game_loop(&game);
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        frame_loop: FrameLoop<AnimationFrames>,
        surface: CanvasSurface,
    }

    fn game_loop(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let Game {
            state,
            frame_loop,
            surface,
        } = &mut *g;
        frame_loop.on_frame(state, surface);
    }

    /// Stop the frame loop (callable from JS)
    #[wasm_bindgen]
    pub fn stop_game() {
        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                game.borrow_mut().frame_loop.stop();
            }
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Leaf Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let tuning = Tuning::default().with_canvas(canvas.width() as f32, canvas.height() as f32);
        if let Err(e) = tuning.validate() {
            log::error!("Canvas unusable: {}", e);
            return;
        }

        let player_image = HtmlImageElement::new().expect("image element");
        let platform_image = HtmlImageElement::new().expect("image element");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, tuning);
        let surface = CanvasSurface::new(context, player_image.clone(), platform_image.clone());

        let game = Rc::new_cyclic(|weak| {
            RefCell::new(Game {
                state,
                frame_loop: FrameLoop::new(AnimationFrames { game: weak.clone() }, 2),
                surface,
            })
        });
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        // Register load handlers before setting src so cached images still fire
        for (image, src) in [(&player_image, PLAYER_IMAGE), (&platform_image, PLATFORM_IMAGE)] {
            watch_image(image, src, game.clone());
            image.set_src(src);
        }

        setup_input_handlers(game.clone());

        game.borrow_mut().frame_loop.start();
        log::info!("Leaf Hop running with seed {}", seed);
    }

    fn watch_image(image: &HtmlImageElement, src: &'static str, game: Rc<RefCell<Game>>) {
        let onload = Closure::<dyn FnMut()>::new(move || {
            log::info!("Loaded {}", src);
            game.borrow_mut().frame_loop.asset_loaded();
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::error!("Failed to load {}", src);
        });
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_event(&event.code(), down) {
                    if down {
                        event.prevent_default();
                    }
                    game.borrow_mut().state.handle_key(key);
                }
            });
            let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use leaf_hop::host::{FrameLoop, FrameScheduler};
    use leaf_hop::renderer::{RenderSurface, Sprite};
    use leaf_hop::sim::{GameState, Key, KeyEvent};

    /// Frames are driven by a plain loop; just remember a frame was asked for
    #[derive(Default)]
    struct Immediate {
        pending: bool,
    }

    impl FrameScheduler for Immediate {
        fn request_frame(&mut self) {
            self.pending = true;
        }
    }

    struct NullSurface;

    impl RenderSurface for NullSurface {
        fn clear(&mut self, _origin: Vec2, _size: Vec2) {}
        fn draw_image(&mut self, _sprite: Sprite, _pos: Vec2, _size: Vec2) {}
    }

    /// Steer toward the closest platform above the player's feet
    fn steer(state: &GameState) -> KeyEvent {
        let feet = state.player.pos.y + state.player.size.y;
        let target = state
            .platforms()
            .iter()
            .filter(|p| p.pos.y < feet - 1.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let Some(target) = target else {
            return KeyEvent::Up;
        };
        let target_x = target.pos.x + state.tuning.platform_width / 2.0;
        let player_x = state.player.pos.x + state.player.size.x / 2.0;
        if target_x < player_x - 5.0 {
            KeyEvent::Down(Key::Left)
        } else if target_x > player_x + 5.0 {
            KeyEvent::Down(Key::Right)
        } else {
            KeyEvent::Up
        }
    }

    /// Autopilot run without a display; stops when the player falls off screen
    pub fn run(state: &mut GameState, max_frames: u64) {
        let mut frame_loop = FrameLoop::new(Immediate::default(), 0);
        let mut surface = NullSurface;
        frame_loop.start();

        while frame_loop.is_running() && frame_loop.frames() < max_frames {
            state.handle_key(steer(state));
            frame_loop.on_frame(state, &mut surface);

            if frame_loop.frames() % 600 == 0 {
                log::info!(
                    "frame={} climbed={:.0} bounces={} platforms={} gap={:.1}..{:.1}",
                    frame_loop.frames(),
                    state.climbed,
                    state.bounces,
                    state.platforms().len(),
                    state.world.min_space(),
                    state.world.max_space()
                );
            }
            if state.player.pos.y > state.tuning.canvas_height {
                log::info!("Player fell at frame {}", frame_loop.frames());
                frame_loop.stop();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> leaf_hop::Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| leaf_hop::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::error!("Could not load tuning from {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use leaf_hop::sim::GameState;
    use leaf_hop::{Tuning, TuningPreset};

    env_logger::init();
    log::info!("Leaf Hop (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    // First argument: a preset name (compact, classic) or a tuning JSON path
    let tuning = match std::env::args().nth(1) {
        Some(arg) => match TuningPreset::from_str(&arg) {
            Some(preset) => {
                log::info!("Using {} preset", preset.as_str());
                Tuning::from_preset(preset)
            }
            None => load_tuning(&arg),
        },
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = GameState::new(seed, tuning);
    headless::run(&mut state, 60 * 60);

    println!(
        "Climbed {:.0} units with {} bounces over {} frames (seed {})",
        state.climbed, state.bounces, state.time_ticks, seed
    );
}
