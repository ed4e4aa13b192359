//! Flappy Bubble entry point
//!
//! Wires the platform to the engine: canvas setup, input source selection and
//! the frame loop on wasm; a headless scripted run natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, Window};

    use flappy_bubble::config::AppConfig;
    use flappy_bubble::input::{InputSource, KeyboardInput, TouchInput, VoiceInput};
    use flappy_bubble::render::{CanvasRenderer, build_scene};
    use flappy_bubble::sim::{Engine, ScreenInfo};
    use flappy_bubble::{InputKind, Settings};

    /// Everything the frame loop touches
    struct App {
        engine: Engine,
        renderer: CanvasRenderer,
        input: Box<dyn InputSource>,
        screen: ScreenInfo,
        /// Minimum ms between processed frames (target FPS throttle)
        frame_interval: f64,
        last_frame: f64,
        hud_fps: Option<Element>,
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = AppConfig::default();
        let level = if config.debug {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        console_log::init_with_level(level).expect("failed to init logger");

        log::info!("initializing game: {:?}", config);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(config.canvas_element_id)
            .ok_or_else(|| JsValue::from_str("game canvas element not found"))?
            .dyn_into()?;
        canvas.set_width(config.screen_width as u32);
        canvas.set_height(config.screen_height as u32);
        setup_resize_handler(&window, &canvas, &config);

        let screen = ScreenInfo {
            width: config.screen_width,
            height: config.screen_height,
        };
        let renderer = CanvasRenderer::new(&document, &canvas, screen)?;

        let settings = Settings::load();
        log::info!("input source: {}", settings.input.as_str());
        setup_input_buttons(&document, settings.input);

        let input: Box<dyn InputSource> = match settings.input {
            InputKind::Keyboard => {
                let keyboard = KeyboardInput::new();
                keyboard.init(&document);
                Box::new(keyboard)
            }
            InputKind::Touch => {
                let touch = TouchInput::new();
                touch.init(&canvas);
                Box::new(touch)
            }
            InputKind::Voice => {
                let voice = VoiceInput::new(&config);
                voice.init(&document).await?;
                Box::new(voice)
            }
        };

        let seed = js_sys::Date::now() as u64;
        let mut engine = Engine::new(seed);
        engine.init(screen);
        log::info!("engine seeded with {}", seed);

        let app = Rc::new(RefCell::new(App {
            engine,
            renderer,
            input,
            screen,
            frame_interval: 1000.0 / config.target_fps as f64,
            last_frame: 0.0,
            hud_fps: document.get_element_by_id("hud-fps"),
        }));

        request_animation_frame(app);
        log::info!("game running");
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Skip frames arriving faster than the target FPS allows
            if time - a.last_frame >= a.frame_interval - 0.5 {
                a.last_frame = time;

                let actions = a.input.drain();
                a.engine.update(time, &actions);

                if let Some(world) = a.engine.world() {
                    let scene = build_scene(world, &a.screen);
                    a.renderer.render(&scene);
                }

                if let Some(el) = a.hud_fps.as_ref() {
                    el.set_text_content(Some(&a.engine.fps().to_string()));
                }
            }
        }
        request_animation_frame(app);
    }

    /// Aspect-fit the fixed-size canvas into the window via CSS
    fn setup_resize_handler(window: &Window, canvas: &HtmlCanvasElement, config: &AppConfig) {
        let aspect = (config.screen_width / config.screen_height) as f64;
        let max_width = config.screen_width as f64;

        let canvas = canvas.clone();
        let apply = move |window: &Window| {
            let inner_w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(max_width);
            let inner_h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(max_width / aspect);

            let margin = 20.0;
            let available_w = inner_w - 2.0 * margin;
            let available_h = inner_h - 2.0 * margin;

            let mut new_w = available_w.min(max_width);
            let mut new_h = new_w / aspect;
            if new_h > available_h {
                new_h = available_h;
                new_w = new_h * aspect;
            }

            let style = canvas.style();
            let _ = style.set_property("width", &format!("{new_w}px"));
            let _ = style.set_property("height", &format!("{new_h}px"));
        };

        apply(window);

        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut()>::new(move || apply(&window_clone));
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Input-choice buttons (when present) persist the preference and reload
    fn setup_input_buttons(document: &Document, current: InputKind) {
        for kind in [InputKind::Keyboard, InputKind::Touch, InputKind::Voice] {
            let id = format!("input-{}", kind.as_str());
            let Some(button) = document.get_element_by_id(&id) else {
                continue;
            };

            if kind == current {
                let _ = button.set_attribute("class", "selected");
            }

            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                Settings { input: kind }.save();
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await.expect("failed to initialize game");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_bubble::sim::{Action, Engine, ScreenInfo};

    env_logger::init();
    log::info!("flappy-bubble (native) starting headless demo");

    let mut engine = Engine::new(42);
    engine.init(ScreenInfo {
        width: 1024.0,
        height: 768.0,
    });

    // Scripted session: leave the title screen, flap every 400 ms for ten
    // seconds, then stop and let gravity finish the run.
    engine.update(0.0, &[Action::Up]);
    let mut time: f64 = 0.0;
    while time < 30_000.0 {
        time += 16.0;
        let flap = time < 10_000.0 && (time as u64).is_multiple_of(400);
        let actions: &[Action] = if flap { &[Action::Up] } else { &[] };
        engine.update(time, actions);
    }

    if let Some(world) = engine.world() {
        log::info!(
            "demo finished: state={:?} score={} obstacles={}",
            world.state,
            world.score,
            world.boxes.len(),
        );
    }
}
