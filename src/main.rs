//! Wallball entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use wallball::renderer::{RenderState, StartupError};
    use wallball::{Arena, FrameHandle, Settings, Simulation};

    /// App instance holding all state
    struct App {
        sim: Simulation,
        render_state: Option<RenderState>,
        handle: FrameHandle,
        /// A requestAnimationFrame callback is pending
        loop_scheduled: bool,
    }

    impl App {
        fn new(sim: Simulation) -> Self {
            Self {
                sim,
                render_state: None,
                handle: FrameHandle::new(),
                loop_scheduled: false,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.draw(&self.sim) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Log the full simulation state as JSON
        fn dump_snapshot(&self) {
            match self.sim.snapshot().to_json() {
                Ok(json) => log::info!("Snapshot at frame {}:\n{}", self.sim.frame(), json),
                Err(e) => log::warn!("Snapshot failed: {}", e),
            }
        }
    }

    fn event_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    /// Find `#canvas`, or create a full-window one like a bare page would
    fn acquire_canvas() -> Result<HtmlCanvasElement, StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoCanvas("no window"))?;
        let document = window
            .document()
            .ok_or(StartupError::NoCanvas("no document"))?;

        if let Some(el) = document.get_element_by_id("canvas") {
            return el
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| StartupError::NoCanvas("#canvas is not a canvas"));
        }

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| StartupError::NoCanvas("cannot create canvas"))?
            .dyn_into()
            .map_err(|_| StartupError::NoCanvas("created element is not a canvas"))?;

        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let body = document.body().ok_or(StartupError::NoCanvas("no body"))?;
        body.append_child(&canvas)
            .map_err(|_| StartupError::NoCanvas("cannot attach canvas"))?;

        Ok(canvas)
    }

    pub async fn run() -> Result<(), StartupError> {
        let canvas = acquire_canvas()?;
        let width = canvas.width();
        let height = canvas.height();

        // Arena is fixed from the startup canvas size
        let arena = Arena::from_size(width as f32, height as f32);

        let mut settings = Settings::load();
        if settings.seed.is_none() {
            settings.seed = Some(js_sys::Date::now() as u64);
        }

        let app = Rc::new(RefCell::new(App::new(Simulation::new(arena, &settings))));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena).await?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());

        app.borrow().handle.start();
        schedule_frame(app);

        log::info!("Wallball running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer down - start a drag
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().sim.pointer_down(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - track the drag
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().sim.pointer_move(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up - build the wall
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().sim.pointer_up(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " => {
                        let resume = {
                            let a = app.borrow();
                            a.handle.toggle() && !a.loop_scheduled
                        };
                        if resume {
                            schedule_frame(app.clone());
                        }
                    }
                    "d" | "D" => app.borrow().dump_snapshot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn schedule_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        app.borrow_mut().loop_scheduled = true;
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.loop_scheduled = false;
            if !a.handle.is_running() {
                return;
            }

            a.sim.advance();
            a.render();
        }

        schedule_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Wallball starting...");

    if let Err(e) = wasm_app::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use wallball::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
    use wallball::{Arena, FrameHandle, Settings, Simulation, run_frames};

    env_logger::init();
    log::info!("Wallball (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    let arena = Arena::from_size(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT);
    let mut sim = Simulation::new(arena, &Settings::load());

    // A cross of walls through the middle of the arena
    let center = Vec2::new(arena.width() / 2.0, arena.height() / 2.0);
    for offset in [Vec2::new(40.0, 0.0), Vec2::new(0.0, 40.0)] {
        sim.pointer_down(center);
        sim.pointer_move(center + offset);
        sim.pointer_up(center + offset);
    }

    let handle = FrameHandle::new();
    handle.start();
    let ran = run_frames(&mut sim, &handle, frames);
    handle.stop();

    let state = sim.state();
    let escaped = sim
        .balls()
        .filter(|b| !arena.contains(b.position))
        .count();
    println!(
        "Ran {} frames: {} balls ({} outside arena), {} walls ({} complete)",
        ran,
        state.balls.len(),
        escaped,
        state.walls.len(),
        state.completed_walls()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
