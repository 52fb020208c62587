//! Window management and input handling

use crate::config::ViewerConfig;
use crate::renderer::Renderer;
use crate::RenderError;
use hifitime::Epoch;
use orrery_sim::Body;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Scroll-wheel pixels per zoom tick
const PIXELS_PER_TICK: f64 = 40.0;

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    config: ViewerConfig,
    start_epoch: Option<Epoch>,

    // Input state
    dragging: bool,
    last_cursor: Option<(f64, f64)>,

    // Timing
    last_frame: Instant,
}

impl App {
    pub fn new(config: ViewerConfig, start_epoch: Option<Epoch>) -> Self {
        Self {
            window: None,
            renderer: None,
            config,
            start_epoch,
            dragging: false,
            last_cursor: None,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        match key {
            KeyCode::Escape => event_loop.exit(),

            KeyCode::Space => renderer.time_controller.toggle_pause(),

            // Rate scaling
            KeyCode::Comma => {
                let rate = renderer.time_controller.rate();
                renderer.time_controller.set_rate(rate * 0.5);
            }
            KeyCode::Period => {
                let rate = renderer.time_controller.rate();
                renderer.time_controller.set_rate(rate * 2.0);
            }
            KeyCode::KeyJ => renderer.time_controller.jump_to_j2000(),

            // Focus
            KeyCode::Tab => renderer.cycle_focus(),
            KeyCode::Digit0 => renderer.set_focus(Body::Sun),
            KeyCode::Digit1 => renderer.set_focus(Body::Mercury),
            KeyCode::Digit2 => renderer.set_focus(Body::Venus),
            KeyCode::Digit3 => renderer.set_focus(Body::Earth),
            KeyCode::Digit4 => renderer.set_focus(Body::Mars),
            KeyCode::Digit5 => renderer.set_focus(Body::Jupiter),
            KeyCode::Digit6 => renderer.set_focus(Body::Saturn),
            KeyCode::Digit7 => renderer.set_focus(Body::Uranus),
            KeyCode::Digit8 => renderer.set_focus(Body::Neptune),
            KeyCode::Digit9 => renderer.set_focus(Body::Pluto),

            // Visibility toggles
            KeyCode::KeyO => renderer.toggle_orbits(),
            KeyCode::KeyG => renderer.toggle_grid(),
            KeyCode::KeyB => renderer.toggle_belts(),

            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

        let renderer = pollster::block_on(Renderer::new(
            Arc::clone(&window),
            &self.config,
            self.start_epoch,
        ))
        .expect("Failed to create renderer");

        self.window = Some(window);
        self.renderer = Some(renderer);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        self.handle_key(key, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
                if !self.dragging {
                    self.last_cursor = None;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let (Some((lx, ly)), Some(renderer)) = (self.last_cursor, &mut self.renderer)
                    {
                        let dx = (position.x - lx) as f32;
                        let dy = (position.y - ly) as f32;
                        renderer.camera.rotate(dx, dy);
                    }
                }
                self.last_cursor = Some((position.x, position.y));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    let ticks = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_TICK) as f32,
                    };
                    renderer.camera.zoom(ticks);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                if let Some(renderer) = &mut self.renderer {
                    renderer.update(dt);

                    match renderer.render() {
                        Ok(()) => {}
                        Err(RenderError::SurfaceOutOfMemory) => {
                            tracing::error!("surface out of memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => {
                            tracing::warn!("render error: {}", e);
                        }
                    }

                    if let Some(window) = &self.window {
                        window.set_title(&format!("Orrery | {}", renderer.get_info()));
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Run the windowed viewer until the user closes it
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let start_epoch = config.resolve_start_epoch()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, start_epoch);
    event_loop.run_app(&mut app)?;

    Ok(())
}
