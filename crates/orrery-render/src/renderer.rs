//! Main renderer orchestrating everything

use crate::camera::OrbitCamera;
use crate::config::ViewerConfig;
use crate::error::{RenderError, RenderResult};
use crate::pipeline::{self, BindLayouts, GlobalUniforms, Pipelines};
use crate::scene::{self, Scene};
use crate::texture::TextureStore;
use hifitime::Epoch;
use orrery_core::constants::DAYS_PER_JULIAN_CENTURY;
use orrery_sim::{epoch_to_jc, Body, SolarSystem, TimeController};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct Renderer {
    // WGPU state
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    depth_view: wgpu::TextureView,
    layouts: BindLayouts,
    pipelines: Pipelines,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    scene: Scene,
    textures: TextureStore,

    // State
    pub camera: OrbitCamera,
    pub solar_system: SolarSystem,
    pub time_controller: TimeController,
    focus: Body,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        viewer_config: &ViewerConfig,
        start_epoch: Option<Epoch>,
    ) -> RenderResult<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Orrery Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        tracing::info!("Configuring surface: {}x{}", config.width, config.height);
        surface.configure(&device, &config);

        let (_, depth_view) = pipeline::create_depth_texture(&device, config.width, config.height);

        let layouts = pipeline::create_bind_layouts(&device);
        let pipelines = pipeline::create_pipelines(&device, surface_format, &layouts);

        let globals = GlobalUniforms {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            camera_right: [1.0, 0.0, 0.0, 0.0],
            camera_up: [0.0, 1.0, 0.0, 0.0],
            time: [0.0; 4],
        };
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &layouts.globals,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene = Scene::new(&device, &queue, &layouts, viewer_config);
        let textures = TextureStore::start(viewer_config.texture_dir.clone());

        let mut time_controller = match start_epoch {
            Some(epoch) => TimeController::at_epoch(epoch),
            None => TimeController::new(),
        };
        time_controller.set_rate_days_per_second(viewer_config.rate_days_per_second);

        let solar_system = SolarSystem::at_epoch(time_controller.current());
        let camera = OrbitCamera::new(config.width as f32 / config.height as f32);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            layouts,
            pipelines,
            globals_buffer,
            globals_bind_group,
            scene,
            textures,
            camera,
            solar_system,
            time_controller,
            focus: Body::Sun,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let (_, depth_view) =
            pipeline::create_depth_texture(&self.device, self.config.width, self.config.height);
        self.depth_view = depth_view;

        self.camera.aspect = new_size.width as f32 / new_size.height as f32;
    }

    pub fn focus(&self) -> Body {
        self.focus
    }

    /// Focus the camera on a body, backing off to frame it
    pub fn set_focus(&mut self, body: Body) {
        if self.focus != body {
            self.focus = body;
            let distance = if body == Body::Sun {
                45.0
            } else {
                scene::display_radius(body) * 10.0
            };
            self.camera.set_distance(distance);
        }
    }

    /// Focus the next body, wrapping after Pluto
    pub fn cycle_focus(&mut self) {
        let all = Body::all();
        let index = all.iter().position(|b| *b == self.focus).unwrap_or(0);
        self.set_focus(all[(index + 1) % all.len()]);
    }

    pub fn toggle_orbits(&mut self) {
        self.scene.show_orbits = !self.scene.show_orbits;
    }

    pub fn toggle_grid(&mut self) {
        self.scene.show_grid = !self.scene.show_grid;
    }

    pub fn toggle_belts(&mut self) {
        self.scene.show_belts = !self.scene.show_belts;
    }

    /// Advance the clock and refresh all per-frame GPU state
    pub fn update(&mut self, dt: f32) {
        let epoch = self.time_controller.tick(dt as f64);
        self.solar_system.set_epoch(epoch);

        for loaded in self.textures.poll() {
            self.scene
                .apply_texture(&self.device, &self.layouts, &self.queue, &loaded);
        }

        self.scene.update(&self.queue, &self.solar_system);

        // The camera revolves around whatever it is focused on
        self.camera
            .set_focus(scene::body_scene_position(&self.solar_system, self.focus));

        let (right, up) = self.camera.basis();
        let days = (epoch_to_jc(epoch) * DAYS_PER_JULIAN_CENTURY) as f32;
        let globals = GlobalUniforms {
            view_proj: self.camera.build_view_projection_matrix().to_cols_array_2d(),
            camera_right: [right.x, right.y, right.z, 0.0],
            camera_up: [up.x, up.y, up.z, 0.0],
            time: [days, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    pub fn render(&mut self) -> RenderResult<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::SurfaceOutOfMemory);
            }
            Err(e) => {
                return Err(RenderError::Surface(e.to_string()));
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.002,
                            g: 0.002,
                            b: 0.006,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.scene.draw(&mut rpass, &self.pipelines);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// One-line status for the window title
    pub fn get_info(&self) -> String {
        let paused = if self.time_controller.is_paused() {
            " | paused"
        } else {
            ""
        };
        format!(
            "{} | {:.2} d/s{} | focus: {}",
            self.time_controller.format_time(),
            self.time_controller.rate_days_per_second(),
            paused,
            self.focus.name()
        )
    }
}
