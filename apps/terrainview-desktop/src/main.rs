mod components;
mod scene;

use anyhow::{Context as _, Result};
use clap::Parser;
use components::{CameraRig, StatsComponent, TerrainComponent};
use scene::{Gpu, Scene};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use terrainview_assets::ContentStore;
use terrainview_common::{FrameTime, Technique, ViewerConfig};
use terrainview_input::{CameraController, Key};
use terrainview_render::GameLoop;
use terrainview_tools::{StatisticsOverlay, TrackingAllocator};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator::new();

/// Pixels per scroll line for trackpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 40.0;

/// Longest simulation step; stalls beyond this are not replayed.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "terrainview-desktop", about = "Heightmap terrain viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory assets are loaded from
    #[arg(long, default_value = "./content")]
    content_dir: PathBuf,

    /// Shader technique: simple or textured
    #[arg(long)]
    technique: Option<Technique>,

    /// Texture asset name (defaults to a procedural checkerboard)
    #[arg(long)]
    texture: Option<String>,

    /// Grayscale heightmap asset name (defaults to a flat grid)
    #[arg(long)]
    heightmap: Option<String>,

    /// Grid vertices along X
    #[arg(long)]
    width: Option<u32>,

    /// Grid vertices along Z
    #[arg(long)]
    height: Option<u32>,

    /// Disable diffuse lighting in the textured technique
    #[arg(long)]
    no_lighting: bool,
}

impl Cli {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(technique) = self.technique {
            config.render.technique = technique;
        }
        if let Some(texture) = &self.texture {
            config.render.texture = Some(texture.clone());
        }
        if let Some(heightmap) = &self.heightmap {
            config.terrain.heightmap = Some(heightmap.clone());
        }
        if let Some(width) = self.width {
            config.terrain.width = width;
        }
        if let Some(height) = self.height {
            config.terrain.height = height;
        }
        if self.no_lighting {
            config.render.lighting = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::Forward,
        KeyCode::KeyS => Key::Back,
        KeyCode::KeyA => Key::StrafeLeft,
        KeyCode::KeyD => Key::StrafeRight,
        KeyCode::Space | KeyCode::KeyE => Key::Up,
        KeyCode::ControlLeft | KeyCode::KeyQ => Key::Down,
        KeyCode::ArrowLeft => Key::TurnLeft,
        KeyCode::ArrowRight => Key::TurnRight,
        KeyCode::ArrowUp => Key::LookUp,
        KeyCode::ArrowDown => Key::LookDown,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Boost,
        _ => return None,
    };
    Some(key)
}

/// Releases and focus loss must reach the input state even over the overlay,
/// otherwise a key or mouse-look stays held.
fn always_forwarded(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::MouseInput {
            state: ElementState::Released,
            ..
        } | WindowEvent::KeyboardInput {
            event: KeyEvent {
                state: ElementState::Released,
                ..
            },
            ..
        } | WindowEvent::Focused(false)
    )
}

/// Draw each overlay entry as one line of text in the top-left corner.
fn draw_overlay(ctx: &egui::Context, stats: &StatisticsOverlay) {
    egui::Area::new(egui::Id::new("statistics"))
        .fixed_pos(egui::pos2(8.0, 8.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for line in stats.lines() {
                    ui.label(egui::RichText::new(line).monospace());
                }
                ui.small("WASD/QE: move | Arrows or RMB: look | Tab: technique | L: light");
            });
        });
}

/// Window, surface and overlay state created on `resumed`.
struct Surface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct ViewerApp {
    scene: Scene,
    game: GameLoop<Scene>,
    surface: Option<Surface>,
    egui_ctx: egui::Context,
    show_overlay: bool,
    last_frame: Instant,
    time: FrameTime,
    error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(scene: Scene) -> Result<Self> {
        let mut game = GameLoop::new();
        game.add(StatsComponent::new(&ALLOCATOR))?;
        game.add(CameraRig::new(CameraController::from_config(
            &scene.config.camera,
        )))?;
        game.add(TerrainComponent::new())?;

        Ok(Self {
            scene,
            game,
            surface: None,
            egui_ctx: egui::Context::default(),
            show_overlay: true,
            last_frame: Instant::now(),
            time: FrameTime::default(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        self.game.shutdown(&mut self.scene);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.scene.config.window;
        let attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("terrainview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend ({})",
            adapter.get_info().backend.to_str(),
            adapter.get_info().name
        );

        self.scene.camera.set_viewport(config.width, config.height);
        self.scene.gpu = Some(Gpu {
            device,
            queue,
            surface_format,
            width: config.width,
            height: config.height,
        });
        self.surface = Some(Surface {
            window,
            surface,
            config,
            egui_winit,
            egui_renderer,
        });

        self.game.start(&mut self.scene)?;
        self.last_frame = Instant::now();
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, pressed: bool) {
        if let Some(key) = map_key(code) {
            self.scene.input.set_key(key, pressed);
        }
        if !pressed {
            return;
        }
        match code {
            KeyCode::Escape => {
                self.game.shutdown(&mut self.scene);
                event_loop.exit();
            }
            KeyCode::F1 => self.show_overlay = !self.show_overlay,
            KeyCode::Tab => {
                self.scene.draw.technique = match self.scene.draw.technique {
                    Technique::Simple => Technique::Textured,
                    Technique::Textured => Technique::Simple,
                };
                tracing::info!("technique: {}", self.scene.draw.technique);
            }
            KeyCode::KeyL => {
                let lighting = &mut self.scene.draw.lighting;
                lighting.enabled = !lighting.enabled;
                tracing::info!("lighting: {}", lighting.enabled);
            }
            _ => {}
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(surface), Some(gpu)) = (&mut self.surface, &mut self.scene.gpu) else {
            return;
        };
        surface.config.width = width.max(1);
        surface.config.height = height.max(1);
        surface.surface.configure(&gpu.device, &surface.config);
        gpu.width = surface.config.width;
        gpu.height = surface.config.height;
        self.scene.camera.set_viewport(gpu.width, gpu.height);
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;
        self.scene.wall_delta = elapsed;
        self.time = self.time.advance(elapsed.min(MAX_FRAME_DELTA));

        let (Some(surface), Some(gpu)) = (&mut self.surface, &self.scene.gpu) else {
            return;
        };

        let output = match surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.surface.configure(&gpu.device, &surface.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.scene.frame_target = Some(view);
        if let Err(e) = self.game.frame(&mut self.scene, self.time) {
            tracing::warn!("frame skipped: {e}");
        }
        let Some(view) = self.scene.frame_target.take() else {
            return;
        };

        if self.show_overlay {
            self.render_overlay(&view);
        }

        output.present();
        self.scene.input.end_frame();
    }

    fn render_overlay(&mut self, view: &wgpu::TextureView) {
        let (Some(surface), Some(gpu)) = (&mut self.surface, &self.scene.gpu) else {
            return;
        };

        let raw_input = surface.egui_winit.take_egui_input(&surface.window);
        let stats = &self.scene.stats;
        let full_output = self.egui_ctx.run(raw_input, |ctx| draw_overlay(ctx, stats));
        surface
            .egui_winit
            .handle_platform_output(&surface.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [surface.config.width, surface.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let renderer = &mut surface.egui_renderer;
        for (id, image_delta) in &full_output.textures_delta.set {
            renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("overlay_encoder"),
            });
        renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            renderer.free_texture(id);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(surface) = &mut self.surface {
            let response = surface.egui_winit.on_window_event(&surface.window, &event);
            if response.consumed && !always_forwarded(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.game.shutdown(&mut self.scene);
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => self.resize(new_size.width, new_size.height),
            WindowEvent::Focused(false) => self.scene.input.clear(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code, state == ElementState::Pressed),
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                let held = state == ElementState::Pressed;
                self.scene.input.set_key(Key::MouseLook, held);
                if let Some(surface) = &self.surface {
                    surface.window.set_cursor_visible(!held);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.scene.input.add_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(surface) = &self.surface {
                    surface.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.scene
                .input
                .add_mouse_delta(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(surface) = &self.surface {
            surface.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.game.shutdown(&mut self.scene);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("terrainview-desktop starting");

    let config = cli.viewer_config()?;
    let scene = Scene::new(config, ContentStore::new(&cli.content_dir));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(scene)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
