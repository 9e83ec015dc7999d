use std::time::Duration;
use terrainview_assets::ContentStore;
use terrainview_common::ViewerConfig;
use terrainview_input::InputState;
use terrainview_render::OrbitCamera;
use terrainview_render_wgpu::{DrawSettings, Lighting};
use terrainview_tools::StatisticsOverlay;

/// Device handles available once the window surface exists.
pub struct Gpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
}

/// Context shared by every component of the viewer's game loop.
pub struct Scene {
    pub config: ViewerConfig,
    pub content: ContentStore,
    pub gpu: Option<Gpu>,
    /// Surface texture being drawn this frame.
    pub frame_target: Option<wgpu::TextureView>,
    /// Wall-clock time since the previous frame. Simulation time is clamped,
    /// this is not.
    pub wall_delta: Duration,
    pub camera: OrbitCamera,
    pub input: InputState,
    pub stats: StatisticsOverlay,
    pub draw: DrawSettings,
}

impl Scene {
    pub fn new(config: ViewerConfig, content: ContentStore) -> Self {
        let camera_config = &config.camera;
        let mut camera = OrbitCamera::new(
            camera_config.position,
            glam::Vec3::ZERO,
            config.window.width,
            config.window.height,
        )
        .with_pitch_limit(camera_config.pitch_limit);
        camera.move_to(camera_config.position, camera_config.yaw, camera_config.pitch);

        let render = &config.render;
        let [r, g, b, a] = render.clear_color;
        let draw = DrawSettings {
            technique: render.technique,
            lighting: Lighting {
                direction: render.light_direction,
                ambient: render.ambient,
                enabled: render.lighting,
            },
            clear_color: wgpu::Color { r, g, b, a },
        };

        Self {
            config,
            content,
            gpu: None,
            frame_target: None,
            wall_delta: Duration::ZERO,
            camera,
            input: InputState::new(),
            stats: StatisticsOverlay::new(),
            draw,
        }
    }
}
