use crate::scene::Scene;
use terrainview_assets::TextureData;
use terrainview_common::FrameTime;
use terrainview_input::CameraController;
use terrainview_render::{BoxError, Renderable};
use terrainview_render_wgpu::TerrainRenderer;
use terrainview_terrain::{HeightField, MeshOptions, TerrainMesh};
use terrainview_tools::{FpsCounter, TrackingAllocator};

const CHECKERBOARD_SIZE: u32 = 256;
const CHECKERBOARD_CELLS: u32 = 8;

/// Turns this frame's input into camera motion.
pub struct CameraRig {
    controller: CameraController,
}

impl CameraRig {
    pub fn new(controller: CameraController) -> Self {
        Self { controller }
    }
}

impl Renderable<Scene> for CameraRig {
    fn name(&self) -> &str {
        "camera"
    }

    fn update(&mut self, ctx: &mut Scene, time: FrameTime) {
        let intent = self.controller.intent(&ctx.input, time.dt());
        if !intent.is_idle() {
            CameraController::apply(intent, &mut ctx.camera);
        }

        let p = ctx.camera.position();
        ctx.stats
            .set("Camera", format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
        ctx.stats.set(
            "Yaw/Pitch",
            format!(
                "{:.1}° / {:.1}°",
                ctx.camera.yaw().to_degrees(),
                ctx.camera.pitch().to_degrees()
            ),
        );
    }
}

/// Owns the terrain mesh on the GPU and draws it each frame.
#[derive(Default)]
pub struct TerrainComponent {
    renderer: Option<TerrainRenderer>,
    target_size: (u32, u32),
}

impl TerrainComponent {
    pub fn new() -> Self {
        Self::default()
    }

    fn heightfield(ctx: &Scene) -> Result<HeightField, BoxError> {
        let terrain = &ctx.config.terrain;
        let field = match &terrain.heightmap {
            Some(name) => ctx.content.heightmap(name, terrain.height_scale)?,
            None => HeightField::flat(terrain.width, terrain.height)?,
        };
        Ok(field)
    }

    fn texture(ctx: &mut Scene) -> Result<TextureData, BoxError> {
        match ctx.config.render.texture.clone() {
            Some(name) => Ok(ctx.content.texture(&name)?.as_ref().clone()),
            None => Ok(TextureData::checkerboard(
                CHECKERBOARD_SIZE,
                CHECKERBOARD_CELLS,
            )),
        }
    }
}

impl Renderable<Scene> for TerrainComponent {
    fn name(&self) -> &str {
        "terrain"
    }

    fn load_resources(&mut self, ctx: &mut Scene) -> Result<(), BoxError> {
        let field = Self::heightfield(ctx)?;
        let mesh = TerrainMesh::generate_with(
            &field,
            MeshOptions::default().with_texture_scale(ctx.config.terrain.texture_scale),
        );
        let texture = Self::texture(ctx)?;

        let gpu = ctx.gpu.as_ref().ok_or("GPU not initialized")?;
        let renderer = TerrainRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            gpu.width,
            gpu.height,
            &mesh,
            &texture,
        );
        self.target_size = (gpu.width, gpu.height);
        ctx.stats.set("Triangles", renderer.triangle_count());
        self.renderer = Some(renderer);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Scene, _time: FrameTime) {
        let (Some(renderer), Some(gpu), Some(target)) =
            (&mut self.renderer, &ctx.gpu, &ctx.frame_target)
        else {
            return;
        };
        if self.target_size != (gpu.width, gpu.height) {
            renderer.resize(&gpu.device, gpu.width, gpu.height);
            self.target_size = (gpu.width, gpu.height);
        }
        renderer.render(&gpu.device, &gpu.queue, target, &ctx.camera, &ctx.draw);
    }

    fn unload(&mut self, _ctx: &mut Scene) {
        if let Some(renderer) = self.renderer.take() {
            renderer.destroy();
        }
    }
}

/// Publishes frame rate and heap usage to the overlay.
pub struct StatsComponent {
    fps: FpsCounter,
    allocator: &'static TrackingAllocator,
}

impl StatsComponent {
    pub fn new(allocator: &'static TrackingAllocator) -> Self {
        Self {
            fps: FpsCounter::new(),
            allocator,
        }
    }
}

impl Renderable<Scene> for StatsComponent {
    fn name(&self) -> &str {
        "statistics"
    }

    fn init(&mut self, ctx: &mut Scene) -> Result<(), BoxError> {
        // Reserve the top lines so FPS and memory lead the overlay.
        ctx.stats.set("FPS", "-");
        ctx.stats.set("Memory", "-");
        Ok(())
    }

    fn update(&mut self, ctx: &mut Scene, _time: FrameTime) {
        self.fps.publish(ctx.wall_delta, &mut ctx.stats);
        self.allocator.publish(&mut ctx.stats);
        ctx.stats.set("Technique", ctx.draw.technique);
        ctx.stats.set(
            "Lighting",
            if ctx.draw.lighting.enabled { "on" } else { "off" },
        );
    }
}
