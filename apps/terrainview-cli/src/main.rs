use clap::{Parser, Subcommand};
use glam::Vec3;
use terrainview_common::ViewerConfig;
use terrainview_render::OrbitCamera;
use terrainview_terrain::{HeightField, MeshOptions, TerrainMesh};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terrainview-cli", about = "Inspect terrain meshes and camera math")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default configuration
    Info,
    /// Generate a terrain grid and report its layout
    Mesh {
        /// Vertices along X
        #[arg(long, default_value = "4")]
        width: u32,
        /// Vertices along Z
        #[arg(long, default_value = "4")]
        height: u32,
        /// Amplitude of a sine bump field; 0 gives a flat grid
        #[arg(long, default_value = "0")]
        amplitude: f32,
        /// Texture coordinate multiplier
        #[arg(long, default_value = "1")]
        texture_scale: f32,
        /// Dump the index buffer one triangle per line
        #[arg(long)]
        indices: bool,
    },
    /// Apply yaw/pitch deltas to a camera and print the resulting pose
    Camera {
        /// Starting position as x,y,z
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "0,0,0")]
        position: Vec<f32>,
        /// Starting look-at target as x,y,z
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "0,0,-1")]
        target: Vec<f32>,
        /// Yaw deltas in radians, applied in order
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        yaw: Vec<f32>,
        /// Pitch deltas in radians, applied in order after the yaw deltas
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        pitch: Vec<f32>,
        /// Maximum absolute pitch in radians
        #[arg(long)]
        pitch_limit: Option<f32>,
    },
}

fn vec3(values: &[f32], what: &str) -> anyhow::Result<Vec3> {
    match values {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => anyhow::bail!("{what} needs exactly three components, got {}", values.len()),
    }
}

fn bump_field(width: u32, height: u32, amplitude: f32) -> anyhow::Result<HeightField> {
    if amplitude == 0.0 {
        return Ok(HeightField::flat(width, height)?);
    }
    let field = HeightField::from_fn(width, height, |x, z| {
        let u = x as f32 / (width - 1) as f32 * std::f32::consts::PI;
        let v = z as f32 / (height - 1) as f32 * std::f32::consts::PI;
        amplitude * u.sin() * v.sin()
    })?;
    Ok(field)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("terrainview-cli v{}", env!("CARGO_PKG_VERSION"));
            let config = ViewerConfig::default();
            println!(
                "default grid: {}x{} (texture scale {})",
                config.terrain.width, config.terrain.height, config.terrain.texture_scale
            );
            println!(
                "default technique: {}, lighting: {}",
                config.render.technique, config.render.lighting
            );
            println!(
                "projection: fov={:.1}°, near={}, far={}",
                terrainview_render::FIELD_OF_VIEW.to_degrees(),
                terrainview_render::NEAR_PLANE,
                terrainview_render::FAR_PLANE
            );
        }
        Commands::Mesh {
            width,
            height,
            amplitude,
            texture_scale,
            indices,
        } => {
            let field = bump_field(width, height, amplitude)?;
            let mesh = TerrainMesh::generate_with(
                &field,
                MeshOptions::default().with_texture_scale(texture_scale),
            );
            let (min, max) = mesh.bounds();
            println!("grid: {}x{}", mesh.width(), mesh.height());
            println!("vertices: {}", mesh.vertices().len());
            println!(
                "indices: {} ({} triangles)",
                mesh.indices().len(),
                mesh.triangle_count()
            );
            println!("bounds: {min} .. {max}");
            if indices {
                for tri in mesh.indices().chunks_exact(3) {
                    println!("{} {} {}", tri[0], tri[1], tri[2]);
                }
            }
        }
        Commands::Camera {
            position,
            target,
            yaw,
            pitch,
            pitch_limit,
        } => {
            let mut camera = OrbitCamera::new(
                vec3(&position, "position")?,
                vec3(&target, "target")?,
                1280,
                720,
            )
            .with_pitch_limit(pitch_limit);

            for delta in yaw {
                camera.apply_yaw_delta(delta);
            }
            for delta in pitch {
                if !camera.apply_pitch_delta(delta) {
                    tracing::info!("pitch delta {delta} rejected at limit");
                }
            }

            println!("yaw: {:.4} rad ({:.2}°)", camera.yaw(), camera.yaw().to_degrees());
            println!(
                "pitch: {:.4} rad ({:.2}°)",
                camera.pitch(),
                camera.pitch().to_degrees()
            );
            println!("direction: {}", camera.direction());
            println!("view:");
            let view = camera.view();
            for row in 0..4 {
                println!("  {}", view.row(row));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_requires_three_components() {
        assert_eq!(vec3(&[1.0, 2.0, 3.0], "p").unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert!(vec3(&[1.0, 2.0], "p").is_err());
    }

    #[test]
    fn bump_field_peaks_in_the_middle() {
        let field = bump_field(5, 5, 2.0).unwrap();
        assert!((field.get(2, 2).unwrap() - 2.0).abs() < 1e-5);
        assert!(field.get(0, 0).unwrap().abs() < 1e-5);
    }

    #[test]
    fn flat_field_for_zero_amplitude() {
        let field = bump_field(3, 2, 0.0).unwrap();
        assert_eq!(field.range(), (0.0, 0.0));
    }

    #[test]
    fn bump_field_rejects_degenerate_grid() {
        assert!(bump_field(1, 4, 1.0).is_err());
    }

    #[test]
    fn camera_command_parses_negative_deltas() {
        let cli = Cli::parse_from([
            "terrainview-cli",
            "camera",
            "--yaw",
            "0.5,-0.25",
            "--pitch",
            "-0.1,-0.05",
        ]);
        match cli.command {
            Commands::Camera { yaw, pitch, .. } => {
                assert_eq!(yaw, vec![0.5, -0.25]);
                assert_eq!(pitch, vec![-0.1, -0.05]);
            }
            _ => panic!("expected camera command"),
        }
    }

    #[test]
    fn camera_command_parses_negative_vectors() {
        let cli = Cli::try_parse_from([
            "terrainview-cli",
            "camera",
            "--position",
            "-8,12,8",
            "--target",
            "-1,-2,-3",
            "--yaw",
            "-0.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Camera {
                position,
                target,
                yaw,
                ..
            } => {
                assert_eq!(vec3(&position, "position").unwrap(), Vec3::new(-8.0, 12.0, 8.0));
                assert_eq!(vec3(&target, "target").unwrap(), Vec3::new(-1.0, -2.0, -3.0));
                assert_eq!(yaw, vec![-0.5]);
            }
            _ => panic!("expected camera command"),
        }
    }
}
