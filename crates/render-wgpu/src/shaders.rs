/// WGSL for the "Simple" technique: per-vertex color, no lighting.
pub const SIMPLE_SHADER: &str = r#"
struct Uniforms {
    world: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_direction: vec3<f32>,
    ambient: f32,
    lighting_enabled: u32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_simple(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.world * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world_pos;
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_simple(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// WGSL for the "Textured" technique: per-vertex diffuse plus ambient,
/// multiplied into the sampled texture color.
pub const TEXTURED_SHADER: &str = r#"
struct Uniforms {
    world: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_direction: vec3<f32>,
    ambient: f32,
    lighting_enabled: u32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var terrain_texture: texture_2d<f32>;
@group(1) @binding(1)
var terrain_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_textured(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.world * vec4<f32>(vertex.position, 1.0);

    var lighting = 1.0;
    if (uniforms.lighting_enabled != 0u) {
        let normal = normalize((uniforms.world * vec4<f32>(vertex.normal, 0.0)).xyz);
        let light_dir = normalize(uniforms.light_direction);
        lighting = saturate(dot(normal, -light_dir)) + uniforms.ambient;
    }

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world_pos;
    out.color = vec4<f32>(vertex.color.rgb * lighting, vertex.color.a);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_textured(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(terrain_texture, terrain_sampler, in.uv) * in.color;
}
"#;
