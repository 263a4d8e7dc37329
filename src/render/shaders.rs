//! GLSL ES 3.00 programs
//!
//! Tuning values shared with the CPU motion code are prepended as `#define`s
//! built from [`crate::constants`], so the shader bodies never repeat a
//! literal that also lives in Rust.

use crate::constants::*;

const HEADER: &str = "#version 300 es\nprecision highp float;\n";

/// GLSL float literal; always carries a decimal point
fn glsl_float(v: f32) -> String {
    format!("{:?}", v)
}

fn define_float(out: &mut String, name: &str, value: f32) {
    out.push_str(&format!("#define {} {}\n", name, glsl_float(value)));
}

fn define_vec3(out: &mut String, name: &str, v: [f32; 3]) {
    out.push_str(&format!(
        "#define {} vec3({}, {}, {})\n",
        name,
        glsl_float(v[0]),
        glsl_float(v[1]),
        glsl_float(v[2])
    ));
}

/// `#define` block for the foliage program
pub fn foliage_defines() -> String {
    let mut out = String::new();
    for (name, value) in [
        ("BREATHE_FREQ", FOLIAGE_BREATHE_FREQ),
        ("BREATHE_PHASE", FOLIAGE_BREATHE_PHASE),
        ("BREATHE_AMP", FOLIAGE_BREATHE_AMP),
        ("BREATHE_TREE_DAMP", FOLIAGE_BREATHE_TREE_DAMP),
        ("FLOAT_Y_FREQ", FOLIAGE_FLOAT_Y_FREQ),
        ("FLOAT_Y_PHASE", FOLIAGE_FLOAT_Y_PHASE),
        ("FLOAT_Y_AMP", FOLIAGE_FLOAT_Y_AMP),
        ("SCATTER_MOVEMENT", FOLIAGE_SCATTER_MOVEMENT),
        ("DRIFT_X_FREQ", FOLIAGE_DRIFT_X_FREQ),
        ("DRIFT_X_PHASE", FOLIAGE_DRIFT_X_PHASE),
        ("DRIFT_Z_FREQ", FOLIAGE_DRIFT_Z_FREQ),
        ("DRIFT_Z_PHASE", FOLIAGE_DRIFT_Z_PHASE),
        ("POINT_SIZE_BASE", FOLIAGE_POINT_SIZE_BASE),
        ("POINT_SIZE_RANDOM", FOLIAGE_POINT_SIZE_RANDOM),
        ("EDGE_OUTER", FOLIAGE_EDGE_OUTER),
        ("EDGE_INNER", FOLIAGE_EDGE_INNER),
        ("CORE_OUTER", FOLIAGE_CORE_OUTER),
        ("PULSE_FREQ", FOLIAGE_PULSE_FREQ),
        ("PULSE_AMP", FOLIAGE_PULSE_AMP),
        ("PULSE_BASE", FOLIAGE_PULSE_BASE),
        ("HEIGHT_LOW", FOLIAGE_HEIGHT_LOW),
        ("HEIGHT_HIGH", FOLIAGE_HEIGHT_HIGH),
        ("HEIGHT_TINT", FOLIAGE_HEIGHT_TINT),
        ("CORE_TINT", FOLIAGE_CORE_TINT),
        ("GLOW_MIX", FOLIAGE_GLOW_MIX),
        ("ALPHA", FOLIAGE_ALPHA),
    ] {
        define_float(&mut out, name, value);
    }
    define_vec3(&mut out, "GOLD_TINT", FOLIAGE_GOLD_TINT);
    out
}

const FOLIAGE_VERTEX_BODY: &str = r#"
layout(location = 0) in vec3 a_scatter_position;
layout(location = 1) in vec3 a_tree_position;
layout(location = 2) in float a_random_offset;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_progress;

out float v_random_offset;
out vec3 v_position;

void main() {
    v_random_offset = a_random_offset;

    vec3 morphed = mix(a_scatter_position, a_tree_position, u_progress);

    float breathe = sin(u_time * BREATHE_FREQ + a_random_offset * BREATHE_PHASE) * BREATHE_AMP;
    float float_y = sin(u_time * FLOAT_Y_FREQ + a_random_offset * FLOAT_Y_PHASE) * FLOAT_Y_AMP;

    // Drift only while scattered
    float scatter_movement = (1.0 - u_progress) * SCATTER_MOVEMENT;
    morphed.x += sin(u_time * DRIFT_X_FREQ + a_random_offset * DRIFT_X_PHASE) * scatter_movement;
    morphed.y += float_y + breathe * (1.0 - u_progress * BREATHE_TREE_DAMP);
    morphed.z += cos(u_time * DRIFT_Z_FREQ + a_random_offset * DRIFT_Z_PHASE) * scatter_movement;

    v_position = morphed;

    vec4 view_pos = u_view * vec4(morphed, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = (POINT_SIZE_BASE + a_random_offset * POINT_SIZE_RANDOM) * (1.0 / -view_pos.z);
}
"#;

const FOLIAGE_FRAGMENT_BODY: &str = r#"
in float v_random_offset;
in vec3 v_position;

uniform float u_time;
uniform vec3 u_base_color;
uniform vec3 u_glow_color;

out vec4 fragColor;

void main() {
    vec2 center = gl_PointCoord - 0.5;
    float dist = length(center);
    if (dist > 0.5) {
        discard;
    }

    float edge_glow = smoothstep(EDGE_OUTER, EDGE_INNER, dist);
    float core_glow = smoothstep(CORE_OUTER, 0.0, dist);

    float pulse = sin(u_time * PULSE_FREQ + v_random_offset * BREATHE_PHASE) * PULSE_AMP + PULSE_BASE;

    // More gold towards the tip
    float height_factor = smoothstep(HEIGHT_LOW, HEIGHT_HIGH, v_position.y);

    vec3 color = mix(u_base_color, GOLD_TINT, height_factor * HEIGHT_TINT + core_glow * CORE_TINT);
    color += u_glow_color * core_glow * pulse * GLOW_MIX;

    fragColor = vec4(color, edge_glow * ALPHA);
}
"#;

pub fn foliage_vertex_source() -> String {
    format!("{}{}{}", HEADER, foliage_defines(), FOLIAGE_VERTEX_BODY)
}

pub fn foliage_fragment_source() -> String {
    format!("{}{}{}", HEADER, foliage_defines(), FOLIAGE_FRAGMENT_BODY)
}

/// Instanced mesh program shared by the ornaments, topper, glow and trunk
pub const ORNAMENT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance_matrix;
layout(location = 6) in vec3 a_instance_color;

uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    vec4 world_pos = a_instance_matrix * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    // Instance scale is uniform, so the upper 3x3 is fine for normals
    v_normal = mat3(a_instance_matrix) * a_normal;
    v_color = a_instance_color;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

const ORNAMENT_FRAGMENT_BODY: &str = r#"
in vec3 v_world_position;
in vec3 v_normal;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform vec3 u_topper_pos;
uniform float u_metalness;
uniform float u_roughness;
uniform float u_emissive;
uniform float u_opacity;
uniform bool u_unlit;

out vec4 fragColor;

struct Light {
    vec3 position;
    vec3 color;
    float intensity;
};

vec3 shade(Light light, vec3 n, vec3 v, vec3 albedo, vec3 f0, float shininess) {
    vec3 l = normalize(light.position - v_world_position);
    vec3 h = normalize(l + v);
    float ndotl = max(dot(n, l), 0.0);
    float highlight = pow(max(dot(n, h), 0.0), shininess) * (shininess + 8.0) / 25.0;
    vec3 diffuse = albedo * (1.0 - u_metalness);
    return (diffuse + f0 * highlight) * light.color * light.intensity * ndotl;
}

void main() {
    vec3 color;

    if (u_unlit) {
        color = v_color;
    } else {
        vec3 n = normalize(v_normal);
        vec3 v = normalize(u_camera_pos - v_world_position);
        if (dot(n, v) < 0.0) {
            n = -n;
        }

        vec3 albedo = v_color;
        vec3 f0 = mix(vec3(0.04), albedo, u_metalness);
        float shininess = exp2(10.0 * (1.0 - u_roughness) + 1.0);

        // Warm key, emerald fill, gold rim
        color = AMBIENT_COLOR * albedo;
        color += shade(Light(vec3(5.0, 12.0, 5.0), KEY_COLOR, 1.0), n, v, albedo, f0, shininess);
        color += shade(Light(vec3(-6.0, 8.0, -4.0), FILL_COLOR, 0.4), n, v, albedo, f0, shininess);
        color += shade(Light(vec3(0.0, 15.0, -8.0), RIM_COLOR, 0.6), n, v, albedo, f0, shininess);

        // Point light carried by the topper star
        vec3 to_topper = u_topper_pos - v_world_position;
        float falloff = pow(clamp(1.0 - length(to_topper) / TOPPER_LIGHT_RANGE, 0.0, 1.0), 2.0);
        color += shade(Light(u_topper_pos, RIM_COLOR, 2.0 * falloff), n, v, albedo, f0, shininess);

        // Stand-in for an environment map so polished metal is not black
        vec3 r = reflect(-v, n);
        vec3 env = mix(FLOOR_COLOR, SKY_COLOR, r.y * 0.5 + 0.5);
        float fresnel = pow(1.0 - max(dot(n, v), 0.0), 5.0);
        color += env * mix(f0, vec3(1.0), fresnel) * (1.0 - u_roughness);

        color += albedo * u_emissive;
    }

    float dist = length(v_world_position - u_camera_pos);
    float fog = smoothstep(FOG_NEAR, FOG_FAR, dist);
    color = mix(color, BACKGROUND_COLOR, fog);

    fragColor = vec4(color, u_opacity);
}
"#;

pub const TOPPER_LIGHT_RANGE: f32 = 5.0;

pub fn ornament_fragment_source() -> String {
    let mut defines = String::new();
    define_float(&mut defines, "FOG_NEAR", FOG_NEAR);
    define_float(&mut defines, "FOG_FAR", FOG_FAR);
    define_float(&mut defines, "TOPPER_LIGHT_RANGE", TOPPER_LIGHT_RANGE);
    define_vec3(&mut defines, "BACKGROUND_COLOR", BACKGROUND_COLOR);
    define_vec3(&mut defines, "AMBIENT_COLOR", [0.0153, 0.0341, 0.0247]); // #1a3a2a * 0.15
    define_vec3(&mut defines, "KEY_COLOR", [1.0, 0.894, 0.710]); // #FFE4B5
    define_vec3(&mut defines, "FILL_COLOR", [0.176, 0.353, 0.29]); // #2d5a4a
    define_vec3(&mut defines, "RIM_COLOR", [1.0, 0.843, 0.0]); // #FFD700
    define_vec3(&mut defines, "SKY_COLOR", [0.35, 0.3, 0.22]);
    define_vec3(&mut defines, "FLOOR_COLOR", [0.04, 0.1, 0.07]); // #0a1a12
    format!("{}{}{}", HEADER, defines, ORNAMENT_FRAGMENT_BODY)
}

/// Fullscreen triangle vertex shader for post-processing
pub const FULLSCREEN_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

out vec2 v_uv;

void main() {
    float x = float((gl_VertexID & 1) << 2);
    float y = float((gl_VertexID & 2) << 1);
    v_uv = vec2(x * 0.5, y * 0.5);
    gl_Position = vec4(x - 1.0, y - 1.0, 0.0, 1.0);
}
"#;

/// Keeps only pixels above the luminance threshold, with a soft knee
pub const BLOOM_EXTRACT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform float u_threshold;
uniform float u_smoothing;

out vec4 fragColor;

void main() {
    vec3 color = texture(u_texture, v_uv).rgb;
    float luma = dot(color, vec3(0.2126, 0.7152, 0.0722));
    float mask = smoothstep(u_threshold, u_threshold + u_smoothing, luma);
    fragColor = vec4(color * mask, 1.0);
}
"#;

/// Separable 9-tap Gaussian blur
pub const BLUR_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform vec2 u_direction;

out vec4 fragColor;

void main() {
    vec2 texel = 1.0 / vec2(textureSize(u_texture, 0));
    float weights[5] = float[](0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);

    vec3 result = texture(u_texture, v_uv).rgb * weights[0];
    for (int i = 1; i < 5; i++) {
        vec2 offset = u_direction * texel * float(i) * 2.0;
        result += texture(u_texture, v_uv + offset).rgb * weights[i];
        result += texture(u_texture, v_uv - offset).rgb * weights[i];
    }

    fragColor = vec4(result, 1.0);
}
"#;

/// Scene plus bloom, then the vignette
pub const COMPOSITE_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_scene;
uniform sampler2D u_bloom;
uniform float u_bloom_strength;
uniform float u_vignette_offset;
uniform float u_vignette_darkness;

out vec4 fragColor;

void main() {
    vec3 color = texture(u_scene, v_uv).rgb;
    color += texture(u_bloom, v_uv).rgb * u_bloom_strength;

    vec2 coord = (v_uv - 0.5) * u_vignette_offset;
    color = mix(color, vec3(1.0 - u_vignette_darkness), dot(coord, coord));

    fragColor = vec4(color, 1.0);
}
"#;
