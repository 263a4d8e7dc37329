//! Host-side evaluation of the foliage program
//!
//! Mirrors `FOLIAGE_VERTEX_BODY` / `FOLIAGE_FRAGMENT_BODY` statement by
//! statement using GLSL builtin semantics, so the GPU math can be checked
//! without a GL context.

use crate::constants::*;
use crate::math::{Mat4, Vec3};
use crate::scene::FoliageUniforms;

/// GLSL `mix` for scalars
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

pub fn mix3(x: Vec3, y: Vec3, a: f32) -> Vec3 {
    Vec3::new(mix(x.x, y.x, a), mix(x.y, y.y, a), mix(x.z, y.z, a))
}

/// GLSL `smoothstep`, including the reversed-edge form the foliage uses
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Per-vertex attributes of one foliage particle
#[derive(Debug, Clone, Copy)]
pub struct FoliageAttributes {
    pub scatter_position: Vec3,
    pub tree_position: Vec3,
    pub random_offset: f32,
}

/// Outputs of the vertex stage
#[derive(Debug, Clone, Copy)]
pub struct FoliageVertex {
    /// `v_position`, the displaced world position
    pub world_position: Vec3,
    /// Eye-space depth, negative in front of the camera
    pub view_z: f32,
    pub point_size: f32,
}

pub fn foliage_vertex(attrs: &FoliageAttributes, uniforms: &FoliageUniforms, view: &Mat4) -> FoliageVertex {
    let t = uniforms.time;
    let p = uniforms.progress;
    let r = attrs.random_offset;

    let mut morphed = mix3(attrs.scatter_position, attrs.tree_position, p);

    let breathe = (t * FOLIAGE_BREATHE_FREQ + r * FOLIAGE_BREATHE_PHASE).sin() * FOLIAGE_BREATHE_AMP;
    let float_y = (t * FOLIAGE_FLOAT_Y_FREQ + r * FOLIAGE_FLOAT_Y_PHASE).sin() * FOLIAGE_FLOAT_Y_AMP;

    let scatter_movement = (1.0 - p) * FOLIAGE_SCATTER_MOVEMENT;
    morphed.x += (t * FOLIAGE_DRIFT_X_FREQ + r * FOLIAGE_DRIFT_X_PHASE).sin() * scatter_movement;
    morphed.y += float_y + breathe * (1.0 - p * FOLIAGE_BREATHE_TREE_DAMP);
    morphed.z += (t * FOLIAGE_DRIFT_Z_FREQ + r * FOLIAGE_DRIFT_Z_PHASE).cos() * scatter_movement;

    let view_z = view.transform_point(morphed).z;

    FoliageVertex {
        world_position: morphed,
        view_z,
        point_size: (FOLIAGE_POINT_SIZE_BASE + r * FOLIAGE_POINT_SIZE_RANDOM) * (1.0 / -view_z),
    }
}

/// Fragment stage. `point_coord` is `gl_PointCoord`; `None` means discarded.
pub fn foliage_fragment(
    point_coord: (f32, f32),
    random_offset: f32,
    world_position: Vec3,
    uniforms: &FoliageUniforms,
) -> Option<[f32; 4]> {
    let cx = point_coord.0 - 0.5;
    let cy = point_coord.1 - 0.5;
    let dist = (cx * cx + cy * cy).sqrt();
    if dist > 0.5 {
        return None;
    }

    let edge_glow = smoothstep(FOLIAGE_EDGE_OUTER, FOLIAGE_EDGE_INNER, dist);
    let core_glow = smoothstep(FOLIAGE_CORE_OUTER, 0.0, dist);

    let pulse = (uniforms.time * FOLIAGE_PULSE_FREQ + random_offset * FOLIAGE_BREATHE_PHASE).sin()
        * FOLIAGE_PULSE_AMP
        + FOLIAGE_PULSE_BASE;

    let height_factor = smoothstep(FOLIAGE_HEIGHT_LOW, FOLIAGE_HEIGHT_HIGH, world_position.y);

    let gold = Vec3::new(FOLIAGE_GOLD_TINT[0], FOLIAGE_GOLD_TINT[1], FOLIAGE_GOLD_TINT[2]);
    let tint = height_factor * FOLIAGE_HEIGHT_TINT + core_glow * FOLIAGE_CORE_TINT;
    let color = mix3(uniforms.base_color, gold, tint)
        + uniforms.glow_color.scale(core_glow * pulse * FOLIAGE_GLOW_MIX);

    Some([color.x, color.y, color.z, edge_glow * FOLIAGE_ALPHA])
}
