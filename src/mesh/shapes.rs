//! Procedural meshes for the ornament classes, topper and trunk

use std::f32::consts::{PI, TAU};

use super::geometry::{connect_rings, create_ring, Mesh, Vertex};
use crate::math::Vec3;

pub const STAR_POINTS: usize = 5;
pub const STAR_INNER_RADIUS: f32 = 0.4;
pub const TOPPER_INNER_RADIUS: f32 = 0.38;
pub const STAR_DEPTH: f32 = 0.1;
pub const TOPPER_DEPTH: f32 = 0.15;

pub const TRUNK_TOP_RADIUS: f32 = 0.3;
pub const TRUNK_BOTTOM_RADIUS: f32 = 0.4;
pub const TRUNK_HEIGHT: f32 = 1.5;
pub const TRUNK_CENTER_Y: f32 = -1.8;
pub const TRUNK_SEGMENTS: usize = 16;

/// Unit cube centered on the origin, one quad per face
pub fn unit_box() -> Mesh {
    let mut mesh = Mesh::new();
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::UP),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::UP),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::UP),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::UP),
        (Vec3::UP, Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    ];

    for (normal, v) in faces {
        // u x v == normal keeps the quad counter-clockwise from outside
        let u = v.cross(&normal);
        let center = normal.scale(0.5);
        let corner = |su: f32, sv: f32| {
            Vertex::new(center + u.scale(su * 0.5) + v.scale(sv * 0.5), normal)
        };
        let start = mesh.add_vertices([
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ]);
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }

    mesh
}

/// Unit sphere from latitude/longitude bands
pub fn uv_sphere(width_segments: usize, height_segments: usize) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = Mesh::new();

    for iy in 0..=height_segments {
        let theta = iy as f32 / height_segments as f32 * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        let row = (0..=width_segments).map(|ix| {
            let phi = ix as f32 / width_segments as f32 * TAU;
            let normal = Vec3::new(-phi.cos() * sin_t, cos_t, phi.sin() * sin_t);
            Vertex::new(normal, normal)
        });
        mesh.add_vertices(row);
    }

    let stride = (width_segments + 1) as u32;
    for iy in 0..height_segments as u32 {
        for ix in 0..width_segments as u32 {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            // Pole rows collapse to a point; skip the degenerate half
            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != height_segments as u32 - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}

/// Outline of a five-point star in the XY plane, outer radius 1, first
/// point at the bottom, counter-clockwise
pub fn star_outline(inner_radius: f32) -> Vec<(f32, f32)> {
    (0..STAR_POINTS * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { 1.0 } else { inner_radius };
            let angle = i as f32 * PI / STAR_POINTS as f32 - PI / 2.0;
            (angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

/// Star outline extruded along Z, centered on the origin
pub fn star_prism(inner_radius: f32, depth: f32) -> Mesh {
    let outline = star_outline(inner_radius);
    let n = outline.len() as u32;
    let front_z = depth * 0.5;
    let back_z = -depth * 0.5;
    let mut mesh = Mesh::new();

    // Caps: the star is star-shaped around its center, so a fan works
    for (z, normal) in [(front_z, Vec3::new(0.0, 0.0, 1.0)), (back_z, Vec3::new(0.0, 0.0, -1.0))] {
        let center = mesh.add_vertices([Vertex::new(Vec3::new(0.0, 0.0, z), normal)]);
        let rim = mesh.add_vertices(
            outline.iter().map(|&(x, y)| Vertex::new(Vec3::new(x, y, z), normal)),
        );
        for i in 0..n {
            let (p, q) = (rim + i, rim + (i + 1) % n);
            if normal.z > 0.0 {
                mesh.add_triangle(center, p, q);
            } else {
                mesh.add_triangle(center, q, p);
            }
        }
    }

    // Sides get their own vertices for flat normals
    for i in 0..outline.len() {
        let (x0, y0) = outline[i];
        let (x1, y1) = outline[(i + 1) % outline.len()];
        let normal = Vec3::new(y1 - y0, x0 - x1, 0.0).normalize();
        let start = mesh.add_vertices([
            Vertex::new(Vec3::new(x0, y0, back_z), normal),
            Vertex::new(Vec3::new(x1, y1, back_z), normal),
            Vertex::new(Vec3::new(x1, y1, front_z), normal),
            Vertex::new(Vec3::new(x0, y0, front_z), normal),
        ]);
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }

    mesh
}

/// Capped frustum centered on the origin
pub fn cylinder(top_radius: f32, bottom_radius: f32, height: f32, segments: usize) -> Mesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = (top_radius - bottom_radius) / height;
    let mut mesh = Mesh::new();

    let bottom = mesh.add_vertices(create_ring(-half, bottom_radius, segments, slope));
    let top = mesh.add_vertices(create_ring(half, top_radius, segments, slope));
    connect_rings(&mut mesh, bottom, top, segments);

    for (y, radius, normal) in [
        (half, top_radius, Vec3::UP),
        (-half, bottom_radius, Vec3::new(0.0, -1.0, 0.0)),
    ] {
        let center = mesh.add_vertices([Vertex::new(Vec3::new(0.0, y, 0.0), normal)]);
        let rim = mesh.add_vertices(
            create_ring(y, radius, segments, 0.0)
                .into_iter()
                .map(|v| Vertex::new(v.position, normal)),
        );
        for i in 0..segments as u32 {
            let next = (i + 1) % segments as u32;
            if normal.y > 0.0 {
                mesh.add_triangle(center, rim + next, rim + i);
            } else {
                mesh.add_triangle(center, rim + i, rim + next);
            }
        }
    }

    mesh
}

/// Trunk in world space, below the foliage cone
pub fn trunk() -> Mesh {
    let mut mesh = cylinder(TRUNK_TOP_RADIUS, TRUNK_BOTTOM_RADIUS, TRUNK_HEIGHT, TRUNK_SEGMENTS);
    mesh.translate(Vec3::new(0.0, TRUNK_CENTER_Y, 0.0));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(mesh: &Mesh) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count())
    }

    fn unit_normals(mesh: &Mesh) -> bool {
        mesh.vertices.iter().all(|v| (v.normal.length() - 1.0).abs() < 1e-4)
    }

    /// Face normal from winding agrees with the stored vertex normal
    fn outward_winding(mesh: &Mesh) -> bool {
        mesh.indices.chunks(3).all(|tri| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face = (b.position - a.position).cross(&(c.position - a.position));
            face.dot(&a.normal) > 0.0
        })
    }

    #[test]
    fn test_unit_box() {
        let mesh = unit_box();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(indices_in_range(&mesh));
        assert!(outward_winding(&mesh));
        let extent = mesh.extent();
        assert!((extent.x - 0.5).abs() < 1e-6 && (extent.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_uv_sphere_is_unit() {
        let mesh = uv_sphere(16, 12);
        assert_eq!(mesh.vertex_count(), 17 * 13);
        assert_eq!(mesh.triangle_count(), 16 * 12 * 2 - 2 * 16);
        assert!(indices_in_range(&mesh));
        assert!(unit_normals(&mesh));
        for v in &mesh.vertices {
            assert!((v.position.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_star_outline_alternates() {
        let outline = star_outline(STAR_INNER_RADIUS);
        assert_eq!(outline.len(), 10);
        for (i, (x, y)) in outline.iter().enumerate() {
            let r = (x * x + y * y).sqrt();
            let expected = if i % 2 == 0 { 1.0 } else { STAR_INNER_RADIUS };
            assert!((r - expected).abs() < 1e-5);
        }
        assert!(outline[0].1 < -0.99);
    }

    #[test]
    fn test_star_prism() {
        let mesh = star_prism(TOPPER_INNER_RADIUS, TOPPER_DEPTH);
        assert_eq!(mesh.triangle_count(), 10 * 2 + 10 * 2);
        assert!(indices_in_range(&mesh));
        assert!(unit_normals(&mesh));
        assert!(outward_winding(&mesh));
        assert!((mesh.extent().z - TOPPER_DEPTH / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_trunk_placement() {
        let mesh = trunk();
        assert!(indices_in_range(&mesh));
        assert!(outward_winding(&mesh));
        let ys = mesh.vertices.iter().map(|v| v.position.y);
        let (min, max) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        assert!((min - (TRUNK_CENTER_Y - TRUNK_HEIGHT / 2.0)).abs() < 1e-5);
        assert!((max - (TRUNK_CENTER_Y + TRUNK_HEIGHT / 2.0)).abs() < 1e-5);
    }
}
