use crate::math::Vec3;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Convert to flat array for WebGL buffer
    /// Layout: position(3) + normal(3) = 6 floats
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = v.position + offset;
        }
    }

    /// Get vertex buffer data as flat f32 array
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Half extents of the axis-aligned bounds around the origin
    pub fn extent(&self) -> Vec3 {
        self.vertices.iter().fold(Vec3::ZERO, |acc, v| {
            Vec3::new(
                acc.x.max(v.position.x.abs()),
                acc.y.max(v.position.y.abs()),
                acc.z.max(v.position.z.abs()),
            )
        })
    }
}

/// Horizontal ring of vertices around the Y axis. Normals point outward,
/// tilted by `slope` (radius change per unit height, negative for a taper).
pub fn create_ring(y: f32, radius: f32, segments: usize, slope: f32) -> Vec<Vertex> {
    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let (sin_a, cos_a) = angle.sin_cos();
            let position = Vec3::new(cos_a * radius, y, sin_a * radius);
            let normal = Vec3::new(cos_a, -slope, sin_a).normalize();
            Vertex::new(position, normal)
        })
        .collect()
}

/// Connect two rings with triangles
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::UP);
        let arr = v.to_array();
        assert_eq!(arr, [1.0, 2.0, 3.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_create_ring() {
        let ring = create_ring(0.5, 1.0, 8, 0.0);
        assert_eq!(ring.len(), 8);
        for v in &ring {
            let dist = (v.position.x.powi(2) + v.position.z.powi(2)).sqrt();
            assert!((dist - 1.0).abs() < 0.001);
            assert_eq!(v.position.y, 0.5);
            assert!(v.normal.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_connect_rings() {
        let mut mesh = Mesh::new();
        let start1 = mesh.add_vertices(create_ring(0.0, 1.0, 4, 0.0));
        let start2 = mesh.add_vertices(create_ring(1.0, 0.8, 4, 0.0));
        connect_rings(&mut mesh, start1, start2, 4);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_translate_and_extent() {
        let mut mesh = Mesh::new();
        mesh.add_vertices(create_ring(0.0, 2.0, 16, 0.0));
        mesh.translate(Vec3::new(0.0, -1.0, 0.0));
        let extent = mesh.extent();
        assert!((extent.x - 2.0).abs() < 1e-5);
        assert_eq!(extent.y, 1.0);
    }
}
