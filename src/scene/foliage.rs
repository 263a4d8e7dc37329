use rand::Rng;

use super::generators::{scatter_position, tree_position, ConeParams, ShellParams};
use super::motion::foliage_position;
use crate::math::Vec3;

/// Floats per particle in the vertex buffer:
/// scatter(3) + tree(3) + random offset(1)
pub const FOLIAGE_STRIDE: usize = 7;

/// The foliage particle cloud. Positions are generated once and uploaded as
/// static vertex data; all per-frame motion happens in the vertex shader.
#[derive(Debug, Clone, Default)]
pub struct FoliageCloud {
    pub scatter: Vec<Vec3>,
    pub tree: Vec<Vec3>,
    /// Per-particle phase in [0, 1)
    pub random_offset: Vec<f32>,
}

impl FoliageCloud {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let shell = ShellParams::foliage();
        let cone = ConeParams::foliage();

        let mut cloud = Self {
            scatter: Vec::with_capacity(count),
            tree: Vec::with_capacity(count),
            random_offset: Vec::with_capacity(count),
        };

        for _ in 0..count {
            cloud.scatter.push(scatter_position(rng, &shell));
            cloud.tree.push(tree_position(rng, &cone));
            cloud.random_offset.push(rng.gen::<f32>());
        }

        cloud
    }

    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }

    /// Interleaved vertex data, see [`FOLIAGE_STRIDE`]
    pub fn vertex_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.len() * FOLIAGE_STRIDE);
        for i in 0..self.len() {
            data.extend_from_slice(&self.scatter[i].to_array());
            data.extend_from_slice(&self.tree[i].to_array());
            data.push(self.random_offset[i]);
        }
        data
    }

    /// World position of one particle, evaluated on the CPU
    pub fn position(&self, index: usize, progress: f32, time: f32) -> Vec3 {
        foliage_position(
            self.scatter[index],
            self.tree[index],
            self.random_offset[index],
            progress,
            time,
        )
    }
}

/// Per-frame uniform block for the foliage program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageUniforms {
    pub time: f32,
    pub progress: f32,
    pub base_color: Vec3,
    pub glow_color: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_cloud_layout() {
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = FoliageCloud::new(500, &mut rng);
        assert_eq!(cloud.len(), 500);

        let data = cloud.vertex_data();
        assert_eq!(data.len(), 500 * FOLIAGE_STRIDE);

        let i = 123;
        let row = &data[i * FOLIAGE_STRIDE..(i + 1) * FOLIAGE_STRIDE];
        assert_eq!(&row[0..3], &cloud.scatter[i].to_array());
        assert_eq!(&row[3..6], &cloud.tree[i].to_array());
        assert_eq!(row[6], cloud.random_offset[i]);
    }

    #[test]
    fn test_random_offsets_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let cloud = FoliageCloud::new(2000, &mut rng);
        assert!(cloud.random_offset.iter().all(|r| (0.0..1.0).contains(r)));
    }

    #[test]
    fn test_empty_cloud() {
        let mut rng = StdRng::seed_from_u64(0);
        let cloud = FoliageCloud::new(0, &mut rng);
        assert!(cloud.is_empty());
        assert!(cloud.vertex_data().is_empty());
    }
}
