use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_cols(
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 0.0],
    );

    /// Affine matrix from three basis columns and a translation
    pub const fn from_cols(x: [f32; 3], y: [f32; 3], z: [f32; 3], w: [f32; 3]) -> Self {
        Self {
            data: [
                x[0], x[1], x[2], 0.0,
                y[0], y[1], y[2], 0.0,
                z[0], z[1], z[2], 0.0,
                w[0], w[1], w[2], 1.0,
            ],
        }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translation(offset: Vec3) -> Self {
        Self::from_cols([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], offset.to_array())
    }

    pub fn uniform_scale(s: f32) -> Self {
        Self::from_cols([s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s], [0.0; 3])
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c], [0.0; 3])
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c], [0.0; 3])
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0], [0.0; 3])
    }

    /// Rotation from intrinsic XYZ Euler angles (`Rx * Ry * Rz`)
    pub fn rotation_euler(angles: Vec3) -> Self {
        Self::rotation_x(angles.x)
            .mul(&Self::rotation_y(angles.y))
            .mul(&Self::rotation_z(angles.z))
    }

    /// Translate * rotate * uniform scale, the per-instance ornament matrix
    pub fn from_trs(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        let mut m = Self::rotation_euler(rotation);
        for v in &mut m.data[..12] {
            *v *= scale;
        }
        m.data[12..15].copy_from_slice(&position.to_array());
        m
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// `self * other`
    pub fn mul(&self, other: &Mat4) -> Self {
        let a = &self.data;
        let b = &other.data;
        Self {
            data: std::array::from_fn(|i| {
                let (row, col) = (i % 4, i / 4);
                (0..4).map(|k| a[row + k * 4] * b[k + col * 4]).sum()
            }),
        }
    }

    /// Apply to a point (w = 1)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.data;
        let axis = |r: usize| m[r] * p.x + m[r + 4] * p.y + m[r + 8] * p.z + m[r + 12];
        Vec3::new(axis(0), axis(1), axis(2))
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.distance(&b) < 0.0001, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let m = Mat4::rotation_z(std::f32::consts::FRAC_PI_2);
        assert_close(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::UP);
    }

    #[test]
    fn test_euler_zero_is_identity() {
        assert_close(
            Mat4::rotation_euler(Vec3::ZERO).transform_point(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, 2.0, 3.0),
        );
    }

    #[test]
    fn test_trs_applies_scale_then_translation() {
        let m = Mat4::from_trs(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 2.0);
        assert_close(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(3.0, 2.0, 3.0));
    }

    #[test]
    fn test_trs_rotates_about_instance_origin() {
        let m = Mat4::from_trs(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
            1.0,
        );
        assert_close(m.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 6.0, 0.0));
    }

    #[test]
    fn test_trs_matches_composed_product() {
        let position = Vec3::new(0.5, -1.0, 2.0);
        let rotation = Vec3::new(0.3, 1.1, -0.7);
        let direct = Mat4::from_trs(position, rotation, 0.4);
        let composed = Mat4::translation(position)
            .mul(&Mat4::rotation_euler(rotation))
            .mul(&Mat4::uniform_scale(0.4));
        for (a, b) in direct.data.iter().zip(composed.data.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_look_at_maps_target_onto_negative_z() {
        let eye = Vec3::new(0.0, 4.0, 20.0);
        let view = Mat4::look_at(eye, Vec3::new(0.0, 4.0, 0.0), Vec3::UP);
        let p = view.transform_point(Vec3::new(0.0, 4.0, 0.0));
        assert_close(p, Vec3::new(0.0, 0.0, -20.0));
    }
}
