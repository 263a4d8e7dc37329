use rand::Rng;

use super::entity::{Entity, EntityClass};
use super::generators::{generate_ornament, generate_topper};
use super::motion::entity_transform;
use crate::config::OrnamentConfig;
use crate::constants::TOPPER_GLOW_SCALE;
use crate::math::{parse_hex_color, Mat4, Vec3};
use crate::mesh::{shapes, Mesh};

/// Floats per instance: model matrix(16) + color(3)
pub const INSTANCE_STRIDE: usize = 19;

pub const TOPPER_COLOR: &str = "#FFD700";
pub const TOPPER_GLOW_COLOR: &str = "#FFFACD";
pub const TRUNK_COLOR: &str = "#3d2817";

/// Surface response of an instanced batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub metalness: f32,
    pub roughness: f32,
    /// Emissive term is the instance color times this
    pub emissive: f32,
    /// Skip lighting entirely
    pub unlit: bool,
    pub opacity: f32,
}

impl Material {
    pub const fn lit(metalness: f32, roughness: f32, emissive: f32) -> Self {
        Self { metalness, roughness, emissive, unlit: false, opacity: 1.0 }
    }

    pub const fn unlit(opacity: f32) -> Self {
        Self { metalness: 0.0, roughness: 1.0, emissive: 0.0, unlit: true, opacity }
    }

    pub fn for_class(class: EntityClass) -> Self {
        match class {
            EntityClass::GiftBox => Self::lit(0.3, 0.4, 0.0),
            EntityClass::Bauble => Self::lit(0.95, 0.05, 0.0),
            EntityClass::TinyLight => Self::unlit(1.0),
            EntityClass::Star => Self::lit(0.9, 0.1, 0.5),
            EntityClass::TopperStar => Self::lit(0.95, 0.05, 1.5),
            EntityClass::Foliage => Self::unlit(1.0),
        }
    }

    pub const fn trunk() -> Self {
        Self::lit(0.1, 0.9, 0.0)
    }

    pub const fn topper_glow() -> Self {
        Self::unlit(0.8)
    }
}

/// Mesh shared by every instance of a class
pub fn mesh_for_class(class: EntityClass) -> Mesh {
    match class {
        EntityClass::GiftBox => shapes::unit_box(),
        EntityClass::Bauble => shapes::uv_sphere(32, 32),
        EntityClass::TinyLight => shapes::uv_sphere(8, 8),
        EntityClass::Star => shapes::star_prism(shapes::STAR_INNER_RADIUS, shapes::STAR_DEPTH),
        EntityClass::TopperStar => {
            shapes::star_prism(shapes::TOPPER_INNER_RADIUS, shapes::TOPPER_DEPTH)
        }
        EntityClass::Foliage => Mesh::new(),
    }
}

/// All entities of one ornament class plus the colors they cycle through
#[derive(Debug, Clone)]
pub struct OrnamentSet {
    pub class: EntityClass,
    pub entities: Vec<Entity>,
    pub palette: Vec<Vec3>,
}

impl OrnamentSet {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, class: EntityClass, config: &OrnamentConfig) -> Self {
        let entities = (0..config.count)
            .map(|i| generate_ornament(rng, class, i, config))
            .collect();

        Self {
            class,
            entities,
            palette: config.palette_colors(),
        }
    }

    pub fn topper<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            class: EntityClass::TopperStar,
            entities: vec![generate_topper(rng)],
            palette: parse_hex_color(TOPPER_COLOR).into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Fixed color of the instance at `index`; white without a palette
    pub fn palette_color(&self, index: usize) -> Vec3 {
        if self.palette.is_empty() {
            Vec3::ONE
        } else {
            self.palette[index % self.palette.len()]
        }
    }

    /// Refill `out` with this frame's instance data, see [`INSTANCE_STRIDE`]
    pub fn write_instance_data(&self, progress: f32, time: f32, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.len() * INSTANCE_STRIDE);

        for (i, entity) in self.entities.iter().enumerate() {
            let transform = entity_transform(entity, progress, time);
            let color = transform.color.unwrap_or_else(|| self.palette_color(i));
            push_instance(out, &transform.matrix(), color);
        }
    }
}

/// Instance for the glow sphere nested inside the topper star
pub fn topper_glow_instance(topper: &Entity, progress: f32, time: f32, out: &mut Vec<f32>) {
    out.clear();
    let transform = entity_transform(topper, progress, time);
    let matrix = transform
        .matrix()
        .mul(&Mat4::uniform_scale(TOPPER_GLOW_SCALE));
    let color = parse_hex_color(TOPPER_GLOW_COLOR).unwrap_or(Vec3::ONE);
    push_instance(out, &matrix, color);
}

/// The trunk mesh is built in world space, so its single instance is unmoved
pub fn trunk_instance(out: &mut Vec<f32>) {
    out.clear();
    let color = parse_hex_color(TRUNK_COLOR).unwrap_or_default();
    push_instance(out, &Mat4::identity(), color);
}

fn push_instance(out: &mut Vec<f32>, matrix: &Mat4, color: Vec3) {
    out.extend_from_slice(matrix.as_slice());
    out.extend_from_slice(&color.to_array());
}
