use crate::math::{Mat4, Vec3};

/// Kind of scene entity. Classes are independent sets with their own
/// placement and motion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Foliage,
    GiftBox,
    Bauble,
    TinyLight,
    Star,
    TopperStar,
}

impl EntityClass {
    pub fn name(self) -> &'static str {
        match self {
            EntityClass::Foliage => "foliage",
            EntityClass::GiftBox => "gift box",
            EntityClass::Bauble => "bauble",
            EntityClass::TinyLight => "tiny light",
            EntityClass::Star => "star",
            EntityClass::TopperStar => "topper star",
        }
    }
}

/// Generation-time attributes of one particle or ornament. Never mutated
/// after construction; only the derived [`Transform`] changes per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub class: EntityClass,
    pub scatter_position: Vec3,
    pub tree_position: Vec3,
    pub scale: f32,
    /// Inertia proxy in (0, 1]. Scales the floating motion while scattered.
    pub weight: f32,
    /// Fixed per-entity phase that desynchronizes periodic motion
    pub phase_offset: f32,
    pub rotation_speed: f32,
}

/// Per-frame pose of an entity, recomputed from scratch every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
    pub scale: f32,
    /// Only set for classes that recolor every frame
    pub color: Option<Vec3>,
}

impl Transform {
    pub fn at(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale,
            color: None,
        }
    }

    /// Instance model matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_trs(self.position, self.rotation, self.scale)
    }
}
