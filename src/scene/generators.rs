//! Scatter and tree placement
//!
//! Every function draws from the caller's RNG and nothing else, so a seeded
//! RNG reproduces the same layout.

use std::f32::consts::TAU;

use rand::Rng;

use super::entity::{Entity, EntityClass};
use crate::config::{OrnamentConfig, Span};
use crate::constants::*;
use crate::math::Vec3;

/// Spherical shell the scattered cloud is drawn from
#[derive(Debug, Clone, Copy)]
pub struct ShellParams {
    pub radius_min: f32,
    pub radius_spread: f32,
    /// Lifts the cloud above the origin
    pub y_offset: f32,
}

impl ShellParams {
    pub fn foliage() -> Self {
        Self {
            radius_min: FOLIAGE_SCATTER_RADIUS_MIN,
            radius_spread: FOLIAGE_SCATTER_RADIUS_SPREAD,
            y_offset: FOLIAGE_SCATTER_Y_OFFSET,
        }
    }

    /// Heavier ornaments reach further out
    pub fn ornament(weight: f32) -> Self {
        Self {
            radius_min: ORNAMENT_SCATTER_RADIUS_MIN,
            radius_spread: ORNAMENT_SCATTER_RADIUS_SPREAD * weight,
            y_offset: ORNAMENT_SCATTER_Y_OFFSET,
        }
    }
}

/// Cone approximating the tree silhouette
#[derive(Debug, Clone, Copy)]
pub struct ConeParams {
    pub height: f32,
    pub base_y: f32,
    pub base_radius: f32,
    /// Fraction of the radius lost at the top
    pub taper: f32,
    /// Exponent on the height draw (smaller favours the tip)
    pub height_bias: f32,
    /// Fraction of the local radius; `[0, 1]` fills the volume,
    /// `[0.7, 1]` hugs the surface
    pub radial: Span,
}

impl ConeParams {
    pub fn foliage() -> Self {
        Self {
            height: FOLIAGE_TREE_HEIGHT,
            base_y: FOLIAGE_TREE_BASE,
            base_radius: FOLIAGE_CONE_RADIUS,
            taper: CONE_TAPER,
            height_bias: 1.0,
            radial: Span::new(0.0, 1.0),
        }
    }

    pub fn ornament(height_bias: f32) -> Self {
        Self {
            height: ORNAMENT_TREE_HEIGHT,
            base_y: ORNAMENT_TREE_BASE,
            base_radius: ORNAMENT_CONE_RADIUS,
            taper: CONE_TAPER,
            height_bias,
            radial: Span::new(SURFACE_RADIAL_MIN, 1.0),
        }
    }

    /// Cone radius at a normalized height
    pub fn radius_at(&self, height_ratio: f32) -> f32 {
        self.base_radius * (1.0 - height_ratio * self.taper)
    }
}

/// Uniform direction on the sphere, radius drawn from the shell
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R, shell: &ShellParams) -> Vec3 {
    let radius = shell.radius_min + rng.gen::<f32>() * shell.radius_spread;
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin() + shell.y_offset,
        radius * phi.cos(),
    )
}

/// Point on or inside the tree cone
pub fn tree_position<R: Rng + ?Sized>(rng: &mut R, cone: &ConeParams) -> Vec3 {
    let height_ratio = rng.gen::<f32>().powf(cone.height_bias);
    let y = height_ratio * cone.height + cone.base_y;
    let angle = rng.gen::<f32>() * TAU;
    let radius = cone.radius_at(height_ratio) * cone.radial.sample(rng);

    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Draw one ornament. The index becomes the phase offset.
pub fn generate_ornament<R: Rng + ?Sized>(
    rng: &mut R,
    class: EntityClass,
    index: usize,
    config: &OrnamentConfig,
) -> Entity {
    let weight = config.weight.sample(rng);
    let scatter_position = scatter_position(rng, &ShellParams::ornament(weight));
    let tree_position = tree_position(rng, &ConeParams::ornament(config.height_bias));
    let scale = config.scale.sample(rng);
    let rotation_speed = config.rotation_speed.sample(rng);

    Entity {
        class,
        scatter_position,
        tree_position,
        scale,
        weight,
        phase_offset: index as f32,
        rotation_speed,
    }
}

/// The star on top: scattered somewhere in a box above the scene, assembled
/// onto the tip of the cone
pub fn generate_topper<R: Rng + ?Sized>(rng: &mut R) -> Entity {
    let scatter_position = Vec3::new(
        (rng.gen::<f32>() - 0.5) * TOPPER_SCATTER_SPAN,
        TOPPER_SCATTER_Y_MIN + rng.gen::<f32>() * TOPPER_SCATTER_Y_SPREAD,
        (rng.gen::<f32>() - 0.5) * TOPPER_SCATTER_SPAN,
    );

    Entity {
        class: EntityClass::TopperStar,
        scatter_position,
        tree_position: Vec3::new(
            TOPPER_TREE_POSITION[0],
            TOPPER_TREE_POSITION[1],
            TOPPER_TREE_POSITION[2],
        ),
        scale: TOPPER_SCALE,
        weight: TOPPER_WEIGHT,
        phase_offset: 0.0,
        rotation_speed: TOPPER_SPIN_SETTLED,
    }
}
