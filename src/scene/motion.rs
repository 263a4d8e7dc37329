//! Per-frame motion for every entity class
//!
//! All functions are stateless: the pose is a pure function of the entity's
//! generation-time attributes, the morph progress and the elapsed time.
//! Progress is clamped on entry.

use super::entity::{Entity, EntityClass, Transform};
use crate::constants::*;
use crate::math::{hsl_to_rgb, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

/// One axis of floating motion: `wave(time * frequency + phase * phase_scale) * amplitude`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub wave: Wave,
    pub frequency: f32,
    pub phase_scale: f32,
    pub amplitude: f32,
}

impl Oscillator {
    pub const NONE: Oscillator = Oscillator::sin(0.0, 0.0, 0.0);

    pub const fn sin(frequency: f32, phase_scale: f32, amplitude: f32) -> Self {
        Self { wave: Wave::Sin, frequency, phase_scale, amplitude }
    }

    pub const fn cos(frequency: f32, phase_scale: f32, amplitude: f32) -> Self {
        Self { wave: Wave::Cos, frequency, phase_scale, amplitude }
    }

    pub fn sample(&self, time: f32, phase: f32) -> f32 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        let arg = time * self.frequency + phase * self.phase_scale;
        let v = match self.wave {
            Wave::Sin => arg.sin(),
            Wave::Cos => arg.cos(),
        };
        v * self.amplitude
    }
}

/// Floating motion of a class, one oscillator per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatProfile {
    pub x: Oscillator,
    pub y: Oscillator,
    pub z: Oscillator,
}

impl FloatProfile {
    pub fn offset(&self, time: f32, phase: f32, float_amount: f32) -> Vec3 {
        Vec3::new(
            self.x.sample(time, phase),
            self.y.sample(time, phase),
            self.z.sample(time, phase),
        )
        .scale(float_amount)
    }
}

// Heavier classes get the smaller coefficients
pub const GIFT_BOX_FLOAT: FloatProfile = FloatProfile {
    x: Oscillator::sin(0.3, 2.0, 0.3),
    y: Oscillator::sin(0.5, 1.0, 0.5),
    z: Oscillator::NONE,
};

pub const BAUBLE_FLOAT: FloatProfile = FloatProfile {
    x: Oscillator::cos(0.4, 1.0, 0.5),
    y: Oscillator::sin(0.7, 0.5, 0.8),
    z: Oscillator::sin(0.5, 1.5, 0.4),
};

pub const TINY_LIGHT_FLOAT: FloatProfile = FloatProfile {
    x: Oscillator::cos(0.8, 0.5, 0.7),
    y: Oscillator::sin(1.0, 0.3, 1.0),
    z: Oscillator::sin(0.6, 0.7, 0.6),
};

pub const STAR_FLOAT: FloatProfile = FloatProfile {
    x: Oscillator::cos(0.5, 0.6, 0.6),
    y: Oscillator::sin(0.9, 0.4, 0.9),
    z: Oscillator::NONE,
};

pub const TOPPER_FLOAT: FloatProfile = FloatProfile {
    x: Oscillator::cos(0.3, 0.0, 0.5),
    y: Oscillator::sin(0.5, 0.0, 1.0),
    z: Oscillator::NONE,
};

pub fn float_profile(class: EntityClass) -> FloatProfile {
    match class {
        EntityClass::GiftBox => GIFT_BOX_FLOAT,
        EntityClass::Bauble => BAUBLE_FLOAT,
        EntityClass::TinyLight => TINY_LIGHT_FLOAT,
        EntityClass::Star => STAR_FLOAT,
        EntityClass::TopperStar => TOPPER_FLOAT,
        // Foliage floats through its own shader-matched path
        EntityClass::Foliage => FloatProfile {
            x: Oscillator::NONE,
            y: Oscillator::NONE,
            z: Oscillator::NONE,
        },
    }
}

/// Residual floating amplitude. Exactly zero once the tree is assembled.
pub fn float_amount(progress: f32, weight: f32) -> f32 {
    (1.0 - progress.clamp(0.0, 1.0)) * weight
}

/// Straight-line blend between the two anchors
pub fn base_position(scatter: Vec3, tree: Vec3, progress: f32) -> Vec3 {
    scatter.lerp(&tree, progress.clamp(0.0, 1.0))
}

/// Pose of any ornament-like entity at `time` seconds
pub fn entity_transform(entity: &Entity, progress: f32, time: f32) -> Transform {
    let p = progress.clamp(0.0, 1.0);

    if entity.class == EntityClass::Foliage {
        let position = foliage_position(
            entity.scatter_position,
            entity.tree_position,
            entity.phase_offset,
            p,
            time,
        );
        return Transform::at(position, entity.scale);
    }

    let float = float_amount(p, entity.weight);
    let position = base_position(entity.scatter_position, entity.tree_position, p)
        + float_profile(entity.class).offset(time, entity.phase_offset, float);

    Transform {
        position,
        rotation: rotation(entity, p, time),
        scale: scale(entity, time),
        color: color(entity, time),
    }
}

fn rotation(entity: &Entity, p: f32, time: f32) -> Vec3 {
    let speed = entity.rotation_speed;
    match entity.class {
        EntityClass::GiftBox => Vec3::new(
            time * speed * (1.0 - p * GIFT_SPIN_SETTLE),
            time * speed * GIFT_SPIN_Y_RATIO,
            0.0,
        ),
        EntityClass::Star => Vec3::new(0.0, 0.0, time * speed),
        EntityClass::TopperStar => {
            let spin = TOPPER_SPIN_SETTLED + (1.0 - p) * TOPPER_SPIN_SCATTERED;
            Vec3::new(
                0.0,
                (time * TOPPER_WOBBLE_FREQ).sin() * TOPPER_WOBBLE_AMP * (1.0 - p),
                time * spin,
            )
        }
        _ => Vec3::ZERO,
    }
}

fn scale(entity: &Entity, time: f32) -> f32 {
    match entity.class {
        EntityClass::TinyLight => {
            entity.scale * (1.0 + (time * LIGHT_PULSE_FREQ + entity.phase_offset).sin() * LIGHT_PULSE_AMP)
        }
        EntityClass::TopperStar => {
            entity.scale + (time * TOPPER_SCALE_PULSE_FREQ).sin() * TOPPER_SCALE_PULSE_AMP
        }
        _ => entity.scale,
    }
}

fn color(entity: &Entity, time: f32) -> Option<Vec3> {
    match entity.class {
        EntityClass::TinyLight => Some(tiny_light_color(time, entity.phase_offset)),
        _ => None,
    }
}

/// Warm-gold shimmer: narrow hue swing, pulsing lightness
pub fn tiny_light_color(time: f32, phase: f32) -> Vec3 {
    let hue = LIGHT_HUE_BASE + (time * LIGHT_HUE_FREQ + phase).sin() * LIGHT_HUE_SWING;
    let lightness =
        LIGHT_LIGHTNESS_BASE + (time * LIGHT_LIGHTNESS_FREQ + phase).sin() * LIGHT_LIGHTNESS_SWING;
    hsl_to_rgb(hue, LIGHT_SATURATION, lightness)
}

/// CPU form of the foliage vertex motion. The GPU program evaluates the
/// same expression per vertex.
pub fn foliage_position(scatter: Vec3, tree: Vec3, random_offset: f32, progress: f32, time: f32) -> Vec3 {
    let p = progress.clamp(0.0, 1.0);
    let mut position = base_position(scatter, tree, p);

    let breathe = (time * FOLIAGE_BREATHE_FREQ + random_offset * FOLIAGE_BREATHE_PHASE).sin()
        * FOLIAGE_BREATHE_AMP;
    let float_y = (time * FOLIAGE_FLOAT_Y_FREQ + random_offset * FOLIAGE_FLOAT_Y_PHASE).sin()
        * FOLIAGE_FLOAT_Y_AMP;
    let movement = (1.0 - p) * FOLIAGE_SCATTER_MOVEMENT;

    position += Vec3::new(
        (time * FOLIAGE_DRIFT_X_FREQ + random_offset * FOLIAGE_DRIFT_X_PHASE).sin() * movement,
        float_y + breathe * (1.0 - p * FOLIAGE_BREATHE_TREE_DAMP),
        (time * FOLIAGE_DRIFT_Z_FREQ + random_offset * FOLIAGE_DRIFT_Z_PHASE).cos() * movement,
    );
    position
}

/// Trunk opacity fades in with the tree
pub fn trunk_opacity(progress: f32) -> f32 {
    progress.clamp(0.0, 1.0) * TRUNK_MAX_OPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(class: EntityClass, weight: f32) -> Entity {
        Entity {
            class,
            scatter_position: Vec3::new(9.0, -4.0, 11.5),
            tree_position: Vec3::new(1.2, 3.3, -0.8),
            scale: 0.2,
            weight,
            phase_offset: 7.0,
            rotation_speed: 0.6,
        }
    }

    const ORNAMENTS: [EntityClass; 5] = [
        EntityClass::GiftBox,
        EntityClass::Bauble,
        EntityClass::TinyLight,
        EntityClass::Star,
        EntityClass::TopperStar,
    ];

    #[test]
    fn test_float_amount_vanishes_when_assembled() {
        for weight in [0.01, 0.3, 0.8, 1.0] {
            assert_eq!(float_amount(1.0, weight), 0.0);
            assert_eq!(float_amount(0.0, weight), weight);
        }
    }

    #[test]
    fn test_assembled_ornaments_sit_on_tree() {
        for class in ORNAMENTS {
            let e = entity(class, 0.9);
            for t in [0.0, 1.3, 47.9, 300.0] {
                let pose = entity_transform(&e, 1.0, t);
                assert_eq!(pose.position, e.tree_position, "{} drifted", class.name());
            }
        }
    }

    #[test]
    fn test_heavier_entities_float_less() {
        let time = 2.1;
        let deviation = |weight: f32| {
            let e = entity(EntityClass::Bauble, weight);
            let pose = entity_transform(&e, 0.0, time);
            pose.position.distance(&e.scatter_position)
        };
        assert!(deviation(0.3) < deviation(0.9));
    }

    #[test]
    fn test_gift_box_spin_settles() {
        let e = entity(EntityClass::GiftBox, 0.4);
        let t = 10.0;
        let scattered = entity_transform(&e, 0.0, t).rotation;
        let assembled = entity_transform(&e, 1.0, t).rotation;
        assert!((scattered.x - t * 0.6).abs() < 1e-4);
        assert!((assembled.x - t * 0.6 * 0.2).abs() < 1e-4);
        assert_eq!(scattered.y, assembled.y);
    }

    #[test]
    fn test_only_spinning_classes_rotate() {
        assert_eq!(entity_transform(&entity(EntityClass::Bauble, 0.7), 0.3, 5.0).rotation, Vec3::ZERO);
        assert_eq!(entity_transform(&entity(EntityClass::TinyLight, 0.9), 0.3, 5.0).rotation, Vec3::ZERO);
        let star = entity_transform(&entity(EntityClass::Star, 0.9), 0.3, 5.0).rotation;
        assert!((star.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_tiny_lights_pulse() {
        let e = entity(EntityClass::TinyLight, 0.9);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..400 {
            let s = entity_transform(&e, 0.5, i as f32 * 0.01).scale;
            min = min.min(s);
            max = max.max(s);
        }
        assert!(min >= e.scale * 0.7 - 1e-5);
        assert!(max <= e.scale * 1.3 + 1e-5);
        assert!(max - min > e.scale * 0.3);
    }

    #[test]
    fn test_only_tiny_lights_recolor() {
        let light = entity_transform(&entity(EntityClass::TinyLight, 0.9), 0.5, 1.0);
        let color = light.color.unwrap();
        assert!(color.x >= color.z, "light should stay warm");
        for class in [EntityClass::GiftBox, EntityClass::Bauble, EntityClass::Star] {
            assert!(entity_transform(&entity(class, 0.5), 0.5, 1.0).color.is_none());
        }
    }

    #[test]
    fn test_topper_pulses_regardless_of_progress() {
        let e = entity(EntityClass::TopperStar, TOPPER_WEIGHT);
        let t = 0.7;
        let a = entity_transform(&e, 0.0, t).scale;
        let b = entity_transform(&e, 1.0, t).scale;
        assert_eq!(a, b);
        assert!((a - (0.2 + (t * 2.0).sin() * 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let e = entity(EntityClass::Star, 0.95);
        assert_eq!(entity_transform(&e, 1.4, 3.0), entity_transform(&e, 1.0, 3.0));
        assert_eq!(entity_transform(&e, -0.5, 3.0), entity_transform(&e, 0.0, 3.0));
    }

    #[test]
    fn test_foliage_keeps_breathing_on_tree() {
        let scatter = Vec3::new(10.0, 2.0, -3.0);
        let tree = Vec3::new(0.5, 2.0, 0.5);
        let at_tree = foliage_position(scatter, tree, 0.25, 1.0, 4.0);
        // Horizontal drift is gone, vertical breathing remains small
        assert!((at_tree.x - tree.x).abs() < 1e-6);
        assert!((at_tree.z - tree.z).abs() < 1e-6);
        assert!((at_tree.y - tree.y).abs() <= FOLIAGE_FLOAT_Y_AMP + FOLIAGE_BREATHE_AMP);
    }

    #[test]
    fn test_trunk_opacity() {
        assert_eq!(trunk_opacity(0.0), 0.0);
        assert!((trunk_opacity(1.0) - 0.9).abs() < 1e-6);
        assert!((trunk_opacity(2.0) - 0.9).abs() < 1e-6);
    }
}
