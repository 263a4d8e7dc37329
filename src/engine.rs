//! Host-side animation core
//!
//! Owns the generated scene, the morph state and the clock. The WASM front
//! end wraps this with a GL pipeline and a camera; everything here runs
//! without a browser.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{MorphState, ProgressAnimator};
use crate::config::TreeConfig;
use crate::math::Vec3;
use crate::scene::motion::{entity_transform, trunk_opacity};
use crate::scene::{FoliageUniforms, Scene};

pub struct TreeAnimation {
    scene: Scene,
    morph: MorphState,
    animator: ProgressAnimator,
    time: f32,
    base_color: Vec3,
    glow_color: Vec3,
}

impl TreeAnimation {
    /// Generate a scene from `config`, seeded when the config carries a seed
    pub fn new(config: &TreeConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(config: &TreeConfig, rng: &mut R) -> Self {
        let scene = Scene::generate(config, rng);
        log::info!(
            "generated scene: {} foliage particles, {} entities total",
            scene.foliage.len(),
            scene.entity_count()
        );

        Self {
            scene,
            morph: MorphState::new(),
            animator: ProgressAnimator::new(config.transition_speed),
            time: 0.0,
            base_color: config.foliage_base_color(),
            glow_color: config.foliage_glow_color(),
        }
    }

    /// Advance the clock and the morph. Returns true when a transition
    /// settled on this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;

        let settled = self.animator.tick(&mut self.morph, dt);
        if settled {
            log::debug!("morph settled at progress {}", self.morph.progress());
        }
        settled
    }

    /// Flip between scattered and tree shape. Refused while a transition
    /// is still running.
    pub fn request_toggle(&mut self) -> bool {
        if self.morph.is_transitioning() {
            log::warn!(
                "toggle ignored: transition in progress (progress {:.3})",
                self.morph.progress()
            );
            return false;
        }

        self.morph.toggle();
        log::info!("morphing to {:?}", self.morph.mode());
        true
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn morph(&self) -> &MorphState {
        &self.morph
    }

    pub fn progress(&self) -> f32 {
        self.morph.progress()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn foliage_uniforms(&self) -> FoliageUniforms {
        FoliageUniforms {
            time: self.time,
            progress: self.morph.progress(),
            base_color: self.base_color,
            glow_color: self.glow_color,
        }
    }

    /// Current world position of the topper star, the source of the point light
    pub fn topper_position(&self) -> Vec3 {
        self.scene
            .topper
            .entities
            .first()
            .map(|topper| entity_transform(topper, self.morph.progress(), self.time).position)
            .unwrap_or(Vec3::ZERO)
    }

    pub fn trunk_opacity(&self) -> f32 {
        trunk_opacity(self.morph.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::MorphMode;

    fn small_config() -> TreeConfig {
        let mut config = TreeConfig::default();
        config.seed = Some(11);
        config.foliage.count = 64;
        config
    }

    #[test]
    fn test_starts_scattered_at_rest() {
        let anim = TreeAnimation::new(&small_config());
        assert_eq!(anim.morph().mode(), MorphMode::Scattered);
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.time(), 0.0);
        assert_eq!(anim.scene().foliage.len(), 64);
    }

    #[test]
    fn test_toggle_refused_while_transitioning() {
        let mut anim = TreeAnimation::new(&small_config());
        assert!(anim.request_toggle());
        anim.tick(0.016);
        assert!(!anim.request_toggle());
        assert_eq!(anim.morph().mode(), MorphMode::TreeShape);
    }

    #[test]
    fn test_toggle_accepted_after_settle() {
        let mut anim = TreeAnimation::new(&small_config());
        anim.request_toggle();
        let mut settled = false;
        for _ in 0..1000 {
            if anim.tick(0.05) {
                settled = true;
                break;
            }
        }
        assert!(settled);
        assert_eq!(anim.progress(), 1.0);
        assert!(anim.request_toggle());
        assert_eq!(anim.morph().mode(), MorphMode::Scattered);
    }

    #[test]
    fn test_negative_and_nan_dt_do_not_rewind() {
        let mut anim = TreeAnimation::new(&small_config());
        anim.tick(0.5);
        anim.tick(-3.0);
        anim.tick(f32::NAN);
        assert_eq!(anim.time(), 0.5);
    }

    #[test]
    fn test_uniforms_follow_state() {
        let mut anim = TreeAnimation::new(&small_config());
        anim.request_toggle();
        anim.tick(0.1);
        let u = anim.foliage_uniforms();
        assert_eq!(u.time, anim.time());
        assert_eq!(u.progress, anim.progress());
        assert!(u.progress > 0.0);
    }

    #[test]
    fn test_trunk_hidden_while_scattered() {
        let anim = TreeAnimation::new(&small_config());
        assert_eq!(anim.trunk_opacity(), 0.0);
    }

    #[test]
    fn test_topper_rises_to_tip() {
        let mut anim = TreeAnimation::new(&small_config());
        anim.request_toggle();
        while anim.morph().is_transitioning() {
            anim.tick(0.05);
        }
        let tip = anim.scene().topper.entities[0].tree_position;
        assert!(anim.topper_position().distance(&tip) < 0.2);
    }
}
