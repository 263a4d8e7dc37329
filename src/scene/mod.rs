//! Scene content: the foliage cloud, the ornament classes and the topper.
//!
//! Everything here is generated once from a [`TreeConfig`] and an RNG and
//! never mutated afterwards. Per-frame poses come from [`motion`].

pub mod entity;
pub mod foliage;
pub mod generators;
pub mod motion;
pub mod ornaments;

use rand::Rng;

pub use entity::{Entity, EntityClass, Transform};
pub use foliage::{FoliageCloud, FoliageUniforms};
pub use ornaments::{Material, OrnamentSet, INSTANCE_STRIDE};

use crate::config::TreeConfig;

pub struct Scene {
    pub foliage: FoliageCloud,
    /// Gift boxes, baubles, tiny lights and stars, in that order
    pub ornaments: Vec<OrnamentSet>,
    pub topper: OrnamentSet,
}

impl Scene {
    pub fn generate<R: Rng + ?Sized>(config: &TreeConfig, rng: &mut R) -> Self {
        let foliage = FoliageCloud::new(config.foliage.count, rng);

        let classes = [
            (EntityClass::GiftBox, &config.gift_boxes),
            (EntityClass::Bauble, &config.baubles),
            (EntityClass::TinyLight, &config.tiny_lights),
            (EntityClass::Star, &config.stars),
        ];
        let ornaments = classes
            .into_iter()
            .map(|(class, cfg)| OrnamentSet::generate(rng, class, cfg))
            .collect();

        let topper = OrnamentSet::topper(rng);

        Self { foliage, ornaments, topper }
    }

    pub fn entity_count(&self) -> usize {
        self.foliage.len() + self.ornaments.iter().map(OrnamentSet::len).sum::<usize>() + self.topper.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_scene_counts() {
        let config = TreeConfig::default();
        let scene = Scene::generate(&config, &mut StdRng::seed_from_u64(3));

        assert_eq!(scene.foliage.len(), 8000);
        let counts: Vec<usize> = scene.ornaments.iter().map(|s| s.len()).collect();
        assert_eq!(counts, vec![18, 50, 100, 30]);
        assert_eq!(scene.topper.len(), 1);
        assert_eq!(scene.entity_count(), 8000 + 198 + 1);
    }

    #[test]
    fn test_seeded_scene_is_reproducible() {
        let config = TreeConfig::default();
        let a = Scene::generate(&config, &mut StdRng::seed_from_u64(8));
        let b = Scene::generate(&config, &mut StdRng::seed_from_u64(8));
        assert_eq!(a.foliage.tree, b.foliage.tree);
        assert_eq!(a.ornaments[1].entities, b.ornaments[1].entities);
        assert_eq!(a.topper.entities, b.topper.entities);
    }
}
