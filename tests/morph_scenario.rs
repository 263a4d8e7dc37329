//! End-to-end morph runs through the engine core

use christmas_tree_morph::animation::MorphMode;
use christmas_tree_morph::config::TreeConfig;
use christmas_tree_morph::engine::TreeAnimation;
use christmas_tree_morph::scene::motion::{entity_transform, float_amount};

fn animation(seed: u64) -> TreeAnimation {
    let mut config = TreeConfig::default();
    config.seed = Some(seed);
    config.foliage.count = 256;
    TreeAnimation::new(&config)
}

#[test]
fn test_assemble_from_scattered() {
    let mut anim = animation(1);
    assert!(anim.request_toggle());
    assert_eq!(anim.morph().mode(), MorphMode::TreeShape);

    let mut prev = anim.progress();
    for tick in 0..200 {
        anim.tick(0.016);
        assert!(anim.progress() > prev, "tick {}: {} -> {}", tick, prev, anim.progress());
        prev = anim.progress();
    }

    let mut ticks = 200;
    while anim.morph().is_transitioning() {
        anim.tick(0.016);
        ticks += 1;
        assert!(ticks < 2000, "no convergence");
    }

    assert_eq!(anim.progress(), 1.0);
    assert!(!anim.morph().is_transitioning());
    assert_eq!(anim.morph().button_label(), "Scatter");
}

#[test]
fn test_assembled_ornaments_sit_on_tree() {
    let mut anim = animation(2);
    anim.request_toggle();
    while anim.morph().is_transitioning() {
        anim.tick(0.05);
    }

    let scene = anim.scene();
    for set in &scene.ornaments {
        for entity in &set.entities {
            assert_eq!(float_amount(anim.progress(), entity.weight), 0.0);
            let transform = entity_transform(entity, anim.progress(), anim.time());
            assert!(
                transform.position.distance(&entity.tree_position) < 1e-4,
                "{} drifted off the tree",
                entity.class.name()
            );
        }
    }
}

#[test]
fn test_round_trip_returns_to_scatter() {
    let mut anim = animation(3);
    anim.request_toggle();
    while anim.morph().is_transitioning() {
        anim.tick(0.016);
    }
    assert!(anim.request_toggle());
    assert_eq!(anim.morph().button_label(), "Assemble");

    let mut prev = anim.progress();
    while anim.morph().is_transitioning() {
        anim.tick(0.016);
        assert!(anim.progress() <= prev);
        prev = anim.progress();
    }
    assert_eq!(anim.progress(), 0.0);
    assert_eq!(anim.morph().mode(), MorphMode::Scattered);
}

#[test]
fn test_second_toggle_mid_flight_is_refused() {
    let mut anim = animation(4);
    assert!(anim.request_toggle());
    for _ in 0..30 {
        anim.tick(0.016);
    }
    let progress = anim.progress();
    assert!(!anim.request_toggle());
    assert_eq!(anim.morph().mode(), MorphMode::TreeShape);
    assert_eq!(anim.progress(), progress);
}

#[test]
fn test_seeded_runs_match() {
    let mut a = animation(9);
    let mut b = animation(9);
    a.request_toggle();
    b.request_toggle();
    for _ in 0..50 {
        a.tick(0.02);
        b.tick(0.02);
    }
    assert_eq!(a.progress(), b.progress());
    assert_eq!(a.topper_position(), b.topper_position());
}
