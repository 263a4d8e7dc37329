//! Browser tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use christmas_tree_morph::ChristmasTree;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(240);
    canvas
}

#[wasm_bindgen_test]
fn test_toggle_round_trip_in_browser() {
    let mut tree = ChristmasTree::with_config(canvas(), "seed: 1\nfoliage:\n  count: 200\n").unwrap();
    assert_eq!(tree.button_label(), "Assemble");
    assert!(tree.toggle());
    assert!(!tree.toggle());

    while tree.is_transitioning() {
        tree.render(0.05);
    }
    assert!(tree.is_tree_shape());
    assert_eq!(tree.progress(), 1.0);
    assert_eq!(tree.button_label(), "Scatter");

    tree.resize(640, 480).unwrap();
    tree.render(0.016);
}

#[wasm_bindgen_test]
fn test_bad_config_is_rejected() {
    assert!(ChristmasTree::with_config(canvas(), "transition_speed: -1").is_err());
}
