use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod engine;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scene;

use camera::OrbitCamera;
use config::TreeConfig;
use engine::TreeAnimation;
use mesh::shapes;
use render::{BatchId, Frame, RenderPipeline};
use scene::ornaments::{mesh_for_class, topper_glow_instance, trunk_instance};
use scene::{EntityClass, Material};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

/// Main engine state exposed to JavaScript
#[wasm_bindgen]
pub struct ChristmasTree {
    pipeline: RenderPipeline,
    camera: OrbitCamera,
    animation: TreeAnimation,
    /// One batch per ornament class, parallel to `Scene::ornaments`
    ornament_batches: Vec<BatchId>,
    topper_batch: BatchId,
    glow_batch: BatchId,
    trunk_batch: BatchId,
    /// Reused instance upload buffer
    scratch: Vec<f32>,
}

#[wasm_bindgen]
impl ChristmasTree {
    /// Create the scene with default settings
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<ChristmasTree, JsValue> {
        Self::build(canvas, TreeConfig::default())
    }

    /// Create the scene from a YAML configuration document
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<ChristmasTree, JsValue> {
        let config = TreeConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("loaded configuration (seed {:?})", config.seed);
        Self::build(canvas, config)
    }

    fn build(canvas: HtmlCanvasElement, config: TreeConfig) -> Result<ChristmasTree, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let mut pipeline = RenderPipeline::new(gl, width, height).map_err(|e| JsValue::from_str(&e))?;
        let animation = TreeAnimation::new(&config);
        let scene = animation.scene();

        pipeline
            .upload_foliage(&scene.foliage)
            .map_err(|e| JsValue::from_str(&e))?;

        let mut ornament_batches = Vec::with_capacity(scene.ornaments.len());
        for set in &scene.ornaments {
            let id = pipeline
                .add_batch(&mesh_for_class(set.class), set.len(), Material::for_class(set.class))
                .map_err(|e| JsValue::from_str(&e))?;
            ornament_batches.push(id);
        }

        let topper_batch = pipeline
            .add_batch(
                &mesh_for_class(EntityClass::TopperStar),
                1,
                Material::for_class(EntityClass::TopperStar),
            )
            .map_err(|e| JsValue::from_str(&e))?;
        let glow_batch = pipeline
            .add_batch(&shapes::uv_sphere(16, 16), 1, Material::topper_glow())
            .map_err(|e| JsValue::from_str(&e))?;
        let trunk_batch = pipeline
            .add_batch(&shapes::trunk(), 1, Material::trunk())
            .map_err(|e| JsValue::from_str(&e))?;

        let mut scratch = Vec::new();
        trunk_instance(&mut scratch);
        pipeline.update_instances(trunk_batch, &scratch);

        log::info!("christmas tree ready ({}x{})", width, height);

        Ok(Self {
            pipeline,
            camera: OrbitCamera::new(&config.camera),
            animation,
            ornament_batches,
            topper_batch,
            glow_batch,
            trunk_batch,
            scratch,
        })
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.animation.tick(dt);
        self.camera.update(dt);

        let progress = self.animation.progress();
        let time = self.animation.time();
        let scene = self.animation.scene();

        for (set, &id) in scene.ornaments.iter().zip(&self.ornament_batches) {
            set.write_instance_data(progress, time, &mut self.scratch);
            self.pipeline.update_instances(id, &self.scratch);
        }

        scene.topper.write_instance_data(progress, time, &mut self.scratch);
        self.pipeline.update_instances(self.topper_batch, &self.scratch);

        if let Some(topper) = scene.topper.entities.first() {
            topper_glow_instance(topper, progress, time, &mut self.scratch);
            self.pipeline.update_instances(self.glow_batch, &self.scratch);
        }

        self.pipeline
            .set_opacity(self.trunk_batch, self.animation.trunk_opacity());

        let frame = Frame {
            foliage: self.animation.foliage_uniforms(),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(self.pipeline.aspect()),
            camera_position: self.camera.position(),
            topper_position: self.animation.topper_position(),
        };
        self.pipeline.render(&frame);
    }

    /// Switch between scattered and tree shape. Returns false while a
    /// transition is still running.
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> bool {
        self.animation.request_toggle()
    }

    #[wasm_bindgen]
    pub fn is_transitioning(&self) -> bool {
        self.animation.morph().is_transitioning()
    }

    #[wasm_bindgen]
    pub fn is_tree_shape(&self) -> bool {
        self.animation.morph().is_tree_shape()
    }

    /// Current morph progress (0 = scattered, 1 = tree)
    #[wasm_bindgen]
    pub fn progress(&self) -> f32 {
        self.animation.progress()
    }

    /// Text for the toggle control
    #[wasm_bindgen]
    pub fn button_label(&self) -> String {
        self.animation.morph().button_label().to_string()
    }

    /// Orbit camera by a pointer drag in pixels
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    #[wasm_bindgen]
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.camera.auto_rotate = enabled;
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsValue> {
        self.pipeline
            .resize(width, height)
            .map_err(|e| JsValue::from_str(&e))
    }
}
