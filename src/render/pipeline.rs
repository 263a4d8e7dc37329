use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlFramebuffer, WebGlProgram, WebGlRenderbuffer,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::shaders::*;
use super::webgl::{BlendMode, WebGLContext};
use crate::constants::*;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;
use crate::scene::foliage::FOLIAGE_STRIDE;
use crate::scene::{FoliageCloud, FoliageUniforms, Material, INSTANCE_STRIDE};

const BYTES: i32 = 4;
/// Mesh vertex layout: position(3) + normal(3)
const MESH_STRIDE: i32 = 6 * BYTES;
/// Luminance band above the threshold over which bloom fades in
const BLOOM_SMOOTHING: f32 = 0.9;

/// Cached uniform locations for the foliage program
struct FoliageLocations {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
    base_color: Option<WebGlUniformLocation>,
    glow_color: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the instanced mesh program
struct MeshLocations {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    topper_pos: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    unlit: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for post-processing
struct PostLocations {
    extract_texture: Option<WebGlUniformLocation>,
    threshold: Option<WebGlUniformLocation>,
    smoothing: Option<WebGlUniformLocation>,
    blur_texture: Option<WebGlUniformLocation>,
    direction: Option<WebGlUniformLocation>,
    scene: Option<WebGlUniformLocation>,
    bloom: Option<WebGlUniformLocation>,
    bloom_strength: Option<WebGlUniformLocation>,
    vignette_offset: Option<WebGlUniformLocation>,
    vignette_darkness: Option<WebGlUniformLocation>,
}

/// Handle to a batch created with [`RenderPipeline::add_batch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchId(usize);

/// One mesh drawn many times with per-instance matrix and color
struct InstancedBatch {
    vao: WebGlVertexArrayObject,
    instance_buffer: WebGlBuffer,
    index_count: i32,
    instance_count: i32,
    capacity: usize,
    material: Material,
    // Kept alive with the VAO
    _vertex_buffer: WebGlBuffer,
    _index_buffer: WebGlBuffer,
}

/// Everything that changes between frames
pub struct Frame {
    pub foliage: FoliageUniforms,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub topper_position: Vec3,
}

/// Offscreen targets for the post passes
struct RenderTargets {
    scene_texture: WebGlTexture,
    scene_depth: WebGlRenderbuffer,
    scene_fbo: WebGlFramebuffer,
    bloom_textures: [WebGlTexture; 2],
    bloom_fbos: [WebGlFramebuffer; 2],
}

/// Complete render pipeline for the tree
pub struct RenderPipeline {
    ctx: WebGLContext,

    foliage_program: WebGlProgram,
    mesh_program: WebGlProgram,
    bloom_extract_program: WebGlProgram,
    blur_program: WebGlProgram,
    composite_program: WebGlProgram,

    foliage_locations: FoliageLocations,
    mesh_locations: MeshLocations,
    post_locations: PostLocations,

    // Static foliage cloud
    foliage_vao: Option<WebGlVertexArrayObject>,
    _foliage_buffer: Option<WebGlBuffer>,
    foliage_count: i32,

    batches: Vec<InstancedBatch>,

    targets: RenderTargets,

    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let foliage_program = ctx.create_program(&foliage_vertex_source(), &foliage_fragment_source())?;
        let mesh_program = ctx.create_program(ORNAMENT_VERTEX_SHADER, &ornament_fragment_source())?;
        let bloom_extract_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLOOM_EXTRACT_SHADER)?;
        let blur_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLUR_SHADER)?;
        let composite_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, COMPOSITE_SHADER)?;

        let foliage_locations = FoliageLocations {
            view: ctx.get_uniform_location(&foliage_program, "u_view"),
            projection: ctx.get_uniform_location(&foliage_program, "u_projection"),
            time: ctx.get_uniform_location(&foliage_program, "u_time"),
            progress: ctx.get_uniform_location(&foliage_program, "u_progress"),
            base_color: ctx.get_uniform_location(&foliage_program, "u_base_color"),
            glow_color: ctx.get_uniform_location(&foliage_program, "u_glow_color"),
        };

        let mesh_locations = MeshLocations {
            view: ctx.get_uniform_location(&mesh_program, "u_view"),
            projection: ctx.get_uniform_location(&mesh_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&mesh_program, "u_camera_pos"),
            topper_pos: ctx.get_uniform_location(&mesh_program, "u_topper_pos"),
            metalness: ctx.get_uniform_location(&mesh_program, "u_metalness"),
            roughness: ctx.get_uniform_location(&mesh_program, "u_roughness"),
            emissive: ctx.get_uniform_location(&mesh_program, "u_emissive"),
            opacity: ctx.get_uniform_location(&mesh_program, "u_opacity"),
            unlit: ctx.get_uniform_location(&mesh_program, "u_unlit"),
        };

        let post_locations = PostLocations {
            extract_texture: ctx.get_uniform_location(&bloom_extract_program, "u_texture"),
            threshold: ctx.get_uniform_location(&bloom_extract_program, "u_threshold"),
            smoothing: ctx.get_uniform_location(&bloom_extract_program, "u_smoothing"),
            blur_texture: ctx.get_uniform_location(&blur_program, "u_texture"),
            direction: ctx.get_uniform_location(&blur_program, "u_direction"),
            scene: ctx.get_uniform_location(&composite_program, "u_scene"),
            bloom: ctx.get_uniform_location(&composite_program, "u_bloom"),
            bloom_strength: ctx.get_uniform_location(&composite_program, "u_bloom_strength"),
            vignette_offset: ctx.get_uniform_location(&composite_program, "u_vignette_offset"),
            vignette_darkness: ctx.get_uniform_location(&composite_program, "u_vignette_darkness"),
        };

        let targets = Self::create_targets(&ctx, width, height)?;

        Ok(Self {
            ctx,
            foliage_program,
            mesh_program,
            bloom_extract_program,
            blur_program,
            composite_program,
            foliage_locations,
            mesh_locations,
            post_locations,
            foliage_vao: None,
            _foliage_buffer: None,
            foliage_count: 0,
            batches: Vec::new(),
            targets,
            width,
            height,
        })
    }

    fn create_targets(ctx: &WebGLContext, width: i32, height: i32) -> Result<RenderTargets, String> {
        let width = width.max(1);
        let height = height.max(1);

        let scene_texture = ctx.create_texture(width, height)?;
        let scene_depth = ctx.create_depth_buffer(width, height)?;
        let scene_fbo = ctx.create_framebuffer(&scene_texture, Some(&scene_depth))?;

        // Bloom runs at half resolution
        let bloom_width = (width / 2).max(1);
        let bloom_height = (height / 2).max(1);
        let bloom_a = ctx.create_texture(bloom_width, bloom_height)?;
        let bloom_b = ctx.create_texture(bloom_width, bloom_height)?;
        let fbo_a = ctx.create_framebuffer(&bloom_a, None)?;
        let fbo_b = ctx.create_framebuffer(&bloom_b, None)?;

        Ok(RenderTargets {
            scene_texture,
            scene_depth,
            scene_fbo,
            bloom_textures: [bloom_a, bloom_b],
            bloom_fbos: [fbo_a, fbo_b],
        })
    }

    fn delete_targets(&self) {
        let gl = &self.ctx.gl;
        let t = &self.targets;
        gl.delete_framebuffer(Some(&t.scene_fbo));
        gl.delete_renderbuffer(Some(&t.scene_depth));
        gl.delete_texture(Some(&t.scene_texture));
        for i in 0..2 {
            gl.delete_framebuffer(Some(&t.bloom_fbos[i]));
            gl.delete_texture(Some(&t.bloom_textures[i]));
        }
    }

    /// Upload the foliage cloud once; it never changes afterwards
    pub fn upload_foliage(&mut self, cloud: &FoliageCloud) -> Result<(), String> {
        let vao = self.ctx.create_vao()?;
        self.ctx.gl.bind_vertex_array(Some(&vao));

        let data = cloud.vertex_data();
        let buffer = self.ctx.create_buffer_f32(&data, WebGl2RenderingContext::STATIC_DRAW)?;

        let stride = FOLIAGE_STRIDE as i32 * BYTES;
        self.ctx.gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));
        self.ctx.float_attribute(0, 3, stride, 0, 0); // scatter position
        self.ctx.float_attribute(1, 3, stride, 3 * BYTES, 0); // tree position
        self.ctx.float_attribute(2, 1, stride, 6 * BYTES, 0); // random offset

        self.ctx.gl.bind_vertex_array(None);

        self.foliage_vao = Some(vao);
        self._foliage_buffer = Some(buffer);
        self.foliage_count = cloud.len() as i32;

        Ok(())
    }

    /// Create an instanced batch able to hold `capacity` instances
    pub fn add_batch(&mut self, mesh: &Mesh, capacity: usize, material: Material) -> Result<BatchId, String> {
        let ctx = &self.ctx;
        let gl = &ctx.gl;

        let vao = ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = ctx.create_buffer_f32(&mesh.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        let index_buffer = ctx.create_index_buffer(mesh.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        let empty = vec![0.0f32; capacity.max(1) * INSTANCE_STRIDE];
        let instance_buffer = ctx.create_buffer_f32(&empty, WebGl2RenderingContext::DYNAMIC_DRAW)?;

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        ctx.float_attribute(0, 3, MESH_STRIDE, 0, 0); // position
        ctx.float_attribute(1, 3, MESH_STRIDE, 3 * BYTES, 0); // normal

        // mat4 occupies four consecutive vec4 slots
        let stride = INSTANCE_STRIDE as i32 * BYTES;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&instance_buffer));
        for column in 0..4 {
            ctx.float_attribute(2 + column, 4, stride, column as i32 * 4 * BYTES, 1);
        }
        ctx.float_attribute(6, 3, stride, 16 * BYTES, 1); // color

        // Element buffer binding is VAO state
        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.batches.push(InstancedBatch {
            vao,
            instance_buffer,
            index_count: mesh.index_data().len() as i32,
            instance_count: 0,
            capacity,
            material,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
        });

        Ok(BatchId(self.batches.len() - 1))
    }

    /// Replace a batch's instance data for this frame
    pub fn update_instances(&mut self, id: BatchId, data: &[f32]) {
        let Some(batch) = self.batches.get_mut(id.0) else {
            return;
        };
        let count = (data.len() / INSTANCE_STRIDE).min(batch.capacity);
        if count > 0 {
            self.ctx
                .update_buffer_f32(&batch.instance_buffer, &data[..count * INSTANCE_STRIDE]);
        }
        batch.instance_count = count as i32;
    }

    pub fn set_opacity(&mut self, id: BatchId, opacity: f32) {
        if let Some(batch) = self.batches.get_mut(id.0) {
            batch.material.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn draw_batch(&self, batch: &InstancedBatch) {
        let gl = &self.ctx.gl;
        let loc = &self.mesh_locations;
        let m = &batch.material;

        self.ctx.uniform_float(loc.metalness.as_ref(), m.metalness);
        self.ctx.uniform_float(loc.roughness.as_ref(), m.roughness);
        self.ctx.uniform_float(loc.emissive.as_ref(), m.emissive);
        self.ctx.uniform_float(loc.opacity.as_ref(), m.opacity);
        self.ctx.uniform_int(loc.unlit.as_ref(), m.unlit as i32);

        gl.bind_vertex_array(Some(&batch.vao));
        gl.draw_elements_instanced_with_i32(
            WebGl2RenderingContext::TRIANGLES,
            batch.index_count,
            WebGl2RenderingContext::UNSIGNED_INT,
            0,
            batch.instance_count,
        );
    }

    /// Render a frame
    pub fn render(&self, frame: &Frame) {
        let gl = &self.ctx.gl;
        let t = &self.targets;

        // === Pass 1: Scene to framebuffer ===
        self.ctx.bind_target(Some(&t.scene_fbo), self.width, self.height);
        gl.depth_mask(true);
        self.ctx.clear(BACKGROUND_COLOR);
        self.ctx.set_depth_test(true);
        self.ctx.set_blend(BlendMode::Off);

        gl.use_program(Some(&self.mesh_program));
        let loc = &self.mesh_locations;
        self.ctx.uniform_mat4(loc.view.as_ref(), &frame.view);
        self.ctx.uniform_mat4(loc.projection.as_ref(), &frame.projection);
        self.ctx.uniform_vec3(loc.camera_pos.as_ref(), frame.camera_position);
        self.ctx.uniform_vec3(loc.topper_pos.as_ref(), frame.topper_position);

        let visible = |b: &&InstancedBatch| b.instance_count > 0 && b.material.opacity > 0.0;

        for batch in self.batches.iter().filter(visible).filter(|b| b.material.opacity >= 1.0) {
            self.draw_batch(batch);
        }

        // Translucent meshes after the opaque ones
        self.ctx.set_blend(BlendMode::Alpha);
        for batch in self.batches.iter().filter(visible).filter(|b| b.material.opacity < 1.0) {
            self.draw_batch(batch);
        }

        // Foliage: additive, depth tested but never written
        if let Some(vao) = self.foliage_vao.as_ref().filter(|_| self.foliage_count > 0) {
            let loc = &self.foliage_locations;
            let u = &frame.foliage;

            gl.use_program(Some(&self.foliage_program));
            gl.depth_mask(false);
            self.ctx.set_blend(BlendMode::Additive);

            self.ctx.uniform_mat4(loc.view.as_ref(), &frame.view);
            self.ctx.uniform_mat4(loc.projection.as_ref(), &frame.projection);
            self.ctx.uniform_float(loc.time.as_ref(), u.time);
            self.ctx.uniform_float(loc.progress.as_ref(), u.progress.clamp(0.0, 1.0));
            self.ctx.uniform_vec3(loc.base_color.as_ref(), u.base_color);
            self.ctx.uniform_vec3(loc.glow_color.as_ref(), u.glow_color);

            gl.bind_vertex_array(Some(vao));
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.foliage_count);
            gl.depth_mask(true);
        }

        gl.bind_vertex_array(None);

        // === Pass 2: Extract bloom ===
        let (bloom_width, bloom_height) = ((self.width / 2).max(1), (self.height / 2).max(1));
        self.ctx.bind_target(Some(&t.bloom_fbos[0]), bloom_width, bloom_height);
        self.ctx.set_depth_test(false);
        self.ctx.set_blend(BlendMode::Off);

        gl.use_program(Some(&self.bloom_extract_program));
        gl.active_texture(WebGl2RenderingContext::TEXTURE0);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&t.scene_texture));
        self.ctx.uniform_int(self.post_locations.extract_texture.as_ref(), 0);
        self.ctx.uniform_float(self.post_locations.threshold.as_ref(), BLOOM_THRESHOLD);
        self.ctx.uniform_float(self.post_locations.smoothing.as_ref(), BLOOM_SMOOTHING);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);

        // === Pass 3: Blur horizontally ===
        self.ctx.bind_target(Some(&t.bloom_fbos[1]), bloom_width, bloom_height);
        gl.use_program(Some(&self.blur_program));
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&t.bloom_textures[0]));
        self.ctx.uniform_int(self.post_locations.blur_texture.as_ref(), 0);
        self.ctx.uniform_vec2(self.post_locations.direction.as_ref(), 1.0, 0.0);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);

        // === Pass 4: Blur vertically ===
        self.ctx.bind_target(Some(&t.bloom_fbos[0]), bloom_width, bloom_height);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&t.bloom_textures[1]));
        self.ctx.uniform_vec2(self.post_locations.direction.as_ref(), 0.0, 1.0);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);

        // === Pass 5: Composite ===
        self.ctx.bind_target(None, self.width, self.height);

        gl.use_program(Some(&self.composite_program));

        gl.active_texture(WebGl2RenderingContext::TEXTURE0);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&t.scene_texture));
        self.ctx.uniform_int(self.post_locations.scene.as_ref(), 0);

        gl.active_texture(WebGl2RenderingContext::TEXTURE1);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&t.bloom_textures[0]));
        self.ctx.uniform_int(self.post_locations.bloom.as_ref(), 1);

        self.ctx.uniform_float(self.post_locations.bloom_strength.as_ref(), BLOOM_STRENGTH);
        self.ctx.uniform_float(self.post_locations.vignette_offset.as_ref(), VIGNETTE_OFFSET);
        self.ctx.uniform_float(self.post_locations.vignette_darkness.as_ref(), VIGNETTE_DARKNESS);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Resize the render pipeline
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), String> {
        let targets = Self::create_targets(&self.ctx, width, height)?;
        self.delete_targets();
        self.targets = targets;
        self.width = width;
        self.height = height;
        Ok(())
    }
}
