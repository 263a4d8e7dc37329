use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlFramebuffer, WebGlProgram, WebGlRenderbuffer,
    WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::math::{Mat4, Vec3};

/// How fragments combine with the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Off,
    /// Standard alpha over
    Alpha,
    /// Glow accumulation
    Additive,
}

/// Wrapper around WebGL2 context with helper methods
pub struct WebGLContext {
    pub gl: Gl,
}

impl WebGLContext {
    pub fn new(gl: Gl) -> Self {
        Self { gl }
    }

    /// Compile a shader from source
    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader, String> {
        let gl = &self.gl;

        let shader = gl.create_shader(shader_type).ok_or("Failed to create shader")?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        let compiled = gl
            .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !compiled {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            let stage = if shader_type == Gl::VERTEX_SHADER { "vertex" } else { "fragment" };
            return Err(format!("{} shader compilation failed: {}", stage, log));
        }
        Ok(shader)
    }

    /// Compile and link a vertex/fragment pair
    pub fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, String> {
        let gl = &self.gl;

        let vert_shader = self.compile_shader(Gl::VERTEX_SHADER, vert_src)?;
        let frag_shader = self.compile_shader(Gl::FRAGMENT_SHADER, frag_src)?;

        let program = gl.create_program().ok_or("Failed to create program")?;
        gl.attach_shader(&program, &vert_shader);
        gl.attach_shader(&program, &frag_shader);
        gl.link_program(&program);

        // Linked programs keep their own copy
        gl.delete_shader(Some(&vert_shader));
        gl.delete_shader(Some(&frag_shader));

        let linked = gl
            .get_program_parameter(&program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            return Err(format!("Program linking failed: {}", log));
        }
        Ok(program)
    }

    /// Vertex buffer filled with `data`
    pub fn create_buffer_f32(&self, data: &[f32], usage: u32) -> Result<WebGlBuffer, String> {
        let buffer = self.gl.create_buffer().ok_or("Failed to create buffer")?;
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        // Safety: the view is consumed by the upload before `data` can move
        unsafe {
            let view = js_sys::Float32Array::view(data);
            self.gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &view, usage);
        }
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, None);
        Ok(buffer)
    }

    /// Overwrite the start of an existing vertex buffer
    pub fn update_buffer_f32(&self, buffer: &WebGlBuffer, data: &[f32]) {
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        unsafe {
            let view = js_sys::Float32Array::view(data);
            self.gl
                .buffer_sub_data_with_i32_and_array_buffer_view(Gl::ARRAY_BUFFER, 0, &view);
        }
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, None);
    }

    /// Element buffer of 32-bit indices. Left bound so the current VAO
    /// records it.
    pub fn create_index_buffer(&self, data: &[u32], usage: u32) -> Result<WebGlBuffer, String> {
        let buffer = self.gl.create_buffer().ok_or("Failed to create index buffer")?;
        self.gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));
        unsafe {
            let view = js_sys::Uint32Array::view(data);
            self.gl
                .buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &view, usage);
        }
        Ok(buffer)
    }

    pub fn create_vao(&self) -> Result<WebGlVertexArrayObject, String> {
        self.gl
            .create_vertex_array()
            .ok_or_else(|| "Failed to create VAO".to_string())
    }

    /// Empty RGBA8 color target with linear filtering and clamped edges
    pub fn create_texture(&self, width: i32, height: i32) -> Result<WebGlTexture, String> {
        let gl = &self.gl;

        let texture = gl.create_texture().ok_or("Failed to create texture")?;
        gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));

        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA8 as i32,
            width.max(1),
            height.max(1),
            0,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            None,
        )
        .map_err(|e| format!("Failed to allocate texture: {:?}", e))?;

        for (param, value) in [
            (Gl::TEXTURE_MIN_FILTER, Gl::LINEAR),
            (Gl::TEXTURE_MAG_FILTER, Gl::LINEAR),
            (Gl::TEXTURE_WRAP_S, Gl::CLAMP_TO_EDGE),
            (Gl::TEXTURE_WRAP_T, Gl::CLAMP_TO_EDGE),
        ] {
            gl.tex_parameteri(Gl::TEXTURE_2D, param, value as i32);
        }

        gl.bind_texture(Gl::TEXTURE_2D, None);
        Ok(texture)
    }

    /// 24-bit depth renderbuffer
    pub fn create_depth_buffer(&self, width: i32, height: i32) -> Result<WebGlRenderbuffer, String> {
        let gl = &self.gl;

        let rbo = gl.create_renderbuffer().ok_or("Failed to create renderbuffer")?;
        gl.bind_renderbuffer(Gl::RENDERBUFFER, Some(&rbo));
        gl.renderbuffer_storage(Gl::RENDERBUFFER, Gl::DEPTH_COMPONENT24, width.max(1), height.max(1));
        gl.bind_renderbuffer(Gl::RENDERBUFFER, None);
        Ok(rbo)
    }

    /// Framebuffer rendering into `texture`, optionally depth tested
    pub fn create_framebuffer(
        &self,
        texture: &WebGlTexture,
        depth: Option<&WebGlRenderbuffer>,
    ) -> Result<WebGlFramebuffer, String> {
        let gl = &self.gl;

        let fbo = gl.create_framebuffer().ok_or("Failed to create framebuffer")?;
        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&fbo));
        gl.framebuffer_texture_2d(Gl::FRAMEBUFFER, Gl::COLOR_ATTACHMENT0, Gl::TEXTURE_2D, Some(texture), 0);
        if let Some(rbo) = depth {
            gl.framebuffer_renderbuffer(Gl::FRAMEBUFFER, Gl::DEPTH_ATTACHMENT, Gl::RENDERBUFFER, Some(rbo));
        }

        let status = gl.check_framebuffer_status(Gl::FRAMEBUFFER);
        gl.bind_framebuffer(Gl::FRAMEBUFFER, None);

        if status != Gl::FRAMEBUFFER_COMPLETE {
            gl.delete_framebuffer(Some(&fbo));
            return Err(format!("Framebuffer incomplete: 0x{:x}", status));
        }
        Ok(fbo)
    }

    pub fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_float(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_int(&self, location: Option<&WebGlUniformLocation>, value: i32) {
        self.gl.uniform1i(location, value);
    }

    pub fn uniform_vec2(&self, location: Option<&WebGlUniformLocation>, x: f32, y: f32) {
        self.gl.uniform2f(location, x, y);
    }

    pub fn uniform_vec3(&self, location: Option<&WebGlUniformLocation>, v: Vec3) {
        self.gl.uniform3f(location, v.x, v.y, v.z);
    }

    pub fn uniform_mat4(&self, location: Option<&WebGlUniformLocation>, m: &Mat4) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, m.as_slice());
    }

    /// Clear color and depth
    pub fn clear(&self, color: [f32; 3]) {
        self.gl.clear_color(color[0], color[1], color[2], 1.0);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    pub fn set_depth_test(&self, enabled: bool) {
        if enabled {
            self.gl.enable(Gl::DEPTH_TEST);
        } else {
            self.gl.disable(Gl::DEPTH_TEST);
        }
    }

    pub fn set_blend(&self, mode: BlendMode) {
        let gl = &self.gl;
        match mode {
            BlendMode::Off => gl.disable(Gl::BLEND),
            BlendMode::Alpha => {
                gl.enable(Gl::BLEND);
                gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
            }
            BlendMode::Additive => {
                gl.enable(Gl::BLEND);
                gl.blend_func(Gl::SRC_ALPHA, Gl::ONE);
            }
        }
    }

    /// Float attribute at `location`, advanced per instance when `divisor` is 1
    pub fn float_attribute(&self, location: u32, size: i32, stride: i32, offset: i32, divisor: u32) {
        let gl = &self.gl;
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, size, Gl::FLOAT, false, stride, offset);
        gl.vertex_attrib_divisor(location, divisor);
    }

    /// Bind `fbo` (or the canvas for `None`) and cover it with the viewport
    pub fn bind_target(&self, fbo: Option<&WebGlFramebuffer>, width: i32, height: i32) {
        self.gl.bind_framebuffer(Gl::FRAMEBUFFER, fbo);
        self.gl.viewport(0, 0, width, height);
    }
}
