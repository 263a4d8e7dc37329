pub mod emulate;
pub mod pipeline;
pub mod shaders;
pub mod webgl;

pub use pipeline::{BatchId, Frame, RenderPipeline};
pub use webgl::WebGLContext;
