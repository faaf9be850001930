//! What gets drawn: pipelines that bundle a shader with its geometry, and the preset scenes
//! built out of them.

pub mod animation;
pub mod pipeline;
pub mod presets;

pub mod prelude {
    pub use super::animation::ColorAnimation;
    pub use super::pipeline::{Pipeline, PipelineDesc, ShaderResource, UniformDesc};
}
