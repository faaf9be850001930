pub mod layout;
pub mod shader;

pub mod prelude {
    pub use super::layout::{
        VertexComponent, VertexElement, VertexFormat, VertexLayout, MAX_VERTEX_ATTRIBUTES,
    };
    pub use super::shader::{ShaderSource, ShaderStage, SHADER_MARKER};
}
