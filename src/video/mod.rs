//! Everything that talks to the GPU.
//!
//! All objects are created against a `Context`, which owns the `Device` (the backend
//! `Visitor` behind a shared handle) and the current `Bindings`. The wrappers release their
//! GPU object exactly once when dropped.
//!
//! ```rust,ignore
//! let (mut ctx, _) = Context::headless();
//!
//! let shader = Shader::from_file(&mut ctx, "res/shaders/Basic.shader")?;
//! let mut va = VertexArray::new(&mut ctx)?;
//! let vb = VertexBuffer::from_slice(&mut ctx, &[-0.5f32, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0])?;
//!
//! let mut layout = VertexLayout::new();
//! layout.push::<f32>(3);
//! va.add_buffer(&mut ctx, &vb, &layout)?;
//! let ib = IndexBuffer::new(&mut ctx, &[0, 1, 2])?;
//!
//! shader.bind(&mut ctx)?;
//! shader.set_uniform4f(&ctx, "u_Color", [0.8, 0.3, 0.8, 1.0])?;
//! Renderer::default().draw(&mut ctx, &va, &ib, &shader)?;
//! ```

pub mod assets;
pub mod backends;
pub mod errors;

pub mod buffer;
pub mod device;
pub mod renderer;
pub mod shader;
pub mod vertex_array;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::headless::{Fault, HeadlessStats, HeadlessVisitor};
    pub use super::backends::{BufferTarget, PolygonMode, Primitive, Visitor};
    pub use super::buffer::{IndexBuffer, VertexBuffer};
    pub use super::device::{Bindings, Context, Device, Handle};
    pub use super::renderer::{Renderer, DEFAULT_CLEAR_COLOR};
    pub use super::shader::Shader;
    pub use super::vertex_array::VertexArray;
}
