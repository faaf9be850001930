//! The backend of the video system, which should be responsible for only one thing:
//! forwarding calls to the low-level graphics API.
//!
//! Everything above this module (shaders, buffers, the renderer) is written against the
//! `Visitor` trait, so it runs unchanged on a real OpenGL context or on the headless visitor
//! used by tests.

pub mod headless;

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;

use cgmath::Vector2;

use super::assets::prelude::*;
use super::errors::*;

/// The binding points a buffer object can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attributes.
    Array,
    /// Vertex array indices.
    ElementArray,
}

/// How polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

impl Default for PolygonMode {
    fn default() -> Self {
        PolygonMode::Fill
    }
}

/// Defines how the input vertex data is used to assemble primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

impl Primitive {
    /// The number of primitives assembled from `vertices` vertices.
    pub fn assemble(self, vertices: u32) -> u32 {
        match self {
            Primitive::Points => vertices,
            Primitive::Lines => vertices / 2,
            Primitive::LineStrip => vertices.saturating_sub(1),
            Primitive::Triangles => vertices / 3,
            Primitive::TriangleStrip => vertices.saturating_sub(2),
        }
    }
}

/// One configured vertex attribute slot, the arguments of `glVertexAttribPointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribPointer {
    /// The attribute slot.
    pub index: u32,
    /// The number of components.
    pub size: u8,
    pub format: VertexFormat,
    pub normalized: bool,
    /// The byte distance between two consecutive vertices.
    pub stride: u32,
    /// The byte offset of the first component inside a vertex.
    pub offset: u32,
}

/// The raw graphics API, one method per call (or tight group of calls) the sandbox issues.
///
/// Object ids are the plain integer names the API hands out, `0` is never a valid object.
pub trait Visitor {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32>;

    /// Submits `source` to the shader object and compiles it, returns the compile status.
    fn compile_shader(&mut self, shader: u32, source: &str) -> Result<bool>;

    fn shader_info_log(&mut self, shader: u32) -> Result<String>;

    fn delete_shader(&mut self, shader: u32) -> Result<()>;

    fn create_program(&mut self) -> Result<u32>;

    fn attach_shader(&mut self, program: u32, shader: u32) -> Result<()>;

    /// Links the program, returns the link status.
    fn link_program(&mut self, program: u32) -> Result<bool>;

    /// Validates the program against the current state, returns the validate status.
    fn validate_program(&mut self, program: u32) -> Result<bool>;

    fn program_info_log(&mut self, program: u32) -> Result<String>;

    fn delete_program(&mut self, program: u32) -> Result<()>;

    /// Makes `program` current, `0` unbinds.
    fn use_program(&mut self, program: u32) -> Result<()>;

    /// Queries the location of a uniform, `-1` if the program has no such active uniform.
    fn uniform_location(&mut self, program: u32, name: &str) -> Result<i32>;

    fn uniform_4f(&mut self, location: i32, value: [f32; 4]) -> Result<()>;

    /// Creates a buffer object, binds it to `target` and uploads `data` once.
    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<u32>;

    /// Binds `buffer` to `target`, `0` unbinds.
    fn bind_buffer(&mut self, target: BufferTarget, buffer: u32) -> Result<()>;

    fn delete_buffer(&mut self, buffer: u32) -> Result<()>;

    fn create_vertex_array(&mut self) -> Result<u32>;

    /// Binds `vao`, `0` unbinds.
    fn bind_vertex_array(&mut self, vao: u32) -> Result<()>;

    fn delete_vertex_array(&mut self, vao: u32) -> Result<()>;

    /// Enables and configures one attribute slot of the bound vertex array, reading from the
    /// bound array buffer.
    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribPointer) -> Result<()>;

    fn clear(&mut self, color: [f32; 4]) -> Result<()>;

    fn viewport(&mut self, position: Vector2<i32>, size: Vector2<u32>) -> Result<()>;

    fn polygon_mode(&mut self, mode: PolygonMode) -> Result<()>;

    /// Draws `count` indices of the bound element buffer, read as `u32`.
    fn draw_elements(&mut self, primitive: Primitive, count: u32) -> Result<()>;

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) -> Result<()>;

    /// Blocks until all submitted commands are complete.
    fn flush(&mut self) -> Result<()>;
}
