//! Clearing the framebuffer and issuing draw calls.

use cgmath::Vector2;

use super::backends::{PolygonMode, Primitive};
use super::buffer::IndexBuffer;
use super::device::Context;
use super::errors::*;
use super::shader::Shader;
use super::vertex_array::VertexArray;

/// The color the framebuffer is cleared with unless configured otherwise.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    clear_color: [f32; 4],
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(DEFAULT_CLEAR_COLOR)
    }
}

impl Renderer {
    pub fn new(clear_color: [f32; 4]) -> Self {
        Renderer { clear_color }
    }

    #[inline]
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    #[inline]
    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    /// Clears the color buffer.
    pub fn clear(&self, ctx: &mut Context) -> Result<()> {
        let color = self.clear_color;
        ctx.device().visit(|v| v.clear(color))
    }

    /// Draws every index of `ib` as triangles, reading vertices through `va`.
    pub fn draw(
        &self,
        ctx: &mut Context,
        va: &VertexArray,
        ib: &IndexBuffer,
        shader: &Shader,
    ) -> Result<()> {
        shader.bind(ctx)?;
        va.bind(ctx)?;
        ib.bind(ctx)?;

        let count = ib.count();
        ctx.device()
            .visit(|v| v.draw_elements(Primitive::Triangles, count))
    }

    /// Draws `count` consecutive vertices of `va` as triangles, starting at `first`.
    pub fn draw_arrays(
        &self,
        ctx: &mut Context,
        va: &VertexArray,
        shader: &Shader,
        first: u32,
        count: u32,
    ) -> Result<()> {
        shader.bind(ctx)?;
        va.bind(ctx)?;

        ctx.device()
            .visit(|v| v.draw_arrays(Primitive::Triangles, first, count))
    }

    pub fn set_polygon_mode(&self, ctx: &mut Context, mode: PolygonMode) -> Result<()> {
        ctx.device().visit(|v| v.polygon_mode(mode))
    }

    /// Maps normalized device coordinates onto the window rectangle.
    pub fn set_viewport(
        &self,
        ctx: &mut Context,
        position: Vector2<i32>,
        size: Vector2<u32>,
    ) -> Result<()> {
        ctx.device().visit(|v| v.viewport(position, size))
    }
}
