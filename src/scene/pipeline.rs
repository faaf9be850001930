//! A self-contained drawable: one shader program plus the geometry it renders.

use std::path::PathBuf;

use crate::errors::*;
use crate::video::prelude::*;

use super::animation::ColorAnimation;

/// Where the program of a pipeline comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderResource {
    /// A tagged shader file with `#shader vertex` and `#shader fragment` sections.
    File(PathBuf),
    /// Stage sources given in memory.
    Inline(ShaderSource),
}

/// A `vec4` uniform that is uploaded once at creation and optionally animated per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDesc {
    pub name: String,
    pub initial: [f32; 4],
    pub animation: Option<ColorAnimation>,
}

/// Everything needed to build a `Pipeline`.
#[derive(Debug, Clone)]
pub struct PipelineDesc {
    pub shader: ShaderResource,
    /// Interleaved vertex attributes, read through `layout`.
    pub vertices: Vec<f32>,
    pub layout: VertexLayout,
    /// Draws with an index buffer when present, otherwise every vertex in order.
    pub indices: Option<Vec<u32>>,
    pub uniform: Option<UniformDesc>,
    pub polygon_mode: PolygonMode,
}

impl PipelineDesc {
    /// Creates a description of tightly packed `vec3` positions.
    pub fn positions(shader: ShaderResource, vertices: Vec<f32>) -> Self {
        let mut layout = VertexLayout::new();
        layout.push::<f32>(3);

        PipelineDesc {
            shader,
            vertices,
            layout,
            indices: None,
            uniform: None,
            polygon_mode: PolygonMode::Fill,
        }
    }
}

struct AnimatedUniform {
    name: String,
    animation: ColorAnimation,
}

/// The GPU objects of one drawable and the per-frame state that drives them.
pub struct Pipeline {
    shader: Shader,
    va: VertexArray,
    ib: Option<IndexBuffer>,
    vertex_count: u32,
    uniform: Option<AnimatedUniform>,
    polygon_mode: PolygonMode,
    _vb: VertexBuffer,
}

impl Pipeline {
    pub fn new(ctx: &mut Context, desc: &PipelineDesc) -> Result<Self> {
        let mut va = VertexArray::new(ctx)?;
        let vb = VertexBuffer::from_slice(ctx, &desc.vertices)?;
        va.add_buffer(ctx, &vb, &desc.layout)?;

        let ib = match desc.indices {
            Some(ref indices) => Some(IndexBuffer::new(ctx, indices)?),
            None => None,
        };

        let shader = match desc.shader {
            ShaderResource::File(ref path) => Shader::from_file(ctx, path)?,
            ShaderResource::Inline(ref source) => Shader::new(ctx, source)?,
        };

        let mut uniform = None;
        if let Some(ref v) = desc.uniform {
            shader.bind(ctx)?;
            shader.set_uniform4f(ctx, &v.name, v.initial)?;

            if let Some(animation) = v.animation {
                uniform = Some(AnimatedUniform {
                    name: v.name.clone(),
                    animation,
                });
            }
        }

        shader.unbind(ctx)?;
        va.unbind(ctx)?;
        vb.unbind(ctx)?;

        let vertex_count = (desc.vertices.len() * 4) as u32 / desc.layout.stride();
        debug!(
            "Created pipeline with program {}, {} vertices and {} indices.",
            shader.id(),
            vertex_count,
            ib.as_ref().map(|v| v.count()).unwrap_or(0)
        );

        Ok(Pipeline {
            shader,
            va,
            ib,
            vertex_count,
            uniform,
            polygon_mode: desc.polygon_mode,
            _vb: vb,
        })
    }

    #[inline]
    pub fn shader(&self) -> &Shader {
        &self.shader
    }

    #[inline]
    pub fn vertex_array(&self) -> &VertexArray {
        &self.va
    }

    /// The number of vertices stored in the vertex buffer.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// The color the animated uniform will be set to by the next `draw`.
    pub fn color(&self) -> Option<[f32; 4]> {
        self.uniform.as_ref().map(|v| v.animation.color())
    }

    /// Binds the program, pushes the animated uniform and draws. The animation advances once
    /// per call.
    pub fn draw(&mut self, ctx: &mut Context, renderer: &Renderer) -> Result<()> {
        self.shader.bind(ctx)?;

        if let Some(ref mut v) = self.uniform {
            self.shader.set_uniform4f(ctx, &v.name, v.animation.color())?;
            v.animation.advance();
        }

        if self.polygon_mode != PolygonMode::Fill {
            renderer.set_polygon_mode(ctx, self.polygon_mode)?;
        }

        match self.ib {
            Some(ref ib) => renderer.draw(ctx, &self.va, ib, &self.shader)?,
            None => renderer.draw_arrays(ctx, &self.va, &self.shader, 0, self.vertex_count)?,
        }

        if self.polygon_mode != PolygonMode::Fill {
            renderer.set_polygon_mode(ctx, PolygonMode::Fill)?;
        }

        Ok(())
    }
}
