//! The scenes the sandbox binary can show.

use std::path::Path;

use crate::errors::*;
use crate::video::prelude::*;

use super::animation::ColorAnimation;
use super::pipeline::{Pipeline, PipelineDesc, ShaderResource, UniformDesc};

/// The corners of a quad made of two triangles.
pub const QUAD_VERTICES: [f32; 18] = [
    -0.9, -0.5, 0.0, // left
    0.0, -0.5, 0.0, // right
    -0.45, 0.5, 0.0, // top
    0.0, -0.5, 0.0, // left
    0.9, -0.5, 0.0, // right
    0.45, 0.5, 0.0, // top
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 5, 1, 2];

pub const LEFT_TRIANGLE: [f32; 9] = [
    -0.9, -0.5, 0.0, // left
    0.0, -0.5, 0.0, // right
    -0.45, 0.5, 0.0, // top
];

pub const RIGHT_TRIANGLE: [f32; 9] = [
    0.0, -0.5, 0.0, // left
    0.9, -0.5, 0.0, // right
    0.45, 0.5, 0.0, // top
];

pub const POSITION_VS: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

pub const ORANGE_FS: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

pub const YELLOW_FS: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 1.0f, 0.0f, 1.0f);
}
";

/// The initial value of `u_Color`. The animation then takes over the red channel.
pub const BASIC_COLOR: [f32; 4] = [0.5, 0.3, 0.8, 1.0];

/// Describes the indexed quad colored by `u_Color`, whose red channel pulses every frame.
pub fn basic_desc<T: AsRef<Path>>(shader: T) -> PipelineDesc {
    let mut desc = PipelineDesc::positions(
        ShaderResource::File(shader.as_ref().to_owned()),
        QUAD_VERTICES.to_vec(),
    );

    desc.indices = Some(QUAD_INDICES.to_vec());
    desc.uniform = Some(UniformDesc {
        name: "u_Color".to_owned(),
        initial: BASIC_COLOR,
        animation: Some(ColorAnimation::new(BASIC_COLOR)),
    });

    desc
}

/// Describes an orange filled triangle next to a yellow wireframe one.
pub fn two_triangles_desc() -> Vec<PipelineDesc> {
    let first = PipelineDesc::positions(
        ShaderResource::Inline(ShaderSource::new(POSITION_VS, ORANGE_FS)),
        LEFT_TRIANGLE.to_vec(),
    );

    let mut second = PipelineDesc::positions(
        ShaderResource::Inline(ShaderSource::new(POSITION_VS, YELLOW_FS)),
        RIGHT_TRIANGLE.to_vec(),
    );
    second.polygon_mode = PolygonMode::Line;

    vec![first, second]
}

pub fn basic<T: AsRef<Path>>(ctx: &mut Context, shader: T) -> Result<Vec<Pipeline>> {
    Ok(vec![Pipeline::new(ctx, &basic_desc(shader))?])
}

pub fn two_triangles(ctx: &mut Context) -> Result<Vec<Pipeline>> {
    two_triangles_desc()
        .iter()
        .map(|desc| Pipeline::new(ctx, desc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_draw_arrays() {
        let (mut ctx, stats) = Context::headless();
        let renderer = Renderer::default();

        let mut pipelines = two_triangles(&mut ctx).unwrap();
        assert_eq!(pipelines.len(), 2);
        assert_eq!(stats.programs_created.get(), 2);

        for v in &mut pipelines {
            assert_eq!(v.vertex_count(), 3);
            v.draw(&mut ctx, &renderer).unwrap();
        }

        assert_eq!(stats.draw_arrays_calls.get(), 2);
        assert_eq!(stats.draw_elements_calls.get(), 0);
        assert_eq!(stats.polygon_mode.get(), PolygonMode::Fill);
        assert!(stats.uniforms.borrow().is_empty());

        drop(pipelines);
        assert_eq!(stats.live_objects(), 0);
    }

    #[test]
    fn basic_missing_resource() {
        let (mut ctx, stats) = Context::headless();
        let err = basic(&mut ctx, "res/shaders/Missing.shader").err().unwrap();
        assert!(err.to_string().contains("Missing.shader"));
        assert_eq!(stats.live_objects(), 0);
    }
}
