//! Compiled and linked shader programs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use super::assets::prelude::*;
use super::backends::Visitor;
use super::device::{Context, Device, Handle};
use super::errors::*;

/// A linked GPU program made of one vertex and one fragment stage.
///
/// Uniform locations are looked up lazily and cached by name, including the names that do
/// not resolve to an active uniform.
#[derive(Debug)]
pub struct Shader {
    handle: Handle,
    id: u32,
    device: Device,
    uniforms: RefCell<HashMap<String, i32>>,
}

impl Shader {
    /// Compiles both stages of `source` and links them into a program.
    pub fn new(ctx: &mut Context, source: &ShaderSource) -> Result<Self> {
        let device = ctx.device().clone();
        let id = device.visit(|v| create_program(v, source))?;

        Ok(Shader {
            handle: device.next_handle(),
            id,
            device,
            uniforms: RefCell::new(HashMap::new()),
        })
    }

    /// Compiles a program from two inline stage sources.
    pub fn compile(ctx: &mut Context, vertex: &str, fragment: &str) -> Result<Self> {
        Self::new(ctx, &ShaderSource::new(vertex, fragment))
    }

    /// Loads the tagged shader resource at `path` and builds a program out of it.
    pub fn from_file<T: AsRef<Path>>(ctx: &mut Context, path: T) -> Result<Self> {
        let source = ShaderSource::load(path)?;
        Self::new(ctx, &source)
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The program name assigned by the backend.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Makes this program current.
    pub fn bind(&self, ctx: &mut Context) -> Result<()> {
        ctx.bind_program(self.handle, self.id)
    }

    /// Leaves no program current.
    pub fn unbind(&self, ctx: &mut Context) -> Result<()> {
        ctx.unbind_program()
    }

    #[inline]
    pub fn is_bound(&self, ctx: &Context) -> bool {
        ctx.bindings().program == Some(self.handle)
    }

    /// Returns the location of uniform `name`, or `None` if the program has no such active
    /// uniform. The backend is queried at most once per name.
    pub fn uniform_location(&self, name: &str) -> Result<Option<i32>> {
        if let Some(&location) = self.uniforms.borrow().get(name) {
            return Ok(valid_location(location));
        }

        let location = self.device.visit(|v| v.uniform_location(self.id, name))?;
        if location == -1 {
            warn!("Uniform {} doesn't exist in shader program {}.", name, self.id);
        }

        self.uniforms.borrow_mut().insert(name.to_owned(), location);
        Ok(valid_location(location))
    }

    /// Uploads a four component float uniform. The program must be bound, uploads to names
    /// without a location are skipped.
    pub fn set_uniform4f(&self, ctx: &Context, name: &str, value: [f32; 4]) -> Result<()> {
        if !self.is_bound(ctx) {
            return Err(Error::ProgramNotBound(self.id));
        }

        if let Some(location) = self.uniform_location(name)? {
            self.device.visit(|v| v.uniform_4f(location, value))?;
        }

        Ok(())
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        let id = self.id;
        if let Err(err) = self.device.visit(|v| v.delete_program(id)) {
            error!("Failed to delete shader program {}. {}", id, err);
        }
    }
}

#[inline]
fn valid_location(location: i32) -> Option<i32> {
    if location == -1 {
        None
    } else {
        Some(location)
    }
}

fn create_program(visitor: &mut dyn Visitor, source: &ShaderSource) -> Result<u32> {
    let vs = compile(visitor, ShaderStage::Vertex, &source.vertex)?;
    let fs = match compile(visitor, ShaderStage::Fragment, &source.fragment) {
        Ok(fs) => fs,
        Err(err) => {
            release_stage(visitor, vs);
            return Err(err);
        }
    };

    let rsp = link(visitor, vs, fs);

    // The stages are not needed once the program has been linked.
    release_stage(visitor, vs);
    release_stage(visitor, fs);
    rsp
}

fn release_stage(visitor: &mut dyn Visitor, id: u32) {
    if let Err(err) = visitor.delete_shader(id) {
        warn!("Failed to delete shader stage {}. {}", id, err);
    }
}

fn compile(visitor: &mut dyn Visitor, stage: ShaderStage, source: &str) -> Result<u32> {
    let id = visitor.create_shader(stage)?;
    match compile_stage(visitor, id, stage, source) {
        Ok(_) => Ok(id),
        Err(err) => {
            release_stage(visitor, id);
            Err(err)
        }
    }
}

fn compile_stage(
    visitor: &mut dyn Visitor,
    id: u32,
    stage: ShaderStage,
    source: &str,
) -> Result<()> {
    if visitor.compile_shader(id, source)? {
        return Ok(());
    }

    let log = visitor.shader_info_log(id)?;
    error!("Failed to compile {} shader!\n{}", stage, log);
    Err(Error::CompileFailure { stage, log })
}

fn link(visitor: &mut dyn Visitor, vs: u32, fs: u32) -> Result<u32> {
    let id = visitor.create_program()?;
    match link_stages(visitor, id, vs, fs) {
        Ok(_) => Ok(id),
        Err(err) => {
            if let Err(err) = visitor.delete_program(id) {
                warn!("Failed to delete shader program {}. {}", id, err);
            }

            Err(err)
        }
    }
}

fn link_stages(visitor: &mut dyn Visitor, id: u32, vs: u32, fs: u32) -> Result<()> {
    visitor.attach_shader(id, vs)?;
    visitor.attach_shader(id, fs)?;

    if !visitor.link_program(id)? {
        let log = visitor.program_info_log(id)?;
        error!("Failed to link shader program {}!\n{}", id, log);
        return Err(Error::LinkFailure { log });
    }

    if !visitor.validate_program(id)? {
        let log = visitor.program_info_log(id)?;
        warn!("Shader program {} failed to validate. {}", id, log);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = "#version 330 core\nlayout(location = 0) in vec4 position;\nvoid main() { gl_Position = position; }\n";
    const FS: &str = "#version 330 core\nlayout(location = 0) out vec4 color;\nuniform vec4 u_Color;\nvoid main() { color = u_Color; }\n";

    #[test]
    fn stages_are_released() {
        let (mut ctx, stats) = Context::headless();
        let shader = Shader::new(&mut ctx, &ShaderSource::new(VS, FS)).unwrap();
        assert!(shader.id() != 0);
        assert_eq!(stats.shaders_created.get(), 2);
        assert_eq!(stats.shaders_deleted.get(), 2);
        assert_eq!(stats.programs_created.get(), 1);

        drop(shader);
        assert_eq!(stats.programs_deleted.get(), 1);
        assert_eq!(stats.live_objects(), 0);
    }

    #[test]
    fn vertex_failure_skips_fragment() {
        let (mut ctx, stats) = Context::headless();
        let rsp = Shader::new(&mut ctx, &ShaderSource::new("void main() {", FS));
        match rsp {
            Err(Error::CompileFailure { stage, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(stats.shaders_created.get(), 1);
        assert_eq!(stats.programs_created.get(), 0);
        assert_eq!(stats.live_objects(), 0);
    }

    #[test]
    fn empty_fragment_stage() {
        let (mut ctx, stats) = Context::headless();
        let source = ShaderSource::parse_str("#shader vertex\nvoid main() {}\n");
        let rsp = Shader::new(&mut ctx, &source);
        match rsp {
            Err(Error::CompileFailure { stage, .. }) => assert_eq!(stage, ShaderStage::Fragment),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(stats.live_objects(), 0);
    }
}
