use std::path::PathBuf;

use super::assets::shader::ShaderStage;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Shader resource {:?} could not be read: {}", path, reason)]
    ResourceMissing { path: PathBuf, reason: String },
    #[fail(display = "Shader resource {:?} is not valid UTF-8 text: {}", path, reason)]
    ResourceInvalid { path: PathBuf, reason: String },
    #[fail(display = "Failed to compile {} shader:\n{}", stage, log)]
    CompileFailure { stage: ShaderStage, log: String },
    #[fail(display = "Failed to link shader program:\n{}", log)]
    LinkFailure { log: String },
    #[fail(display = "Shader program {} must be bound before uploading uniforms.", _0)]
    ProgramNotBound(u32),
    #[fail(display = "Vertex layout has no elements.")]
    EmptyLayout,
    #[fail(display = "Too many vertex attributes ({}), at most {} are supported.", _0, _1)]
    TooManyAttributes(usize, usize),
    #[fail(display = "OpenGL implementation doesn\'t support {}.", _0)]
    Requirement(String),
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
