#[cfg(not(target_arch = "wasm32"))]
use glutin;

/// Failures that leave the process without a usable window or context.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to create window. {}", _0)]
    WindowCreation(String),
    #[fail(display = "Failed to make the OpenGL context current. {}", _0)]
    Context(String),
    #[fail(display = "Failed to load OpenGL function pointers: {} is missing.", _0)]
    Loader(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<glutin::CreationError> for Error {
    fn from(err: glutin::CreationError) -> Self {
        Error::WindowCreation(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<glutin::ContextError> for Error {
    fn from(err: glutin::ContextError) -> Self {
        Error::Context(err.to_string())
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;
