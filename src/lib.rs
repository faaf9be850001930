//! A small OpenGL sandbox.
//!
//! `glsandbox` opens a window, compiles vertex/fragment shader pairs that live in a single
//! tagged text file (or in inline strings), uploads some triangle geometry and renders it in
//! a blocking frame loop while animating a uniform color.
//!
//! The crate is split into three layers:
//!
//! * [`video`](video/index.html) owns everything that talks to the GPU. The raw API calls sit
//! behind the `Visitor` trait, with a real OpenGL implementation and a headless one that is
//! used in tests. On top of it live RAII wrappers for shaders, buffers and vertex arrays, and a
//! `Renderer` that issues draw calls.
//! * [`scene`](scene/index.html) describes what gets drawn: a `Pipeline` bundles a shader
//! resource with its geometry, and `presets` builds the scenes the binary knows about.
//! * [`application`](application/index.html) owns the window and runs the frame loop.
//!
//! The GPU state that decides which object a draw call consumes (the bound program, vertex
//! array and buffers) is not hidden global state here. It is tracked by `video::Context`, which
//! every bind, uniform and draw call takes by reference.

#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate serde;

pub extern crate cgmath;
#[cfg(not(target_arch = "wasm32"))]
extern crate gl;
#[cfg(not(target_arch = "wasm32"))]
extern crate glutin;
extern crate serde_json;
extern crate smallvec;

pub mod errors;

pub mod application;
pub mod scene;
pub mod video;

pub mod prelude {
    pub use cgmath::Vector2;

    pub use crate::application::prelude::*;
    pub use crate::scene::prelude::*;
    pub use crate::video::prelude::*;
}
