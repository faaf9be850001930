//! The window, its settings and the frame loop.
//!
//! # Engine
//!
//! `Engine` is where we actually run the main loop. Every iteration reads the keyboard
//! (escape requests to close), clears the framebuffer, draws each pipeline, presents the
//! frame and polls window events, resizing the viewport when the framebuffer changes.

pub mod errors;
pub mod events;
pub mod settings;
pub mod window;

mod engine;
pub use self::engine::Engine;

pub mod prelude {
    pub use super::events::{Event, Key};
    pub use super::settings::{RenderParams, SceneKind, Settings, WindowParams};
    pub use super::window::Window;
    pub use super::Engine;
}
