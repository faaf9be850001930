//! The window and the OpenGL context around it.

pub mod headless;

#[cfg(not(target_arch = "wasm32"))]
pub mod glutin;

use std::collections::HashSet;
use std::slice::Iter;

use cgmath::Vector2;

use super::errors::*;
use super::events::{Event, Key};
use super::settings::WindowParams;

/// The platform side of a window.
pub trait Visitor {
    /// Appends every event that arrived since the last call.
    fn poll_events(&mut self, events: &mut Vec<Event>);
    /// Presents the back buffer.
    fn swap_buffers(&mut self) -> Result<()>;
    /// Returns the size in pixels of the framebuffer.
    fn dimensions(&self) -> Vector2<u32>;
}

/// Represents an OpenGL context and the window or environment around it.
pub struct Window {
    visitor: Box<dyn Visitor>,
    events: Vec<Event>,
    keys: HashSet<Key>,
    should_close: bool,
}

impl Window {
    /// Creates a new `Window`, makes its OpenGL context current and loads the OpenGL
    /// function pointers.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(params: &WindowParams) -> Result<Self> {
        let visitor = self::glutin::GlutinVisitor::new(params)?;
        Ok(Window::from_visitor(Box::new(visitor)))
    }

    /// Creates a window that has no surface and asks to close after `frames` swaps.
    pub fn headless(params: &WindowParams, frames: u32) -> Self {
        let visitor = self::headless::HeadlessVisitor::new(params.size, frames);
        Window::from_visitor(Box::new(visitor))
    }

    pub fn from_visitor(visitor: Box<dyn Visitor>) -> Self {
        Window {
            visitor,
            events: Vec::new(),
            keys: HashSet::new(),
            should_close: false,
        }
    }

    /// Returns the size in pixels of the framebuffer.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.visitor.dimensions()
    }

    #[inline]
    pub fn should_close(&self) -> bool {
        self.should_close
    }

    #[inline]
    pub fn set_should_close(&mut self, close: bool) {
        self.should_close = close;
    }

    /// Returns true if `key` was held down when events were last polled.
    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Swaps the buffers in case of double buffering.
    ///
    /// **Warning**: if you enabled vsync, this function will block until the next time the
    /// screen is refreshed.
    #[inline]
    pub fn swap_buffers(&mut self) -> Result<()> {
        self.visitor.swap_buffers()
    }

    /// Polls events from window, and returns the iterator over them.
    pub fn poll_events(&mut self) -> Iter<Event> {
        self.events.clear();
        self.visitor.poll_events(&mut self.events);

        for v in &self.events {
            match *v {
                Event::Closed => self.should_close = true,
                Event::KeyboardPressed { key } => {
                    self.keys.insert(key);
                }
                Event::KeyboardReleased { key } => {
                    self.keys.remove(&key);
                }
                Event::Resized(..) => {}
            }
        }

        self.events.iter()
    }
}
