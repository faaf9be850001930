//! The shared graphics device and the explicit binding state.
//!
//! Every GPU object wrapper keeps a clone of the `Device` it was created on, so it can release
//! its object exactly once when dropped. What is currently bound lives in `Bindings`, which is
//! owned by the `Context` and passed explicitly to anything that binds or draws.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::backends::headless::{HeadlessStats, HeadlessVisitor};
use super::backends::{BufferTarget, Visitor};
use super::errors::*;

/// A process-unique identifier of a GPU object wrapper.
///
/// Object names handed out by the driver may be recycled once deleted, handles never are,
/// which keeps the binding de-duplication in `Bindings` honest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u32);

impl Handle {
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

struct DeviceInner {
    visitor: RefCell<Box<dyn Visitor>>,
    handles: Cell<u32>,
}

/// A cheap, clonable reference to the graphics backend.
#[derive(Clone)]
pub struct Device(Rc<DeviceInner>);

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Device")
            .field("handles", &self.0.handles.get())
            .finish()
    }
}

impl Device {
    pub fn new(visitor: Box<dyn Visitor>) -> Self {
        Device(Rc::new(DeviceInner {
            visitor: RefCell::new(visitor),
            handles: Cell::new(0),
        }))
    }

    /// Runs `func` with exclusive access to the backend.
    pub(crate) fn visit<F, R>(&self, func: F) -> Result<R>
    where
        F: FnOnce(&mut dyn Visitor) -> Result<R>,
    {
        let mut visitor = self.0.visitor.try_borrow_mut().map_err(|_| {
            Error::Backend("The graphics device is already in use on this thread.".into())
        })?;

        func(&mut **visitor)
    }

    pub(crate) fn next_handle(&self) -> Handle {
        let next = self.0.handles.get() + 1;
        self.0.handles.set(next);
        Handle(next)
    }

    /// Blocks until all submitted commands are complete.
    pub fn flush(&self) -> Result<()> {
        self.visit(|v| v.flush())
    }
}

/// What is currently bound on the device.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub program: Option<Handle>,
    pub vertex_array: Option<Handle>,
    pub array_buffer: Option<Handle>,
    pub element_buffer: Option<Handle>,
}

/// The device together with its binding state.
#[derive(Debug)]
pub struct Context {
    device: Device,
    bindings: Bindings,
}

impl Context {
    pub fn new(visitor: Box<dyn Visitor>) -> Self {
        Context {
            device: Device::new(visitor),
            bindings: Bindings::default(),
        }
    }

    /// Creates a context over a `HeadlessVisitor`, returning its call counters alongside.
    pub fn headless() -> (Self, Rc<HeadlessStats>) {
        let visitor = HeadlessVisitor::new();
        let stats = visitor.stats();
        (Context::new(Box::new(visitor)), stats)
    }

    #[inline]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[inline]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub(crate) fn bind_program(&mut self, handle: Handle, id: u32) -> Result<()> {
        if self.bindings.program == Some(handle) {
            return Ok(());
        }

        self.device.visit(|v| v.use_program(id))?;
        self.bindings.program = Some(handle);
        Ok(())
    }

    pub(crate) fn unbind_program(&mut self) -> Result<()> {
        if self.bindings.program.is_none() {
            return Ok(());
        }

        self.device.visit(|v| v.use_program(0))?;
        self.bindings.program = None;
        Ok(())
    }

    pub(crate) fn bind_vertex_array(&mut self, handle: Handle, id: u32) -> Result<()> {
        if self.bindings.vertex_array == Some(handle) {
            return Ok(());
        }

        self.device.visit(|v| v.bind_vertex_array(id))?;
        self.bindings.vertex_array = Some(handle);
        // The element buffer binding is part of the vertex array state.
        self.bindings.element_buffer = None;
        Ok(())
    }

    pub(crate) fn unbind_vertex_array(&mut self) -> Result<()> {
        if self.bindings.vertex_array.is_none() {
            return Ok(());
        }

        self.device.visit(|v| v.bind_vertex_array(0))?;
        self.bindings.vertex_array = None;
        self.bindings.element_buffer = None;
        Ok(())
    }

    pub(crate) fn bind_buffer(
        &mut self,
        target: BufferTarget,
        handle: Handle,
        id: u32,
    ) -> Result<()> {
        if *self.binding(target) == Some(handle) {
            return Ok(());
        }

        self.device.visit(|v| v.bind_buffer(target, id))?;
        *self.binding(target) = Some(handle);
        Ok(())
    }

    pub(crate) fn unbind_buffer(&mut self, target: BufferTarget) -> Result<()> {
        if self.binding(target).is_none() {
            return Ok(());
        }

        self.device.visit(|v| v.bind_buffer(target, 0))?;
        *self.binding(target) = None;
        Ok(())
    }

    /// Records that `handle` was bound to `target` as a side effect of its creation.
    pub(crate) fn mark_buffer(&mut self, target: BufferTarget, handle: Handle) {
        *self.binding(target) = Some(handle);
    }

    fn binding(&mut self, target: BufferTarget) -> &mut Option<Handle> {
        match target {
            BufferTarget::Array => &mut self.bindings.array_buffer,
            BufferTarget::ElementArray => &mut self.bindings.element_buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let (ctx, _) = Context::headless();
        let a = ctx.device().next_handle();
        let b = ctx.device().clone().next_handle();
        assert!(a != b);
        assert!(a < b);
    }

    #[test]
    fn reentrant_visit() {
        let (ctx, _) = Context::headless();
        let device = ctx.device().clone();
        let rsp = ctx.device().visit(|_| device.visit(|v| v.flush()));
        assert!(rsp.is_err());
    }
}
