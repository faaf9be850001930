//! Vertex and index buffer objects. Both upload their data once on creation.

use std::mem;
use std::slice;

use super::backends::BufferTarget;
use super::device::{Context, Device, Handle};
use super::errors::*;

/// Views a slice of plain values as raw bytes.
pub fn as_bytes<T>(values: &[T]) -> &[u8]
where
    T: Copy,
{
    let len = values.len() * mem::size_of::<T>();
    unsafe { slice::from_raw_parts(values.as_ptr() as *const u8, len) }
}

#[derive(Debug)]
struct BufferObject {
    handle: Handle,
    id: u32,
    target: BufferTarget,
    device: Device,
}

impl BufferObject {
    fn new(ctx: &mut Context, target: BufferTarget, data: &[u8]) -> Result<Self> {
        let device = ctx.device().clone();
        let id = device.visit(|v| v.create_buffer(target, data))?;
        let handle = device.next_handle();

        // Creation leaves the new buffer bound to its target.
        ctx.mark_buffer(target, handle);

        Ok(BufferObject {
            handle,
            id,
            target,
            device,
        })
    }

    fn bind(&self, ctx: &mut Context) -> Result<()> {
        ctx.bind_buffer(self.target, self.handle, self.id)
    }
}

impl Drop for BufferObject {
    fn drop(&mut self) {
        let id = self.id;
        if let Err(err) = self.device.visit(|v| v.delete_buffer(id)) {
            error!("Failed to delete {:?} buffer {}. {}", self.target, id, err);
        }
    }
}

/// A buffer of raw vertex attribute data.
#[derive(Debug)]
pub struct VertexBuffer {
    buf: BufferObject,
    len: usize,
}

impl VertexBuffer {
    /// Creates a vertex buffer and uploads `data` into it.
    pub fn new(ctx: &mut Context, data: &[u8]) -> Result<Self> {
        let buf = BufferObject::new(ctx, BufferTarget::Array, data)?;
        Ok(VertexBuffer {
            buf,
            len: data.len(),
        })
    }

    /// Creates a vertex buffer from a slice of plain values, e.g. `&[f32]`.
    pub fn from_slice<T: Copy>(ctx: &mut Context, values: &[T]) -> Result<Self> {
        Self::new(ctx, as_bytes(values))
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.buf.handle
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.buf.id
    }

    /// The size of the uploaded data in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bind(&self, ctx: &mut Context) -> Result<()> {
        self.buf.bind(ctx)
    }

    pub fn unbind(&self, ctx: &mut Context) -> Result<()> {
        ctx.unbind_buffer(BufferTarget::Array)
    }
}

/// A buffer of `u32` vertex indices.
#[derive(Debug)]
pub struct IndexBuffer {
    buf: BufferObject,
    count: u32,
}

impl IndexBuffer {
    /// Creates an index buffer and uploads `indices` into it.
    ///
    /// The element array binding belongs to the bound vertex array, so bind the vertex array
    /// that should reference these indices first.
    pub fn new(ctx: &mut Context, indices: &[u32]) -> Result<Self> {
        let buf = BufferObject::new(ctx, BufferTarget::ElementArray, as_bytes(indices))?;
        Ok(IndexBuffer {
            buf,
            count: indices.len() as u32,
        })
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.buf.handle
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.buf.id
    }

    /// The number of indices.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bind(&self, ctx: &mut Context) -> Result<()> {
        self.buf.bind(ctx)
    }

    pub fn unbind(&self, ctx: &mut Context) -> Result<()> {
        ctx.unbind_buffer(BufferTarget::ElementArray)
    }
}
