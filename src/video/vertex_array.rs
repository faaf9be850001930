//! Vertex array objects, which remember how vertex buffers map onto attribute slots.

use super::assets::prelude::*;
use super::backends::VertexAttribPointer;
use super::buffer::VertexBuffer;
use super::device::{Context, Device, Handle};
use super::errors::*;

#[derive(Debug)]
pub struct VertexArray {
    handle: Handle,
    id: u32,
    device: Device,
    attributes: Vec<VertexAttribPointer>,
}

impl VertexArray {
    pub fn new(ctx: &mut Context) -> Result<Self> {
        let device = ctx.device().clone();
        let id = device.visit(|v| v.create_vertex_array())?;

        Ok(VertexArray {
            handle: device.next_handle(),
            id,
            device,
            attributes: Vec::new(),
        })
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The attribute slots configured so far, ordered by slot index.
    #[inline]
    pub fn attributes(&self) -> &[VertexAttribPointer] {
        &self.attributes
    }

    pub fn bind(&self, ctx: &mut Context) -> Result<()> {
        ctx.bind_vertex_array(self.handle, self.id)
    }

    pub fn unbind(&self, ctx: &mut Context) -> Result<()> {
        ctx.unbind_vertex_array()
    }

    /// Attaches `vb` to this vertex array. Element `i` of `layout` becomes attribute slot
    /// `i`, read with the layout stride at the element's offset.
    ///
    /// Leaves both this vertex array and `vb` bound.
    pub fn add_buffer(
        &mut self,
        ctx: &mut Context,
        vb: &VertexBuffer,
        layout: &VertexLayout,
    ) -> Result<()> {
        if layout.is_empty() {
            return Err(Error::EmptyLayout);
        }

        if layout.len() > MAX_VERTEX_ATTRIBUTES {
            return Err(Error::TooManyAttributes(layout.len(), MAX_VERTEX_ATTRIBUTES));
        }

        self.bind(ctx)?;
        vb.bind(ctx)?;

        let stride = layout.stride();
        for (index, (offset, element)) in layout.iter().enumerate() {
            let attribute = VertexAttribPointer {
                index: index as u32,
                size: element.size,
                format: element.format,
                normalized: element.normalized,
                stride,
                offset,
            };

            self.device.visit(|v| v.vertex_attrib_pointer(&attribute))?;

            match self
                .attributes
                .binary_search_by_key(&attribute.index, |v| v.index)
            {
                Ok(i) => self.attributes[i] = attribute,
                Err(i) => self.attributes.insert(i, attribute),
            }
        }

        Ok(())
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        let id = self.id;
        if let Err(err) = self.device.visit(|v| v.delete_vertex_array(id)) {
            error!("Failed to delete vertex array {}. {}", id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_layout() {
        let (mut ctx, stats) = Context::headless();
        let vb = VertexBuffer::from_slice(&mut ctx, &[0.0f32; 3]).unwrap();
        let mut va = VertexArray::new(&mut ctx).unwrap();

        match va.add_buffer(&mut ctx, &vb, &VertexLayout::new()) {
            Err(Error::EmptyLayout) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(stats.attribute_pointers.get(), 0);
    }

    #[test]
    fn too_many_attributes() {
        let (mut ctx, _) = Context::headless();
        let vb = VertexBuffer::from_slice(&mut ctx, &[0.0f32; 3]).unwrap();
        let mut va = VertexArray::new(&mut ctx).unwrap();

        let mut layout = VertexLayout::new();
        for _ in 0..(MAX_VERTEX_ATTRIBUTES + 1) {
            layout.push::<f32>(1);
        }

        match va.add_buffer(&mut ctx, &vb, &layout) {
            Err(Error::TooManyAttributes(17, 16)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rebinding_resets_element_buffer() {
        let (mut ctx, _) = Context::headless();
        let a = VertexArray::new(&mut ctx).unwrap();
        let b = VertexArray::new(&mut ctx).unwrap();

        a.bind(&mut ctx).unwrap();
        let ib = super::super::buffer::IndexBuffer::new(&mut ctx, &[0, 1, 2]).unwrap();
        assert_eq!(ctx.bindings().element_buffer, Some(ib.handle()));

        b.bind(&mut ctx).unwrap();
        assert_eq!(ctx.bindings().vertex_array, Some(b.handle()));
        assert_eq!(ctx.bindings().element_buffer, None);
    }
}
