//! Describes how the bytes of a vertex buffer are read as vertex attributes.

use smallvec::SmallVec;

/// The minimum number of vertex attributes every OpenGL 3.x implementation supports.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

/// The data type in the vertex component.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VertexFormat {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Float,
}

impl VertexFormat {
    /// The size in bytes of a single component.
    pub fn size(self) -> u32 {
        match self {
            VertexFormat::Byte | VertexFormat::UByte => 1,
            VertexFormat::Short | VertexFormat::UShort => 2,
            VertexFormat::Int | VertexFormat::UInt | VertexFormat::Float => 4,
        }
    }
}

/// Rust types that can be pushed into a `VertexLayout`.
pub trait VertexComponent {
    const FORMAT: VertexFormat;
    const NORMALIZED: bool;
}

impl VertexComponent for f32 {
    const FORMAT: VertexFormat = VertexFormat::Float;
    const NORMALIZED: bool = false;
}

impl VertexComponent for u32 {
    const FORMAT: VertexFormat = VertexFormat::UInt;
    const NORMALIZED: bool = false;
}

impl VertexComponent for i32 {
    const FORMAT: VertexFormat = VertexFormat::Int;
    const NORMALIZED: bool = false;
}

impl VertexComponent for u8 {
    const FORMAT: VertexFormat = VertexFormat::UByte;
    const NORMALIZED: bool = true;
}

/// The details of a vertex attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexElement {
    /// The data type of each component of this element.
    pub format: VertexFormat,
    /// The number of components per generic vertex element.
    pub size: u8,
    /// Whether fixed-point data values should be normalized.
    pub normalized: bool,
}

impl VertexElement {
    /// The size in bytes of this element.
    pub fn byte_len(&self) -> u32 {
        u32::from(self.size) * self.format.size()
    }
}

/// `VertexLayout` defines how a single vertex structure looks like. It is an ordered
/// collection of elements, each of them becomes one attribute slot when the layout is
/// attached to a `VertexArray`.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct VertexLayout {
    stride: u32,
    offsets: SmallVec<[u32; 4]>,
    elements: SmallVec<[VertexElement; 4]>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends `size` components of type `T`.
    pub fn push<T: VertexComponent>(&mut self, size: u8) -> &mut Self {
        self.with(T::FORMAT, size, T::NORMALIZED)
    }

    /// Appends an element with explicit format and normalization.
    pub fn with(&mut self, format: VertexFormat, size: u8, normalized: bool) -> &mut Self {
        assert!(size > 0 && size <= 4);

        let element = VertexElement {
            format,
            size,
            normalized,
        };

        self.offsets.push(self.stride);
        self.elements.push(element);
        self.stride += element.byte_len();
        self
    }

    /// Stride of single vertex structure.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Returns the number of elements in the layout.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Relative byte offset of the element at `index`.
    pub fn offset(&self, index: usize) -> Option<u32> {
        self.offsets.get(index).cloned()
    }

    pub fn element(&self, index: usize) -> Option<VertexElement> {
        self.elements.get(index).cloned()
    }

    /// Iterates over `(offset, element)` pairs in declaration order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (u32, VertexElement)> + 'a {
        self.offsets
            .iter()
            .cloned()
            .zip(self.elements.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_only() {
        let mut layout = VertexLayout::new();
        layout.push::<f32>(3);

        assert_eq!(layout.stride(), 12);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.offset(0), Some(0));
        assert_eq!(layout.offset(1), None);

        let element = layout.element(0).unwrap();
        assert_eq!(element.format, VertexFormat::Float);
        assert_eq!(element.size, 3);
        assert_eq!(element.normalized, false);
    }

    #[test]
    fn interleaved() {
        let mut layout = VertexLayout::new();
        layout.push::<f32>(3).push::<f32>(2).push::<u8>(4);

        assert_eq!(layout.stride(), 24);
        let offsets: Vec<_> = layout.iter().map(|(offset, _)| offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);

        let color = layout.element(2).unwrap();
        assert_eq!(color.format, VertexFormat::UByte);
        assert!(color.normalized);
    }

    #[test]
    #[should_panic]
    fn zero_components() {
        VertexLayout::new().push::<f32>(0);
    }
}
