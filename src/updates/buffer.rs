// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Vertex buffer layouts and update regions.

A [`VertexLayout`] names the attributes of an interleaved vertex element,
each a scalar type and a component count, and derives their byte offsets
and the element size.  A [`BufferDescriptor`] pairs a layout with an
element count, standing in for the GPU-side buffer this crate never
touches.  A [`BufferUpdate`] is the staging region for replacing all or a
sub-range of such a buffer, with per-attribute cursors over its contents.
*/

use crate::Error;
use crate::cursors::attribute::{AttributeReader, AttributeWriter};
use crate::formats::ScalarType;
use crate::ranges::InclusiveRange;

#[derive(Debug, Clone)]
struct VertexField {
    name: &'static str,
    scalar: ScalarType,
    components: usize,
    offset: usize,
}

/// Describes the layout of one interleaved vertex element.
///
/// Fields are laid out in the order they are added, with no padding; the
/// element size is the sum of the field sizes.
///
/// # Example
///
/// ```
/// use texels_and_vertices::formats::ScalarType;
/// use texels_and_vertices::updates::buffer::VertexLayout;
///
/// let mut layout = VertexLayout::new();
/// layout.add_field("position", ScalarType::F32, 3)?;
/// layout.add_field("color", ScalarType::U8, 4)?;
/// assert_eq!(layout.element_size(), 16);
/// # Ok::<(), texels_and_vertices::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VertexLayout {
    fields: Vec<VertexField>,
}

impl VertexLayout {
    /// Creates a new, empty vertex layout.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a named field of `components` scalars to the end of the element.
    ///
    /// Fails with [`Error::Invariant`] on a duplicate name or a component
    /// count outside 1-4.
    pub fn add_field(
        &mut self,
        name: &'static str,
        scalar: ScalarType,
        components: usize,
    ) -> Result<(), Error> {
        if !(1..=4).contains(&components) {
            return Err(Error::Invariant("component count must be between 1 and 4"));
        }
        if self.fields.iter().any(|f| f.name == name) {
            return Err(Error::Invariant("duplicate vertex field name"));
        }
        let offset = self.element_size();
        self.fields.push(VertexField {
            name,
            scalar,
            components,
            offset,
        });
        Ok(())
    }

    /// Size in bytes of one interleaved element.
    pub fn element_size(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.components * f.scalar.bytes())
            .sum()
    }

    fn field(&self, name: &str) -> Option<&VertexField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Byte offset of the named field within the element, if present.
    pub fn field_offset(&self, name: &str) -> Option<usize> {
        self.field(name).map(|f| f.offset)
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// A vertex buffer's addressed shape: layout plus element count.
///
/// This is the resource stand-in handed to the update allocators; the
/// GPU-side object it mirrors lives entirely in the binding layer.
#[derive(Debug, Clone)]
pub struct BufferDescriptor {
    layout: VertexLayout,
    range: InclusiveRange,
    debug_name: &'static str,
}

impl BufferDescriptor {
    /// Describe a buffer of `element_count` elements of `layout`.
    ///
    /// Fails with [`Error::Invariant`] if the layout is empty or the count
    /// is zero.
    pub fn new(
        layout: VertexLayout,
        element_count: usize,
        debug_name: &'static str,
    ) -> Result<Self, Error> {
        if layout.element_size() == 0 {
            return Err(Error::Invariant("vertex layout has no fields"));
        }
        if element_count == 0 {
            return Err(Error::Invariant("buffer element count must be positive"));
        }
        let range = InclusiveRange::new(0, element_count as i64 - 1)?;
        Ok(Self {
            layout,
            range,
            debug_name,
        })
    }

    /// The buffer's full element range, `[0, element_count - 1]`.
    pub fn range(&self) -> InclusiveRange {
        self.range
    }

    /// The element layout.
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Name used in logs.
    pub fn debug_name(&self) -> &'static str {
        self.debug_name
    }
}

/// A staging region replacing all or part of a vertex buffer.
///
/// The region is zeroed at allocation and natively byte-ordered.  Fill it
/// through [`writer`](Self::writer) cursors, then hand
/// [`data`](Self::data)/[`byte_offset`](Self::byte_offset) to the binding
/// layer for the device copy.
#[derive(Debug)]
pub struct BufferUpdate {
    data: Vec<u8>,
    range: InclusiveRange,
    layout: VertexLayout,
    element_size: usize,
}

impl BufferUpdate {
    /// An update replacing the entirety of `buffer`.
    pub fn new_replacing_all(buffer: &BufferDescriptor) -> Self {
        Self::allocate(buffer, buffer.range)
    }

    /// An update replacing the elements of `range` only.
    ///
    /// Fails with [`Error::Range`] iff `range` is not included in the
    /// buffer's range.
    pub fn new_replacing_range(
        buffer: &BufferDescriptor,
        range: InclusiveRange,
    ) -> Result<Self, Error> {
        if !range.is_included_in(&buffer.range) {
            return Err(Error::Range);
        }
        Ok(Self::allocate(buffer, range))
    }

    fn allocate(buffer: &BufferDescriptor, range: InclusiveRange) -> Self {
        let element_size = buffer.layout.element_size();
        let size = range.interval() as usize * element_size;
        let size_u64 = size as u64;
        logwise::trace_sync!(
            "BufferUpdate: allocating {size} bytes for {name}",
            size = size_u64,
            name = logwise::privacy::LogIt(buffer.debug_name)
        );
        Self {
            data: vec![0; size],
            range,
            layout: buffer.layout.clone(),
            element_size,
        }
    }

    /// The absolute element range this update replaces.
    pub fn range(&self) -> InclusiveRange {
        self.range
    }

    /// Size in bytes of one element.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Byte offset within the target buffer at which the region is to be
    /// copied, `range.lower * element_size`.
    pub fn byte_offset(&self) -> usize {
        self.range.lower() as usize * self.element_size
    }

    /// The staging bytes, sized `range.interval() * element_size`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A writing cursor over the named field, covering every element of the
    /// update.
    ///
    /// Element indices seen by the cursor are update-local, starting at 0
    /// regardless of where the update lands in the target buffer.  Fails
    /// with [`Error::Invariant`] for an unknown field name.
    pub fn writer(&mut self, field: &str) -> Result<AttributeWriter<'_>, Error> {
        let (offset, scalar, components) = self.field_shape(field)?;
        let local = InclusiveRange::new(0, self.range.interval() - 1)?;
        AttributeWriter::new(
            &mut self.data,
            local,
            offset,
            self.element_size,
            scalar,
            components,
        )
    }

    /// A reading cursor over the named field; the counterpart of
    /// [`writer`](Self::writer) for draining a downloaded region.
    pub fn reader(&self, field: &str) -> Result<AttributeReader<'_>, Error> {
        let (offset, scalar, components) = self.field_shape(field)?;
        let local = InclusiveRange::new(0, self.range.interval() - 1)?;
        AttributeReader::new(
            &self.data,
            local,
            offset,
            self.element_size,
            scalar,
            components,
        )
    }

    fn field_shape(&self, field: &str) -> Result<(usize, ScalarType, usize), Error> {
        let f = self
            .layout
            .field(field)
            .ok_or(Error::Invariant("no such vertex field"))?;
        Ok((f.offset, f.scalar, f.components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> VertexLayout {
        let mut layout = VertexLayout::new();
        layout.add_field("position", ScalarType::F32, 2).unwrap();
        layout.add_field("color", ScalarType::U8, 4).unwrap();
        layout
    }

    #[test]
    fn field_offsets_accumulate() {
        let layout = layout();
        assert_eq!(layout.element_size(), 12);
        assert_eq!(layout.field_offset("position"), Some(0));
        assert_eq!(layout.field_offset("color"), Some(8));
        assert_eq!(layout.field_offset("normal"), None);
    }

    #[test]
    fn layout_rejects_bad_fields() {
        let mut layout = layout();
        assert_eq!(
            layout.add_field("color", ScalarType::U8, 4),
            Err(Error::Invariant("duplicate vertex field name"))
        );
        assert_eq!(
            layout.add_field("weights", ScalarType::F32, 5),
            Err(Error::Invariant("component count must be between 1 and 4"))
        );
    }

    #[test]
    fn replacing_all_covers_the_buffer() {
        let buffer = BufferDescriptor::new(layout(), 10, "quad mesh").unwrap();
        let update = BufferUpdate::new_replacing_all(&buffer);
        assert_eq!(update.data().len(), 10 * 12);
        assert_eq!(update.range(), buffer.range());
        assert_eq!(update.byte_offset(), 0);
    }

    #[test]
    fn replacing_range_is_sized_to_the_range() {
        let buffer = BufferDescriptor::new(layout(), 10, "quad mesh").unwrap();
        let range = InclusiveRange::new(4, 6).unwrap();
        let update = BufferUpdate::new_replacing_range(&buffer, range).unwrap();
        assert_eq!(update.data().len(), 3 * 12);
        assert_eq!(update.byte_offset(), 4 * 12);
    }

    #[test]
    fn replacing_range_rejects_overhang() {
        let buffer = BufferDescriptor::new(layout(), 10, "quad mesh").unwrap();
        let range = InclusiveRange::new(4, 10).unwrap();
        assert_eq!(
            BufferUpdate::new_replacing_range(&buffer, range).err(),
            Some(Error::Range)
        );
    }

    #[test]
    fn writer_fills_the_named_field() {
        let buffer = BufferDescriptor::new(layout(), 2, "quad mesh").unwrap();
        let mut update = BufferUpdate::new_replacing_all(&buffer);
        {
            let mut colors = update.writer("color").unwrap();
            while colors.is_valid() {
                colors.put4l([0x10, 0x20, 0x30, 0x40]).unwrap();
            }
        }
        // Color lives at offset 8 of each 12-byte element.
        assert_eq!(&update.data()[8..12], &[0x10, 0x20, 0x30, 0x40]);
        assert_eq!(&update.data()[20..24], &[0x10, 0x20, 0x30, 0x40]);
        assert_eq!(&update.data()[0..8], &[0; 8]);

        let mut colors = update.reader("color").unwrap();
        let mut color = [0i64; 4];
        colors.get4l(&mut color).unwrap();
        assert_eq!(color, [0x10, 0x20, 0x30, 0x40]);
    }

    #[test]
    fn unknown_field_is_an_invariant_error() {
        let buffer = BufferDescriptor::new(layout(), 2, "quad mesh").unwrap();
        let mut update = BufferUpdate::new_replacing_all(&buffer);
        assert_eq!(
            update.writer("normal").err(),
            Some(Error::Invariant("no such vertex field"))
        );
    }

    #[test]
    fn descriptor_invariants() {
        assert!(BufferDescriptor::new(VertexLayout::new(), 4, "empty").is_err());
        assert!(BufferDescriptor::new(layout(), 0, "zero").is_err());
    }

    #[test]
    fn sub_range_updates_use_local_indices() {
        let buffer = BufferDescriptor::new(layout(), 10, "quad mesh").unwrap();
        let range = InclusiveRange::new(7, 9).unwrap();
        let mut update = BufferUpdate::new_replacing_range(&buffer, range).unwrap();
        let mut positions = update.writer("position").unwrap();
        assert_eq!(positions.element().unwrap(), 0);
        let mut n = 0;
        while positions.is_valid() {
            positions.put2f([n as f32, 0.0]).unwrap();
            n += 1;
        }
        assert_eq!(n, 3);
    }
}
