// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Index buffer update regions.

Index buffers are the degenerate case of the vertex machinery: one unsigned
component per element, no interleaving.  An [`IndexBufferDescriptor`] pins
down the index width and count; an [`IndexUpdate`] is the staging region,
with plain 1-component cursors over it; `put1l` is the whole protocol for
filling one.
*/

use crate::Error;
use crate::cursors::attribute::{AttributeReader, AttributeWriter};
use crate::formats::ScalarType;
use crate::ranges::InclusiveRange;

/// An index buffer's addressed shape: index width plus element count.
#[derive(Debug, Clone)]
pub struct IndexBufferDescriptor {
    index_type: ScalarType,
    range: InclusiveRange,
    debug_name: &'static str,
}

impl IndexBufferDescriptor {
    /// Describe a buffer of `index_count` indices of `index_type`.
    ///
    /// Fails with [`Error::Invariant`] if `index_type` is not one of the
    /// unsigned integer types (`U8`, `U16`, `U32`) or the count is zero.
    pub fn new(
        index_type: ScalarType,
        index_count: usize,
        debug_name: &'static str,
    ) -> Result<Self, Error> {
        match index_type {
            ScalarType::U8 | ScalarType::U16 | ScalarType::U32 => {}
            _ => {
                return Err(Error::Invariant(
                    "index type must be an unsigned integer type",
                ));
            }
        }
        if index_count == 0 {
            return Err(Error::Invariant("index count must be positive"));
        }
        let range = InclusiveRange::new(0, index_count as i64 - 1)?;
        Ok(Self {
            index_type,
            range,
            debug_name,
        })
    }

    /// The index storage type.
    pub fn index_type(&self) -> ScalarType {
        self.index_type
    }

    /// The buffer's full index range, `[0, index_count - 1]`.
    pub fn range(&self) -> InclusiveRange {
        self.range
    }

    /// Name used in logs.
    pub fn debug_name(&self) -> &'static str {
        self.debug_name
    }
}

/// A staging region replacing all or part of an index buffer.
///
/// # Example
///
/// ```
/// use texels_and_vertices::formats::ScalarType;
/// use texels_and_vertices::updates::index::{IndexBufferDescriptor, IndexUpdate};
///
/// let indices = IndexBufferDescriptor::new(ScalarType::U8, 4, "quad indices")?;
/// let mut update = IndexUpdate::new_replacing_all(&indices);
///
/// let mut w = update.writer()?;
/// for index in [3, 5, 7, 11] {
///     w.put1l(index)?;
/// }
/// assert_eq!(update.data(), &[3, 5, 7, 11]);
/// # Ok::<(), texels_and_vertices::Error>(())
/// ```
#[derive(Debug)]
pub struct IndexUpdate {
    data: Vec<u8>,
    range: InclusiveRange,
    index_type: ScalarType,
}

impl IndexUpdate {
    /// An update replacing the entirety of `indices`.
    pub fn new_replacing_all(indices: &IndexBufferDescriptor) -> Self {
        Self::allocate(indices, indices.range)
    }

    /// An update replacing the indices of `range` only.
    ///
    /// Fails with [`Error::Range`] iff `range` is not included in the
    /// buffer's range.
    pub fn new_replacing_range(
        indices: &IndexBufferDescriptor,
        range: InclusiveRange,
    ) -> Result<Self, Error> {
        if !range.is_included_in(&indices.range) {
            return Err(Error::Range);
        }
        Ok(Self::allocate(indices, range))
    }

    fn allocate(indices: &IndexBufferDescriptor, range: InclusiveRange) -> Self {
        let size = range.interval() as usize * indices.index_type.bytes();
        let size_u64 = size as u64;
        logwise::trace_sync!(
            "IndexUpdate: allocating {size} bytes for {name}",
            size = size_u64,
            name = logwise::privacy::LogIt(indices.debug_name)
        );
        Self {
            data: vec![0; size],
            range,
            index_type: indices.index_type,
        }
    }

    /// The absolute index range this update replaces.
    pub fn range(&self) -> InclusiveRange {
        self.range
    }

    /// The index storage type.
    pub fn index_type(&self) -> ScalarType {
        self.index_type
    }

    /// Byte offset within the target buffer at which the region is to be
    /// copied.
    pub fn byte_offset(&self) -> usize {
        self.range.lower() as usize * self.index_type.bytes()
    }

    /// The staging bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A writing cursor over every staged index, locally addressed from 0.
    pub fn writer(&mut self) -> Result<AttributeWriter<'_>, Error> {
        let local = InclusiveRange::new(0, self.range.interval() - 1)?;
        AttributeWriter::new(
            &mut self.data,
            local,
            0,
            self.index_type.bytes(),
            self.index_type,
            1,
        )
    }

    /// A reading cursor over every staged index, locally addressed from 0.
    pub fn reader(&self) -> Result<AttributeReader<'_>, Error> {
        let local = InclusiveRange::new(0, self.range.interval() - 1)?;
        AttributeReader::new(
            &self.data,
            local,
            0,
            self.index_type.bytes(),
            self.index_type,
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::scalar::read_u32_ne;

    #[test]
    fn byte_indices_land_byte_for_byte() {
        let indices = IndexBufferDescriptor::new(ScalarType::U8, 4, "quad").unwrap();
        let mut update = IndexUpdate::new_replacing_all(&indices);
        assert_eq!(update.byte_offset(), 0);
        assert_eq!(update.data().len(), 4);

        let mut w = update.writer().unwrap();
        for index in [3, 5, 7, 11] {
            w.put1l(index).unwrap();
        }
        assert_eq!(update.data(), &[3, 5, 7, 11]);
    }

    #[test]
    fn wide_indices_use_native_words() {
        let indices = IndexBufferDescriptor::new(ScalarType::U32, 4, "mesh").unwrap();
        let mut update = IndexUpdate::new_replacing_all(&indices);
        assert_eq!(update.data().len(), 16);

        let mut w = update.writer().unwrap();
        for index in [3, 5, 7, 11] {
            w.put1l(index).unwrap();
        }
        for (i, expected) in [3u32, 5, 7, 11].into_iter().enumerate() {
            assert_eq!(read_u32_ne(update.data(), i * 4), expected);
        }

        let mut r = update.reader().unwrap();
        r.seek_to(2);
        assert_eq!(r.get1l().unwrap(), 7);
    }

    #[test]
    fn partial_updates_carry_their_target_offset() {
        let indices = IndexBufferDescriptor::new(ScalarType::U16, 100, "mesh").unwrap();
        let range = InclusiveRange::new(10, 19).unwrap();
        let update = IndexUpdate::new_replacing_range(&indices, range).unwrap();
        assert_eq!(update.data().len(), 10 * 2);
        assert_eq!(update.byte_offset(), 10 * 2);

        let overhang = InclusiveRange::new(95, 100).unwrap();
        assert_eq!(
            IndexUpdate::new_replacing_range(&indices, overhang).err(),
            Some(Error::Range)
        );
    }

    #[test]
    fn descriptor_rejects_signed_and_float_types() {
        for bad in [ScalarType::I8, ScalarType::I32, ScalarType::F16, ScalarType::F32] {
            assert_eq!(
                IndexBufferDescriptor::new(bad, 4, "bad").err(),
                Some(Error::Invariant(
                    "index type must be an unsigned integer type"
                ))
            );
        }
        assert!(IndexBufferDescriptor::new(ScalarType::U16, 0, "empty").is_err());
    }
}
