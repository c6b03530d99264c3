// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Typed cursors over interleaved vertex attributes.

[`AttributeReader`] and [`AttributeWriter`] bind a
[`LinearCursor`](crate::cursors::linear::LinearCursor) plus a scalar storage
type and component count (1-4) to a byte region holding interleaved vertex
elements.  Several cursors, one per attribute, can scan the same region:
each carries the attribute's byte offset into the element and steps by the
full element size.

The accessor surface and per-call contract match the texel cursors
([`crate::cursors::texel`]): check position, convert once, advance.  Type
and bounds checks are paid at construction so the per-element path stays
branch-light.
*/

use crate::Error;
use crate::codecs::scalar;
use crate::cursors::linear::LinearCursor;
use crate::formats::ScalarType;
use crate::ranges::InclusiveRange;

fn checked_cursor(
    region_len: usize,
    range: InclusiveRange,
    attribute_offset: usize,
    element_size: usize,
    scalar: ScalarType,
    components: usize,
) -> Result<LinearCursor, Error> {
    if !(1..=4).contains(&components) {
        return Err(Error::Invariant("component count must be between 1 and 4"));
    }
    if attribute_offset + components * scalar.bytes() > element_size {
        return Err(Error::Invariant(
            "attribute span does not fit inside the element",
        ));
    }
    let cursor = LinearCursor::new(range, attribute_offset, element_size)?;
    let required = cursor.required_capacity();
    if region_len < required {
        return Err(Error::Capacity {
            required,
            actual: region_len,
        });
    }
    Ok(cursor)
}

/// A reading cursor over one attribute of interleaved vertex elements.
#[derive(Debug)]
pub struct AttributeReader<'a> {
    data: &'a [u8],
    cursor: LinearCursor,
    scalar: ScalarType,
    components: usize,
}

/// A writing cursor over one attribute of interleaved vertex elements.
///
/// # Example
///
/// ```
/// use texels_and_vertices::cursors::attribute::AttributeWriter;
/// use texels_and_vertices::formats::ScalarType;
/// use texels_and_vertices::ranges::InclusiveRange;
///
/// // Three elements of 12 bytes each: a 2×f32 position at offset 0,
/// // a 4×u8 color at offset 8.
/// let mut region = vec![0u8; 3 * 12];
/// let range = InclusiveRange::new(0, 2)?;
///
/// let mut positions = AttributeWriter::new(&mut region, range, 0, 12, ScalarType::F32, 2)?;
/// while positions.is_valid() {
///     positions.put2f([1.0, -1.0])?;
/// }
///
/// let mut colors = AttributeWriter::new(&mut region, range, 8, 12, ScalarType::U8, 4)?;
/// while colors.is_valid() {
///     colors.put4f([1.0, 0.0, 0.0, 1.0])?;
/// }
/// # Ok::<(), texels_and_vertices::Error>(())
/// ```
#[derive(Debug)]
pub struct AttributeWriter<'a> {
    data: &'a mut [u8],
    cursor: LinearCursor,
    scalar: ScalarType,
    components: usize,
}

impl<'a> AttributeReader<'a> {
    /// Bind a reader to `data`, positioned at `range.lower()`.
    ///
    /// Fails with [`Error::Invariant`] if the component count is outside
    /// 1-4, the attribute span overruns the element, or the linear-cursor
    /// invariants do not hold; fails with [`Error::Capacity`] if `data`
    /// cannot hold every element of `range`.
    pub fn new(
        data: &'a [u8],
        range: InclusiveRange,
        attribute_offset: usize,
        element_size: usize,
        scalar: ScalarType,
        components: usize,
    ) -> Result<Self, Error> {
        let cursor = checked_cursor(
            data.len(),
            range,
            attribute_offset,
            element_size,
            scalar,
            components,
        )?;
        Ok(Self {
            data,
            cursor,
            scalar,
            components,
        })
    }

    /// The scalar storage type of each component.
    pub fn scalar(&self) -> ScalarType {
        self.scalar
    }

    /// Components per element (1-4).
    pub fn components(&self) -> usize {
        self.components
    }

    /// Seek to an absolute element index; out-of-range indices leave the
    /// cursor invalid.
    pub fn seek_to(&mut self, element: i64) {
        self.cursor.seek_to(element);
    }

    /// `true` iff the current position lies within the range.
    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid()
    }

    /// `true` iff advancing would land on an element within range.
    pub fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    /// Current element index; [`Error::InvalidPosition`] while invalid.
    pub fn element(&self) -> Result<i64, Error> {
        self.cursor.element()
    }

    fn begin(&self, components: usize) -> Result<usize, Error> {
        if self.components != components {
            return Err(Error::Invariant(
                "component count does not match the bound format",
            ));
        }
        self.cursor.byte_offset()
    }

    fn read_normalized(&mut self, out: &mut [f64]) -> Result<(), Error> {
        let offset = self.begin(out.len())?;
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = scalar::read_f64(self.data, offset + i * self.scalar.bytes(), self.scalar);
        }
        self.cursor.next();
        Ok(())
    }

    fn read_raw(&mut self, out: &mut [i64]) -> Result<(), Error> {
        let offset = self.begin(out.len())?;
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = scalar::read_i64(self.data, offset + i * self.scalar.bytes(), self.scalar);
        }
        self.cursor.next();
        Ok(())
    }

    /// Read a 1-component attribute as a raw `i32` and advance.
    pub fn get1i(&mut self) -> Result<i32, Error> {
        Ok(self.get1l()? as i32)
    }

    /// Read a 1-component attribute as a raw `i64` and advance.
    pub fn get1l(&mut self) -> Result<i64, Error> {
        let mut out = [0i64; 1];
        self.read_raw(&mut out)?;
        Ok(out[0])
    }

    /// Read a 1-component attribute as a normalized `f32` and advance.
    pub fn get1f(&mut self) -> Result<f32, Error> {
        Ok(self.get1d()? as f32)
    }

    /// Read a 1-component attribute as a normalized `f64` and advance.
    pub fn get1d(&mut self) -> Result<f64, Error> {
        let mut out = [0.0f64; 1];
        self.read_normalized(&mut out)?;
        Ok(out[0])
    }

    /// Read a 2-component attribute as raw `i32`s and advance.
    pub fn get2i(&mut self, out: &mut [i32; 2]) -> Result<(), Error> {
        let mut wide = [0i64; 2];
        self.read_raw(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as i32;
        }
        Ok(())
    }

    /// Read a 2-component attribute as raw `i64`s and advance.
    pub fn get2l(&mut self, out: &mut [i64; 2]) -> Result<(), Error> {
        self.read_raw(out)
    }

    /// Read a 2-component attribute as normalized `f32`s and advance.
    pub fn get2f(&mut self, out: &mut [f32; 2]) -> Result<(), Error> {
        let mut wide = [0.0f64; 2];
        self.read_normalized(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as f32;
        }
        Ok(())
    }

    /// Read a 2-component attribute as normalized `f64`s and advance.
    pub fn get2d(&mut self, out: &mut [f64; 2]) -> Result<(), Error> {
        self.read_normalized(out)
    }

    /// Read a 3-component attribute as raw `i32`s and advance.
    pub fn get3i(&mut self, out: &mut [i32; 3]) -> Result<(), Error> {
        let mut wide = [0i64; 3];
        self.read_raw(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as i32;
        }
        Ok(())
    }

    /// Read a 3-component attribute as raw `i64`s and advance.
    pub fn get3l(&mut self, out: &mut [i64; 3]) -> Result<(), Error> {
        self.read_raw(out)
    }

    /// Read a 3-component attribute as normalized `f32`s and advance.
    pub fn get3f(&mut self, out: &mut [f32; 3]) -> Result<(), Error> {
        let mut wide = [0.0f64; 3];
        self.read_normalized(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as f32;
        }
        Ok(())
    }

    /// Read a 3-component attribute as normalized `f64`s and advance.
    pub fn get3d(&mut self, out: &mut [f64; 3]) -> Result<(), Error> {
        self.read_normalized(out)
    }

    /// Read a 4-component attribute as raw `i32`s and advance.
    pub fn get4i(&mut self, out: &mut [i32; 4]) -> Result<(), Error> {
        let mut wide = [0i64; 4];
        self.read_raw(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as i32;
        }
        Ok(())
    }

    /// Read a 4-component attribute as raw `i64`s and advance.
    pub fn get4l(&mut self, out: &mut [i64; 4]) -> Result<(), Error> {
        self.read_raw(out)
    }

    /// Read a 4-component attribute as normalized `f32`s and advance.
    pub fn get4f(&mut self, out: &mut [f32; 4]) -> Result<(), Error> {
        let mut wide = [0.0f64; 4];
        self.read_normalized(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as f32;
        }
        Ok(())
    }

    /// Read a 4-component attribute as normalized `f64`s and advance.
    pub fn get4d(&mut self, out: &mut [f64; 4]) -> Result<(), Error> {
        self.read_normalized(out)
    }
}

impl<'a> AttributeWriter<'a> {
    /// Bind a writer to `data`, positioned at `range.lower()`.
    ///
    /// Failure modes are those of [`AttributeReader::new`].
    pub fn new(
        data: &'a mut [u8],
        range: InclusiveRange,
        attribute_offset: usize,
        element_size: usize,
        scalar: ScalarType,
        components: usize,
    ) -> Result<Self, Error> {
        let cursor = checked_cursor(
            data.len(),
            range,
            attribute_offset,
            element_size,
            scalar,
            components,
        )?;
        Ok(Self {
            data,
            cursor,
            scalar,
            components,
        })
    }

    /// The scalar storage type of each component.
    pub fn scalar(&self) -> ScalarType {
        self.scalar
    }

    /// Components per element (1-4).
    pub fn components(&self) -> usize {
        self.components
    }

    /// Seek to an absolute element index; out-of-range indices leave the
    /// cursor invalid.
    pub fn seek_to(&mut self, element: i64) {
        self.cursor.seek_to(element);
    }

    /// `true` iff the current position lies within the range.
    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid()
    }

    /// `true` iff advancing would land on an element within range.
    pub fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    /// Current element index; [`Error::InvalidPosition`] while invalid.
    pub fn element(&self) -> Result<i64, Error> {
        self.cursor.element()
    }

    fn begin(&self, components: usize) -> Result<usize, Error> {
        if self.components != components {
            return Err(Error::Invariant(
                "component count does not match the bound format",
            ));
        }
        self.cursor.byte_offset()
    }

    fn write_normalized(&mut self, values: &[f64]) -> Result<(), Error> {
        let offset = self.begin(values.len())?;
        for (i, v) in values.iter().enumerate() {
            scalar::write_f64(self.data, offset + i * self.scalar.bytes(), self.scalar, *v);
        }
        self.cursor.next();
        Ok(())
    }

    fn write_raw(&mut self, values: &[i64]) -> Result<(), Error> {
        let offset = self.begin(values.len())?;
        for (i, v) in values.iter().enumerate() {
            scalar::write_i64(self.data, offset + i * self.scalar.bytes(), self.scalar, *v);
        }
        self.cursor.next();
        Ok(())
    }

    /// Write a 1-component attribute from a raw `i32` and advance.
    pub fn put1i(&mut self, value: i32) -> Result<(), Error> {
        self.write_raw(&[value as i64])
    }

    /// Write a 1-component attribute from a raw `i64` and advance.
    pub fn put1l(&mut self, value: i64) -> Result<(), Error> {
        self.write_raw(&[value])
    }

    /// Write a 1-component attribute from a normalized `f32` and advance.
    pub fn put1f(&mut self, value: f32) -> Result<(), Error> {
        self.write_normalized(&[value as f64])
    }

    /// Write a 1-component attribute from a normalized `f64` and advance.
    pub fn put1d(&mut self, value: f64) -> Result<(), Error> {
        self.write_normalized(&[value])
    }

    /// Write a 2-component attribute from raw `i32`s and advance.
    pub fn put2i(&mut self, value: [i32; 2]) -> Result<(), Error> {
        self.write_raw(&value.map(|v| v as i64))
    }

    /// Write a 2-component attribute from raw `i64`s and advance.
    pub fn put2l(&mut self, value: [i64; 2]) -> Result<(), Error> {
        self.write_raw(&value)
    }

    /// Write a 2-component attribute from normalized `f32`s and advance.
    pub fn put2f(&mut self, value: [f32; 2]) -> Result<(), Error> {
        self.write_normalized(&value.map(|v| v as f64))
    }

    /// Write a 2-component attribute from normalized `f64`s and advance.
    pub fn put2d(&mut self, value: [f64; 2]) -> Result<(), Error> {
        self.write_normalized(&value)
    }

    /// Write a 3-component attribute from raw `i32`s and advance.
    pub fn put3i(&mut self, value: [i32; 3]) -> Result<(), Error> {
        self.write_raw(&value.map(|v| v as i64))
    }

    /// Write a 3-component attribute from raw `i64`s and advance.
    pub fn put3l(&mut self, value: [i64; 3]) -> Result<(), Error> {
        self.write_raw(&value)
    }

    /// Write a 3-component attribute from normalized `f32`s and advance.
    pub fn put3f(&mut self, value: [f32; 3]) -> Result<(), Error> {
        self.write_normalized(&value.map(|v| v as f64))
    }

    /// Write a 3-component attribute from normalized `f64`s and advance.
    pub fn put3d(&mut self, value: [f64; 3]) -> Result<(), Error> {
        self.write_normalized(&value)
    }

    /// Write a 4-component attribute from raw `i32`s and advance.
    pub fn put4i(&mut self, value: [i32; 4]) -> Result<(), Error> {
        self.write_raw(&value.map(|v| v as i64))
    }

    /// Write a 4-component attribute from raw `i64`s and advance.
    pub fn put4l(&mut self, value: [i64; 4]) -> Result<(), Error> {
        self.write_raw(&value)
    }

    /// Write a 4-component attribute from normalized `f32`s and advance.
    pub fn put4f(&mut self, value: [f32; 4]) -> Result<(), Error> {
        self.write_normalized(&value.map(|v| v as f64))
    }

    /// Write a 4-component attribute from normalized `f64`s and advance.
    pub fn put4d(&mut self, value: [f64; 4]) -> Result<(), Error> {
        self.write_normalized(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: i64, upper: i64) -> InclusiveRange {
        InclusiveRange::new(lower, upper).unwrap()
    }

    #[test]
    fn interleaved_attributes_do_not_collide() {
        // 12-byte elements: position 2×f32 at offset 0, color 4×u8 at offset 8.
        let mut region = vec![0u8; 3 * 12];
        let r = range(0, 2);

        let mut positions =
            AttributeWriter::new(&mut region, r, 0, 12, ScalarType::F32, 2).unwrap();
        let mut i = 0.0f32;
        while positions.is_valid() {
            positions.put2f([i, -i]).unwrap();
            i += 1.0;
        }

        let mut colors = AttributeWriter::new(&mut region, r, 8, 12, ScalarType::U8, 4).unwrap();
        while colors.is_valid() {
            colors.put4l([1, 2, 3, 4]).unwrap();
        }

        let mut positions = AttributeReader::new(&region, r, 0, 12, ScalarType::F32, 2).unwrap();
        let mut colors = AttributeReader::new(&region, r, 8, 12, ScalarType::U8, 4).unwrap();
        for i in 0..3 {
            let mut pos = [0.0f32; 2];
            positions.get2f(&mut pos).unwrap();
            assert_eq!(pos, [i as f32, -(i as f32)]);

            let mut color = [0i64; 4];
            colors.get4l(&mut color).unwrap();
            assert_eq!(color, [1, 2, 3, 4]);
        }
        assert!(!positions.is_valid());
        assert!(!colors.is_valid());
    }

    #[test]
    fn normalized_color_write() {
        let mut region = vec![0u8; 2 * 4];
        let r = range(0, 1);
        let mut w = AttributeWriter::new(&mut region, r, 0, 4, ScalarType::U8, 4).unwrap();
        w.put4f([1.0, 0.0, 0.5, 1.0]).unwrap();
        assert_eq!(&region[0..4], &[255, 0, 128, 255]);
    }

    #[test]
    fn attribute_span_must_fit_element() {
        let region = vec![0u8; 64];
        assert_eq!(
            AttributeReader::new(&region, range(0, 3), 4, 8, ScalarType::F32, 2).err(),
            Some(Error::Invariant(
                "attribute span does not fit inside the element"
            ))
        );
    }

    #[test]
    fn component_count_bounds() {
        let region = vec![0u8; 64];
        assert!(AttributeReader::new(&region, range(0, 3), 0, 8, ScalarType::U8, 0).is_err());
        assert!(AttributeReader::new(&region, range(0, 3), 0, 8, ScalarType::U8, 5).is_err());
    }

    #[test]
    fn region_too_small_is_rejected() {
        let region = vec![0u8; 79];
        assert_eq!(
            AttributeReader::new(&region, range(0, 9), 0, 8, ScalarType::F32, 2).err(),
            Some(Error::Capacity {
                required: 80,
                actual: 79
            })
        );
    }

    #[test]
    fn arity_mismatch_reports_invariant() {
        let region = vec![0u8; 8];
        let mut r = AttributeReader::new(&region, range(0, 1), 0, 4, ScalarType::U8, 4).unwrap();
        assert_eq!(
            r.get1l(),
            Err(Error::Invariant(
                "component count does not match the bound format"
            ))
        );
    }

    #[test]
    fn over_iteration_reports_invalid_position() {
        let mut region = vec![0u8; 4];
        let mut w =
            AttributeWriter::new(&mut region, range(0, 0), 0, 4, ScalarType::F32, 1).unwrap();
        w.put1f(1.0).unwrap();
        assert_eq!(w.put1f(2.0), Err(Error::InvalidPosition));
        w.seek_to(0);
        w.put1f(3.0).unwrap();
    }
}
