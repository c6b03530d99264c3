// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Format-typed texel cursors over byte regions.

[`TexelReader`] and [`TexelWriter`] bind an [`AreaCursor`] and a
[`TexelFormat`] to a caller-supplied byte region, and expose one get/put
per component count (1-4) and numeric view (`i` = `i32`, `l` = `i64`,
`f` = `f32`, `d` = `f64`).  The float-typed accessors normalize integer and
packed components; the integer-typed accessors traffic in raw field values.

Every successful get/put advances the cursor, so these are *sequential*
accessors: a bulk upload is a seek followed by a run of puts.  Random
access is a [`seek_to`](TexelReader::seek_to) followed by a new run.

Capacity is checked once, at construction, against the *outer* area (the
stride-defining extent), not merely the addressable inner one.  After that
check every reachable offset is known to be in bounds and element access
performs no further capacity tests.

Multi-component gets fill a caller-supplied array in place rather than
returning a fresh aggregate; the single-component forms return the
primitive directly.
*/

use crate::Error;
use crate::codecs::{fixed_point, packed, scalar};
use crate::cursors::area::AreaCursor;
use crate::formats::{PackedKind, TexelFormat, TexelLayout};
use crate::ranges::Area;

fn checked_cursor(
    region_len: usize,
    outer: Area,
    inner: Area,
    format: TexelFormat,
) -> Result<AreaCursor, Error> {
    let cursor = AreaCursor::new(outer, inner, format.bytes_per_texel())?;
    let required = cursor.required_capacity();
    if region_len < required {
        return Err(Error::Capacity {
            required,
            actual: region_len,
        });
    }
    Ok(cursor)
}

fn read_packed_fields(data: &[u8], offset: usize, kind: PackedKind) -> [u32; 4] {
    match kind {
        PackedKind::Rgb565 => {
            let [r, g, b] = packed::unpack_565(scalar::read_u16_ne(data, offset));
            [r, g, b, 0]
        }
        PackedKind::Rgba5551 => packed::unpack_5551(scalar::read_u16_ne(data, offset)),
        PackedKind::Rgba4444 => packed::unpack_4444(scalar::read_u16_ne(data, offset)),
        PackedKind::Rgb10A2 => packed::unpack_1010102(scalar::read_u32_ne(data, offset)),
    }
}

fn write_packed_fields(data: &mut [u8], offset: usize, kind: PackedKind, fields: [u32; 4]) {
    match kind {
        PackedKind::Rgb565 => scalar::write_u16_ne(
            data,
            offset,
            packed::pack_565(fields[0], fields[1], fields[2]),
        ),
        PackedKind::Rgba5551 => scalar::write_u16_ne(
            data,
            offset,
            packed::pack_5551(fields[0], fields[1], fields[2], fields[3]),
        ),
        PackedKind::Rgba4444 => scalar::write_u16_ne(
            data,
            offset,
            packed::pack_4444(fields[0], fields[1], fields[2], fields[3]),
        ),
        PackedKind::Rgb10A2 => scalar::write_u32_ne(
            data,
            offset,
            packed::pack_1010102(fields[0], fields[1], fields[2], fields[3]),
        ),
    }
}

/// A reading cursor over formatted texels in a borrowed byte region.
///
/// # Example
///
/// ```
/// use texels_and_vertices::cursors::texel::{TexelReader, TexelWriter};
/// use texels_and_vertices::formats::TexelFormat;
/// use texels_and_vertices::ranges::Area;
///
/// let area = Area::of_size(2, 2)?;
/// let mut region = vec![0u8; 2 * 2 * 4];
///
/// let mut w = TexelWriter::new(&mut region, area, area, TexelFormat::Rgba8U)?;
/// while w.is_valid() {
///     w.put4f([1.0, 0.0, 0.5, 1.0])?;
/// }
///
/// let mut r = TexelReader::new(&region, area, area, TexelFormat::Rgba8U)?;
/// let mut texel = [0i64; 4];
/// r.get4l(&mut texel)?;
/// assert_eq!(texel, [255, 0, 128, 255]);
/// # Ok::<(), texels_and_vertices::Error>(())
/// ```
#[derive(Debug)]
pub struct TexelReader<'a> {
    data: &'a [u8],
    cursor: AreaCursor,
    format: TexelFormat,
}

/// A writing cursor over formatted texels in a borrowed byte region.
///
/// See [`TexelReader`] for the access model; the two differ only in
/// direction.
#[derive(Debug)]
pub struct TexelWriter<'a> {
    data: &'a mut [u8],
    cursor: AreaCursor,
    format: TexelFormat,
}

impl<'a> TexelReader<'a> {
    /// Bind a reader to `data`, positioned at `inner`'s lower corner.
    ///
    /// Fails with [`Error::Invariant`] for the area invariants of
    /// [`AreaCursor::new`], or [`Error::Capacity`] if `data` cannot hold
    /// the outer extent.
    pub fn new(
        data: &'a [u8],
        outer: Area,
        inner: Area,
        format: TexelFormat,
    ) -> Result<Self, Error> {
        let cursor = checked_cursor(data.len(), outer, inner, format)?;
        Ok(Self {
            data,
            cursor,
            format,
        })
    }

    /// The bound format.
    pub fn format(&self) -> TexelFormat {
        self.format
    }

    /// Seek to absolute coordinates; out-of-range positions leave the
    /// cursor invalid.
    pub fn seek_to(&mut self, x: i64, y: i64) {
        self.cursor.seek_to(x, y);
    }

    /// `true` iff the current position lies within the inner area.
    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid()
    }

    /// Current X coordinate; [`Error::InvalidPosition`] while invalid.
    pub fn x(&self) -> Result<i64, Error> {
        self.cursor.x()
    }

    /// Current Y coordinate; [`Error::InvalidPosition`] while invalid.
    pub fn y(&self) -> Result<i64, Error> {
        self.cursor.y()
    }

    fn begin(&self, components: usize) -> Result<usize, Error> {
        if self.format.components() != components {
            return Err(Error::Invariant(
                "component count does not match the bound format",
            ));
        }
        self.cursor.byte_offset()
    }

    fn read_normalized(&mut self, out: &mut [f64]) -> Result<(), Error> {
        let offset = self.begin(out.len())?;
        match self.format.layout() {
            TexelLayout::Scalar(s) => {
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = scalar::read_f64(self.data, offset + i * s.bytes(), s);
                }
            }
            TexelLayout::Packed(p) => {
                let fields = read_packed_fields(self.data, offset, p);
                for ((slot, field), bits) in out.iter_mut().zip(fields).zip(p.field_bits()) {
                    *slot = fixed_point::unsigned_normalized_to_f64(field as u64, *bits);
                }
            }
        }
        self.cursor.next();
        Ok(())
    }

    fn read_raw(&mut self, out: &mut [i64]) -> Result<(), Error> {
        let offset = self.begin(out.len())?;
        match self.format.layout() {
            TexelLayout::Scalar(s) => {
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = scalar::read_i64(self.data, offset + i * s.bytes(), s);
                }
            }
            TexelLayout::Packed(p) => {
                let fields = read_packed_fields(self.data, offset, p);
                for (slot, field) in out.iter_mut().zip(fields) {
                    *slot = field as i64;
                }
            }
        }
        self.cursor.next();
        Ok(())
    }

    /// Read a 1-component texel as a raw `i32` and advance.
    pub fn get1i(&mut self) -> Result<i32, Error> {
        Ok(self.get1l()? as i32)
    }

    /// Read a 1-component texel as a raw `i64` and advance.
    pub fn get1l(&mut self) -> Result<i64, Error> {
        let mut out = [0i64; 1];
        self.read_raw(&mut out)?;
        Ok(out[0])
    }

    /// Read a 1-component texel as a normalized `f32` and advance.
    pub fn get1f(&mut self) -> Result<f32, Error> {
        Ok(self.get1d()? as f32)
    }

    /// Read a 1-component texel as a normalized `f64` and advance.
    pub fn get1d(&mut self) -> Result<f64, Error> {
        let mut out = [0.0f64; 1];
        self.read_normalized(&mut out)?;
        Ok(out[0])
    }

    /// Read a 2-component texel as raw `i32`s and advance.
    pub fn get2i(&mut self, out: &mut [i32; 2]) -> Result<(), Error> {
        let mut wide = [0i64; 2];
        self.read_raw(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as i32;
        }
        Ok(())
    }

    /// Read a 2-component texel as raw `i64`s and advance.
    pub fn get2l(&mut self, out: &mut [i64; 2]) -> Result<(), Error> {
        self.read_raw(out)
    }

    /// Read a 2-component texel as normalized `f32`s and advance.
    pub fn get2f(&mut self, out: &mut [f32; 2]) -> Result<(), Error> {
        let mut wide = [0.0f64; 2];
        self.read_normalized(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as f32;
        }
        Ok(())
    }

    /// Read a 2-component texel as normalized `f64`s and advance.
    pub fn get2d(&mut self, out: &mut [f64; 2]) -> Result<(), Error> {
        self.read_normalized(out)
    }

    /// Read a 3-component texel as raw `i32`s and advance.
    pub fn get3i(&mut self, out: &mut [i32; 3]) -> Result<(), Error> {
        let mut wide = [0i64; 3];
        self.read_raw(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as i32;
        }
        Ok(())
    }

    /// Read a 3-component texel as raw `i64`s and advance.
    pub fn get3l(&mut self, out: &mut [i64; 3]) -> Result<(), Error> {
        self.read_raw(out)
    }

    /// Read a 3-component texel as normalized `f32`s and advance.
    pub fn get3f(&mut self, out: &mut [f32; 3]) -> Result<(), Error> {
        let mut wide = [0.0f64; 3];
        self.read_normalized(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as f32;
        }
        Ok(())
    }

    /// Read a 3-component texel as normalized `f64`s and advance.
    pub fn get3d(&mut self, out: &mut [f64; 3]) -> Result<(), Error> {
        self.read_normalized(out)
    }

    /// Read a 4-component texel as raw `i32`s and advance.
    pub fn get4i(&mut self, out: &mut [i32; 4]) -> Result<(), Error> {
        let mut wide = [0i64; 4];
        self.read_raw(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as i32;
        }
        Ok(())
    }

    /// Read a 4-component texel as raw `i64`s and advance.
    pub fn get4l(&mut self, out: &mut [i64; 4]) -> Result<(), Error> {
        self.read_raw(out)
    }

    /// Read a 4-component texel as normalized `f32`s and advance.
    pub fn get4f(&mut self, out: &mut [f32; 4]) -> Result<(), Error> {
        let mut wide = [0.0f64; 4];
        self.read_normalized(&mut wide)?;
        for (slot, w) in out.iter_mut().zip(wide) {
            *slot = w as f32;
        }
        Ok(())
    }

    /// Read a 4-component texel as normalized `f64`s and advance.
    pub fn get4d(&mut self, out: &mut [f64; 4]) -> Result<(), Error> {
        self.read_normalized(out)
    }
}

impl<'a> TexelWriter<'a> {
    /// Bind a writer to `data`, positioned at `inner`'s lower corner.
    ///
    /// Fails with [`Error::Invariant`] for the area invariants of
    /// [`AreaCursor::new`], or [`Error::Capacity`] if `data` cannot hold
    /// the outer extent.
    pub fn new(
        data: &'a mut [u8],
        outer: Area,
        inner: Area,
        format: TexelFormat,
    ) -> Result<Self, Error> {
        let cursor = checked_cursor(data.len(), outer, inner, format)?;
        Ok(Self {
            data,
            cursor,
            format,
        })
    }

    /// The bound format.
    pub fn format(&self) -> TexelFormat {
        self.format
    }

    /// Seek to absolute coordinates; out-of-range positions leave the
    /// cursor invalid.
    pub fn seek_to(&mut self, x: i64, y: i64) {
        self.cursor.seek_to(x, y);
    }

    /// `true` iff the current position lies within the inner area.
    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid()
    }

    /// Current X coordinate; [`Error::InvalidPosition`] while invalid.
    pub fn x(&self) -> Result<i64, Error> {
        self.cursor.x()
    }

    /// Current Y coordinate; [`Error::InvalidPosition`] while invalid.
    pub fn y(&self) -> Result<i64, Error> {
        self.cursor.y()
    }

    fn begin(&self, components: usize) -> Result<usize, Error> {
        if self.format.components() != components {
            return Err(Error::Invariant(
                "component count does not match the bound format",
            ));
        }
        self.cursor.byte_offset()
    }

    fn write_normalized(&mut self, values: &[f64]) -> Result<(), Error> {
        let offset = self.begin(values.len())?;
        match self.format.layout() {
            TexelLayout::Scalar(s) => {
                for (i, v) in values.iter().enumerate() {
                    scalar::write_f64(self.data, offset + i * s.bytes(), s, *v);
                }
            }
            TexelLayout::Packed(p) => {
                let mut fields = [0u32; 4];
                for ((field, v), bits) in fields.iter_mut().zip(values).zip(p.field_bits()) {
                    *field = fixed_point::f64_to_unsigned_normalized(*v, *bits) as u32;
                }
                write_packed_fields(self.data, offset, p, fields);
            }
        }
        self.cursor.next();
        Ok(())
    }

    fn write_raw(&mut self, values: &[i64]) -> Result<(), Error> {
        let offset = self.begin(values.len())?;
        match self.format.layout() {
            TexelLayout::Scalar(s) => {
                for (i, v) in values.iter().enumerate() {
                    scalar::write_i64(self.data, offset + i * s.bytes(), s, *v);
                }
            }
            TexelLayout::Packed(p) => {
                // Truncating by design; the pack functions mask each field.
                let mut fields = [0u32; 4];
                for (field, v) in fields.iter_mut().zip(values) {
                    *field = *v as u32;
                }
                write_packed_fields(self.data, offset, p, fields);
            }
        }
        self.cursor.next();
        Ok(())
    }

    /// Write a 1-component texel from a raw `i32` and advance.
    pub fn put1i(&mut self, value: i32) -> Result<(), Error> {
        self.write_raw(&[value as i64])
    }

    /// Write a 1-component texel from a raw `i64` and advance.
    pub fn put1l(&mut self, value: i64) -> Result<(), Error> {
        self.write_raw(&[value])
    }

    /// Write a 1-component texel from a normalized `f32` and advance.
    pub fn put1f(&mut self, value: f32) -> Result<(), Error> {
        self.write_normalized(&[value as f64])
    }

    /// Write a 1-component texel from a normalized `f64` and advance.
    pub fn put1d(&mut self, value: f64) -> Result<(), Error> {
        self.write_normalized(&[value])
    }

    /// Write a 2-component texel from raw `i32`s and advance.
    pub fn put2i(&mut self, value: [i32; 2]) -> Result<(), Error> {
        self.write_raw(&value.map(|v| v as i64))
    }

    /// Write a 2-component texel from raw `i64`s and advance.
    pub fn put2l(&mut self, value: [i64; 2]) -> Result<(), Error> {
        self.write_raw(&value)
    }

    /// Write a 2-component texel from normalized `f32`s and advance.
    pub fn put2f(&mut self, value: [f32; 2]) -> Result<(), Error> {
        self.write_normalized(&value.map(|v| v as f64))
    }

    /// Write a 2-component texel from normalized `f64`s and advance.
    pub fn put2d(&mut self, value: [f64; 2]) -> Result<(), Error> {
        self.write_normalized(&value)
    }

    /// Write a 3-component texel from raw `i32`s and advance.
    pub fn put3i(&mut self, value: [i32; 3]) -> Result<(), Error> {
        self.write_raw(&value.map(|v| v as i64))
    }

    /// Write a 3-component texel from raw `i64`s and advance.
    pub fn put3l(&mut self, value: [i64; 3]) -> Result<(), Error> {
        self.write_raw(&value)
    }

    /// Write a 3-component texel from normalized `f32`s and advance.
    pub fn put3f(&mut self, value: [f32; 3]) -> Result<(), Error> {
        self.write_normalized(&value.map(|v| v as f64))
    }

    /// Write a 3-component texel from normalized `f64`s and advance.
    pub fn put3d(&mut self, value: [f64; 3]) -> Result<(), Error> {
        self.write_normalized(&value)
    }

    /// Write a 4-component texel from raw `i32`s and advance.
    pub fn put4i(&mut self, value: [i32; 4]) -> Result<(), Error> {
        self.write_raw(&value.map(|v| v as i64))
    }

    /// Write a 4-component texel from raw `i64`s and advance.
    pub fn put4l(&mut self, value: [i64; 4]) -> Result<(), Error> {
        self.write_raw(&value)
    }

    /// Write a 4-component texel from normalized `f32`s and advance.
    pub fn put4f(&mut self, value: [f32; 4]) -> Result<(), Error> {
        self.write_normalized(&value.map(|v| v as f64))
    }

    /// Write a 4-component texel from normalized `f64`s and advance.
    pub fn put4d(&mut self, value: [f64; 4]) -> Result<(), Error> {
        self.write_normalized(&value)
    }
}
