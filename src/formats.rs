// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Element format definitions for vertex attributes and texels.

Two closed sums describe every binary encoding the cursors understand:

- [`ScalarType`] is one component's storage: 8/16/32-bit two's-complement or
  unsigned integers, binary16 half floats, or binary32 floats.  Integer
  components double as normalized fixed-point values: the float-typed
  accessors normalize them, the integer-typed accessors hand back raw bits.
- [`TexelFormat`] is a whole texel: 1-4 components of one [`ScalarType`], or
  one of the four packed multi-field words (565, 5551, 4444, 10-10-10-2)
  where the components share a single 16- or 32-bit word.

Formats are plain enums rather than one type per format so that dispatch
sites can `match` exhaustively; adding a format is a compile error at every
site that has not considered it.

All multi-byte encodings are stored in the host's native byte order.
*/

pub use half::f16;

/// Storage encoding of a single component.
///
/// The `I`/`U` types are dual-interpretation: raw integers through the
/// integer-typed cursor accessors, normalized fixed-point (`[-1, 1]` /
/// `[0, 1]`) through the float-typed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Signed 8-bit integer; normalized range `[-1, 1]`.
    I8,
    /// Unsigned 8-bit integer; normalized range `[0, 1]`.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// IEEE 754-2008 binary16 ([`f16`]).
    F16,
    /// IEEE 754 binary32.
    F32,
}

impl ScalarType {
    /// Storage size of one component, in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            ScalarType::I8 | ScalarType::U8 => 1,
            ScalarType::I16 | ScalarType::U16 | ScalarType::F16 => 2,
            ScalarType::I32 | ScalarType::U32 | ScalarType::F32 => 4,
        }
    }
}

/// A packed multi-field word layout.
///
/// Fields are packed most-significant-first in component order; see
/// [`crate::codecs::packed`] for the exact bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackedKind {
    /// 16-bit word, 5-6-5 bits of r, g, b.
    Rgb565,
    /// 16-bit word, 5-5-5 bits of r, g, b and 1 bit of a.
    Rgba5551,
    /// 16-bit word, 4 bits per field.
    Rgba4444,
    /// 32-bit word, 10-10-10 bits of r, g, b and 2 bits of a.
    Rgb10A2,
}

impl PackedKind {
    /// Significant bits of each field, component order.
    pub(crate) const fn field_bits(self) -> &'static [u32] {
        match self {
            PackedKind::Rgb565 => &[5, 6, 5],
            PackedKind::Rgba5551 => &[5, 5, 5, 1],
            PackedKind::Rgba4444 => &[4, 4, 4, 4],
            PackedKind::Rgb10A2 => &[10, 10, 10, 2],
        }
    }

    pub(crate) const fn word_bytes(self) -> usize {
        match self {
            PackedKind::Rgb565 | PackedKind::Rgba5551 | PackedKind::Rgba4444 => 2,
            PackedKind::Rgb10A2 => 4,
        }
    }
}

/// How a texel's bytes are laid out: independent scalar components, or one
/// shared packed word.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TexelLayout {
    Scalar(ScalarType),
    Packed(PackedKind),
}

/// A texel format: component count crossed with per-component storage, plus
/// the packed formats.
///
/// Naming follows the component letters (R, Rg, Rgb, Rgba), then the
/// per-component bit width, then the storage family: `I` signed integer,
/// `U` unsigned integer, `F` float.  `Rgba8U` is four unsigned bytes;
/// `Rg16F` is two half floats; [`TexelFormat::Rgb10A2`] is a single packed
/// 32-bit word.
///
/// # Example
///
/// ```
/// use texels_and_vertices::formats::TexelFormat;
///
/// assert_eq!(TexelFormat::Rgba8U.components(), 4);
/// assert_eq!(TexelFormat::Rgba8U.bytes_per_texel(), 4);
/// assert_eq!(TexelFormat::Rgb565.components(), 3);
/// assert_eq!(TexelFormat::Rgb565.bytes_per_texel(), 2);
/// assert_eq!(TexelFormat::Rgba32F.bytes_per_texel(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TexelFormat {
    R8I,
    R8U,
    R16I,
    R16U,
    R16F,
    R32I,
    R32U,
    R32F,
    Rg8I,
    Rg8U,
    Rg16I,
    Rg16U,
    Rg16F,
    Rg32I,
    Rg32U,
    Rg32F,
    Rgb8I,
    Rgb8U,
    Rgb16I,
    Rgb16U,
    Rgb16F,
    Rgb32I,
    Rgb32U,
    Rgb32F,
    Rgba8I,
    Rgba8U,
    Rgba16I,
    Rgba16U,
    Rgba16F,
    Rgba32I,
    Rgba32U,
    Rgba32F,
    /// Packed 5-6-5 in a 16-bit word.
    Rgb565,
    /// Packed 5-5-5-1 in a 16-bit word.
    Rgba5551,
    /// Packed 4-4-4-4 in a 16-bit word.
    Rgba4444,
    /// Packed 10-10-10-2 in a 32-bit word.
    Rgb10A2,
}

impl TexelFormat {
    /// Number of components a texel of this format carries (1-4).
    pub const fn components(self) -> usize {
        use TexelFormat::*;
        match self {
            R8I | R8U | R16I | R16U | R16F | R32I | R32U | R32F => 1,
            Rg8I | Rg8U | Rg16I | Rg16U | Rg16F | Rg32I | Rg32U | Rg32F => 2,
            Rgb8I | Rgb8U | Rgb16I | Rgb16U | Rgb16F | Rgb32I | Rgb32U | Rgb32F | Rgb565 => 3,
            Rgba8I | Rgba8U | Rgba16I | Rgba16U | Rgba16F | Rgba32I | Rgba32U | Rgba32F
            | Rgba5551 | Rgba4444 | Rgb10A2 => 4,
        }
    }

    /// Total storage of one texel, in bytes.
    pub const fn bytes_per_texel(self) -> usize {
        match self.layout() {
            TexelLayout::Scalar(s) => self.components() * s.bytes(),
            TexelLayout::Packed(p) => p.word_bytes(),
        }
    }

    pub(crate) const fn layout(self) -> TexelLayout {
        use TexelFormat::*;
        match self {
            R8I | Rg8I | Rgb8I | Rgba8I => TexelLayout::Scalar(ScalarType::I8),
            R8U | Rg8U | Rgb8U | Rgba8U => TexelLayout::Scalar(ScalarType::U8),
            R16I | Rg16I | Rgb16I | Rgba16I => TexelLayout::Scalar(ScalarType::I16),
            R16U | Rg16U | Rgb16U | Rgba16U => TexelLayout::Scalar(ScalarType::U16),
            R16F | Rg16F | Rgb16F | Rgba16F => TexelLayout::Scalar(ScalarType::F16),
            R32I | Rg32I | Rgb32I | Rgba32I => TexelLayout::Scalar(ScalarType::I32),
            R32U | Rg32U | Rgb32U | Rgba32U => TexelLayout::Scalar(ScalarType::U32),
            R32F | Rg32F | Rgb32F | Rgba32F => TexelLayout::Scalar(ScalarType::F32),
            Rgb565 => TexelLayout::Packed(PackedKind::Rgb565),
            Rgba5551 => TexelLayout::Packed(PackedKind::Rgba5551),
            Rgba4444 => TexelLayout::Packed(PackedKind::Rgba4444),
            Rgb10A2 => TexelLayout::Packed(PackedKind::Rgb10A2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_sizes() {
        assert_eq!(ScalarType::I8.bytes(), 1);
        assert_eq!(ScalarType::U16.bytes(), 2);
        assert_eq!(ScalarType::F16.bytes(), 2);
        assert_eq!(ScalarType::U32.bytes(), 4);
        assert_eq!(ScalarType::F32.bytes(), 4);
    }

    #[test]
    fn texel_sizes() {
        assert_eq!(TexelFormat::R8U.bytes_per_texel(), 1);
        assert_eq!(TexelFormat::Rgb8U.bytes_per_texel(), 3);
        assert_eq!(TexelFormat::Rgba16F.bytes_per_texel(), 8);
        assert_eq!(TexelFormat::Rgba32F.bytes_per_texel(), 16);
        assert_eq!(TexelFormat::Rgb565.bytes_per_texel(), 2);
        assert_eq!(TexelFormat::Rgba5551.bytes_per_texel(), 2);
        assert_eq!(TexelFormat::Rgba4444.bytes_per_texel(), 2);
        assert_eq!(TexelFormat::Rgb10A2.bytes_per_texel(), 4);
    }

    #[test]
    fn packed_field_tables_match_their_formats() {
        for format in [
            TexelFormat::Rgb565,
            TexelFormat::Rgba5551,
            TexelFormat::Rgba4444,
            TexelFormat::Rgb10A2,
        ] {
            let TexelLayout::Packed(kind) = format.layout() else {
                panic!("{format:?} is not packed");
            };
            assert_eq!(kind.field_bits().len(), format.components());
            let total: u32 = kind.field_bits().iter().sum();
            assert_eq!(total as usize, format.bytes_per_texel() * 8);
        }
    }
}
