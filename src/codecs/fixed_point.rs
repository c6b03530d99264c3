// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Normalized fixed-point conversions.

An N-bit unsigned integer `v` represents the real number `v / (2^N - 1)`,
covering `[0, 1]`.  An N-bit two's-complement integer represents
`v / (2^(N-1) - 1)`, covering `[-1, 1]`.  Note the denominator is the largest
*positive* value, so the most negative integer lands slightly below -1 and is
clamped on decode.  These are the conversions the GL specifications define
for normalized vertex attributes and texel components.

`bits` is meaningful for 2..=32.  Intermediates are carried in 64-bit
integers so that 32-bit values scale without overflow.  Decoding never
fails; encoding clamps the input into the representable range and rounds to
the nearest integer.
*/

/// Largest value representable in `bits` unsigned bits, as a float.
fn unsigned_scale(bits: u32) -> f64 {
    debug_assert!((2..=32).contains(&bits));
    ((1u64 << bits) - 1) as f64
}

/// Largest positive value representable in `bits` two's-complement bits.
fn signed_scale(bits: u32) -> f64 {
    debug_assert!((2..=32).contains(&bits));
    ((1i64 << (bits - 1)) - 1) as f64
}

/// Decode an unsigned normalized `bits`-bit value to `[0, 1]`.
///
/// # Example
///
/// ```
/// use texels_and_vertices::codecs::fixed_point::unsigned_normalized_to_f64;
///
/// assert_eq!(unsigned_normalized_to_f64(0, 8), 0.0);
/// assert_eq!(unsigned_normalized_to_f64(255, 8), 1.0);
/// ```
pub fn unsigned_normalized_to_f64(value: u64, bits: u32) -> f64 {
    value as f64 / unsigned_scale(bits)
}

/// Decode an unsigned normalized `bits`-bit value to `[0, 1]` as `f32`.
pub fn unsigned_normalized_to_f32(value: u64, bits: u32) -> f32 {
    unsigned_normalized_to_f64(value, bits) as f32
}

/// Encode a real value as unsigned normalized fixed point.
///
/// The input is clamped to `[0, 1]` before scaling, then rounded to the
/// nearest integer.  NaN encodes as 0.
pub fn f64_to_unsigned_normalized(value: f64, bits: u32) -> u64 {
    let c = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (c * unsigned_scale(bits)).round() as u64
}

/// `f32` companion of [`f64_to_unsigned_normalized`].
pub fn f32_to_unsigned_normalized(value: f32, bits: u32) -> u64 {
    f64_to_unsigned_normalized(value as f64, bits)
}

/// Decode a signed normalized `bits`-bit value to `[-1, 1]`.
///
/// The most negative two's-complement value decodes slightly below -1 and is
/// clamped, so `-2^(N-1)` and `-(2^(N-1) - 1)` both decode to -1.0.
///
/// # Example
///
/// ```
/// use texels_and_vertices::codecs::fixed_point::signed_normalized_to_f64;
///
/// assert_eq!(signed_normalized_to_f64(127, 8), 1.0);
/// assert_eq!(signed_normalized_to_f64(-127, 8), -1.0);
/// assert_eq!(signed_normalized_to_f64(-128, 8), -1.0); // clamped
/// ```
pub fn signed_normalized_to_f64(value: i64, bits: u32) -> f64 {
    (value as f64 / signed_scale(bits)).max(-1.0)
}

/// Decode a signed normalized `bits`-bit value to `[-1, 1]` as `f32`.
pub fn signed_normalized_to_f32(value: i64, bits: u32) -> f32 {
    signed_normalized_to_f64(value, bits) as f32
}

/// Encode a real value as signed normalized fixed point.
///
/// The input is clamped to `[-1, 1]` before scaling, then rounded to the
/// nearest integer; the result lies in `[-(2^(N-1) - 1), 2^(N-1) - 1]`.
/// NaN encodes as 0.
pub fn f64_to_signed_normalized(value: f64, bits: u32) -> i64 {
    let c = if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    };
    (c * signed_scale(bits)).round() as i64
}

/// `f32` companion of [`f64_to_signed_normalized`].
pub fn f32_to_signed_normalized(value: f32, bits: u32) -> i64 {
    f64_to_signed_normalized(value as f64, bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_endpoints() {
        for bits in [2, 8, 16, 24, 32] {
            let max = (1u64 << bits) - 1;
            assert_eq!(unsigned_normalized_to_f64(0, bits), 0.0);
            assert_eq!(unsigned_normalized_to_f64(max, bits), 1.0);
            assert_eq!(f64_to_unsigned_normalized(0.0, bits), 0);
            assert_eq!(f64_to_unsigned_normalized(1.0, bits), max);
        }
    }

    #[test]
    fn unsigned_round_trip() {
        // Exhaustive at 8 bits, sampled at the wider widths.
        for v in 0u64..=255 {
            assert_eq!(
                f64_to_unsigned_normalized(unsigned_normalized_to_f64(v, 8), 8),
                v
            );
        }
        for bits in [16u32, 24, 32] {
            let max = (1u64 << bits) - 1;
            for v in [0, 1, 17, max / 3, max / 2, max - 1, max] {
                assert_eq!(
                    f64_to_unsigned_normalized(unsigned_normalized_to_f64(v, bits), bits),
                    v,
                    "bits={bits} v={v}"
                );
            }
        }
    }

    #[test]
    fn signed_round_trip() {
        // The representable encode range is asymmetric: -(2^(N-1)-1) ..= 2^(N-1)-1.
        for v in -127i64..=127 {
            assert_eq!(
                f64_to_signed_normalized(signed_normalized_to_f64(v, 8), 8),
                v
            );
        }
        for bits in [16u32, 24, 32] {
            let max = (1i64 << (bits - 1)) - 1;
            for v in [-max, -max / 2, -1, 0, 1, max / 2, max] {
                assert_eq!(
                    f64_to_signed_normalized(signed_normalized_to_f64(v, bits), bits),
                    v,
                    "bits={bits} v={v}"
                );
            }
        }
    }

    #[test]
    fn signed_minimum_clamps() {
        for bits in [8u32, 16, 24, 32] {
            let min = -(1i64 << (bits - 1));
            assert_eq!(signed_normalized_to_f64(min, bits), -1.0);
            // ...and re-encodes to the symmetric minimum, not the two's-complement one.
            assert_eq!(f64_to_signed_normalized(-1.0, bits), min + 1);
        }
    }

    #[test]
    fn encode_clamps_out_of_range() {
        assert_eq!(f64_to_unsigned_normalized(2.5, 8), 255);
        assert_eq!(f64_to_unsigned_normalized(-0.5, 8), 0);
        assert_eq!(f64_to_signed_normalized(7.0, 8), 127);
        assert_eq!(f64_to_signed_normalized(-7.0, 8), -127);
    }

    #[test]
    fn encode_rounds_to_nearest() {
        // 0.5 * 255 = 127.5, rounds away from zero.
        assert_eq!(f64_to_unsigned_normalized(0.5, 8), 128);
        assert_eq!(f64_to_unsigned_normalized(127.4 / 255.0, 8), 127);
    }

    #[test]
    fn f32_paths_agree() {
        assert_eq!(f32_to_unsigned_normalized(1.0, 16), 65535);
        assert_eq!(unsigned_normalized_to_f32(65535, 16), 1.0);
        assert_eq!(f32_to_signed_normalized(-1.0, 16), -32767);
        assert_eq!(signed_normalized_to_f32(-32768, 16), -1.0);
    }
}
