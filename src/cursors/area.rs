// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
2D strided addressing.

An [`AreaCursor`] seeks through the elements of an *inner* area laid out
inside a larger *outer* area.  The outer area fixes the row stride (moving
one row down advances `outer width * element bytes`), while the inner area
bounds which elements the cursor may visit.  The two areas may be identical;
when they differ, the cursor walks a sub-rectangle of a larger image without
ever computing an offset model other than the full image's.

Coordinates are absolute: the outer area's origin is byte offset zero, even
when its lower bounds are above zero.
*/

use crate::Error;
use crate::cursors::Validity;
use crate::ranges::Area;

/// A cursor over a 2D sub-rectangle of strided elements.
///
/// Iteration via [`next`](Self::next) is row-major and deterministic: x
/// fastest, rows ascending.  One step past the inner area's last element the
/// cursor becomes invalid and stays invalid until an explicit
/// [`seek_to`](Self::seek_to) returns it to range; "before first" and "past
/// last" are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCursor {
    outer: Area,
    inner: Area,
    element_bytes: usize,
    row_byte_span: i64,
    x: i64,
    y: i64,
    byte_offset: i64,
    validity: Validity,
}

impl AreaCursor {
    /// Construct a cursor positioned at the inner area's lower corner.
    ///
    /// Fails with [`Error::Invariant`] if `inner` is not included in
    /// `outer`, or if either of `outer`'s lower bounds is negative.
    /// `element_bytes` may be zero (every offset is then zero).
    pub fn new(outer: Area, inner: Area, element_bytes: usize) -> Result<Self, Error> {
        if !inner.is_included_in(&outer) {
            return Err(Error::Invariant("inner area must be included in outer area"));
        }
        if outer.range_x().lower() < 0 || outer.range_y().lower() < 0 {
            return Err(Error::Invariant(
                "outer area lower bounds must be non-negative",
            ));
        }
        let row_byte_span = outer.range_x().interval() * element_bytes as i64;
        let mut cursor = Self {
            outer,
            inner,
            element_bytes,
            row_byte_span,
            x: 0,
            y: 0,
            byte_offset: 0,
            validity: Validity::OutOfRange,
        };
        cursor.seek_to(inner.range_x().lower(), inner.range_y().lower());
        Ok(cursor)
    }

    /// Seek to absolute coordinates.
    ///
    /// Any coordinates are accepted; positions outside the inner area leave
    /// the cursor invalid until a later seek returns it.
    pub fn seek_to(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
        self.byte_offset = y * self.row_byte_span + x * self.element_bytes as i64;
        self.validity =
            Validity::of(self.inner.range_x().contains(x) && self.inner.range_y().contains(y));
    }

    /// Row-major advance: step right, wrapping to the start of the next row
    /// at the inner area's right edge.
    pub fn next(&mut self) {
        let range_x = self.inner.range_x();
        let (x, y) = if self.x == range_x.upper() {
            (range_x.lower(), self.y + 1)
        } else {
            (self.x + 1, self.y)
        };
        self.seek_to(x, y);
    }

    /// `true` iff the current position lies within the inner area.
    pub fn is_valid(&self) -> bool {
        self.validity.is_in_range()
    }

    /// Current X coordinate; [`Error::InvalidPosition`] while out of range.
    pub fn x(&self) -> Result<i64, Error> {
        if !self.validity.is_in_range() {
            return Err(Error::InvalidPosition);
        }
        Ok(self.x)
    }

    /// Current Y coordinate; [`Error::InvalidPosition`] while out of range.
    pub fn y(&self) -> Result<i64, Error> {
        if !self.validity.is_in_range() {
            return Err(Error::InvalidPosition);
        }
        Ok(self.y)
    }

    /// Byte offset of the current element,
    /// `y * row_byte_span + x * element_bytes`.  Fails with
    /// [`Error::InvalidPosition`] while out of range.
    pub fn byte_offset(&self) -> Result<usize, Error> {
        if !self.validity.is_in_range() {
            return Err(Error::InvalidPosition);
        }
        Ok(self.byte_offset as usize)
    }

    /// Size in bytes of one element.
    pub fn element_bytes(&self) -> usize {
        self.element_bytes
    }

    /// The outer (stride-defining) area.
    pub fn outer(&self) -> Area {
        self.outer
    }

    /// The inner (addressable) area.
    pub fn inner(&self) -> Area {
        self.inner
    }

    /// Bytes a backing region must hold so that every offset reachable
    /// within the outer extent is in bounds: the end of the outer corner
    /// element.
    pub(crate) fn required_capacity(&self) -> usize {
        let end = self.outer.range_y().upper() * self.row_byte_span
            + (self.outer.range_x().upper() + 1) * self.element_bytes as i64;
        end as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::InclusiveRange;

    fn area(x_lower: i64, x_upper: i64, y_lower: i64, y_upper: i64) -> Area {
        Area::new(
            InclusiveRange::new(x_lower, x_upper).unwrap(),
            InclusiveRange::new(y_lower, y_upper).unwrap(),
        )
    }

    #[test]
    fn inner_sub_rectangle_scan() {
        let outer = area(0, 3, 0, 3);
        let inner = area(1, 2, 1, 2);
        let mut c = AreaCursor::new(outer, inner, 4).unwrap();

        assert!(c.is_valid());
        assert_eq!((c.x().unwrap(), c.y().unwrap()), (1, 1));
        assert_eq!(c.byte_offset().unwrap(), 1 * (4 * 4) + 1 * 4);

        c.next();
        assert_eq!((c.x().unwrap(), c.y().unwrap()), (2, 1));
        c.next();
        assert_eq!((c.x().unwrap(), c.y().unwrap()), (1, 2));
        c.next();
        assert_eq!((c.x().unwrap(), c.y().unwrap()), (2, 2));
        c.next();
        assert!(!c.is_valid());
        assert_eq!(c.byte_offset(), Err(Error::InvalidPosition));
    }

    #[test]
    fn full_area_scan_visits_every_element_in_row_major_order() {
        let a = area(0, 3, 0, 1);
        let mut c = AreaCursor::new(a, a, 4).unwrap();
        for y in 0..=1 {
            for x in 0..=3 {
                assert_eq!(c.x().unwrap(), x);
                assert_eq!(c.y().unwrap(), y);
                assert_eq!(c.byte_offset().unwrap() as i64, y * (4 * 4) + x * 4);
                c.next();
            }
        }
        assert!(!c.is_valid());
    }

    #[test]
    fn nonzero_lower_bounds_use_absolute_offsets() {
        let a = area(2, 6, 4, 6);
        let width = a.range_x().interval();
        for element_bytes in [1usize, 2, 3, 4] {
            let c = AreaCursor::new(a, a, element_bytes).unwrap();
            assert_eq!(c.x().unwrap(), 2);
            assert_eq!(c.y().unwrap(), 4);
            assert_eq!(
                c.byte_offset().unwrap() as i64,
                4 * width * element_bytes as i64 + 2 * element_bytes as i64
            );
        }
    }

    #[test]
    fn seek_recovers_validity() {
        let a = area(0, 3, 0, 3);
        let mut c = AreaCursor::new(a, a, 2).unwrap();
        c.seek_to(4, 0);
        assert!(!c.is_valid());
        c.seek_to(0, 4);
        assert!(!c.is_valid());
        c.seek_to(-1, 0);
        assert!(!c.is_valid());
        c.seek_to(3, 3);
        assert!(c.is_valid());
        assert_eq!(c.byte_offset().unwrap(), 3 * 8 + 3 * 2);
    }

    #[test]
    fn inner_must_be_included() {
        let outer = area(0, 3, 0, 3);
        let inner = area(0, 4, 0, 3);
        assert_eq!(
            AreaCursor::new(outer, inner, 4),
            Err(Error::Invariant("inner area must be included in outer area"))
        );
    }

    #[test]
    fn outer_lower_bounds_must_be_non_negative() {
        let a = area(-1, 6, 4, 6);
        assert!(AreaCursor::new(a, a, 4).is_err());
        let a = area(1, 6, -1, 6);
        assert!(AreaCursor::new(a, a, 4).is_err());
    }

    #[test]
    fn zero_element_bytes_is_permitted() {
        let a = area(0, 3, 0, 3);
        let c = AreaCursor::new(a, a, 0).unwrap();
        assert_eq!(c.byte_offset().unwrap(), 0);
        assert_eq!(c.required_capacity(), 0);
    }

    #[test]
    fn required_capacity_covers_outer_corner() {
        let a = area(0, 3, 0, 3);
        let c = AreaCursor::new(a, a, 4).unwrap();
        assert_eq!(c.required_capacity(), 4 * 4 * 4);

        let outer = area(2, 6, 4, 6);
        let c = AreaCursor::new(outer, outer, 2).unwrap();
        // Last row start (6 * width * 2) plus the end of the x=6 element.
        assert_eq!(c.required_capacity() as i64, 6 * 5 * 2 + 7 * 2);
    }
}
