// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Linear element addressing.

A [`LinearCursor`] addresses a 1D sequence of fixed-size elements within an
inclusive range.  The cursor may additionally carry an *attribute offset*,
a byte offset into each element, so that one interleaved buffer can be
scanned per-attribute by several independently constructed cursors.
*/

use crate::Error;
use crate::cursors::Validity;
use crate::ranges::InclusiveRange;

/// A cursor over a 1D run of fixed-size elements.
///
/// The cursor is an offset machine only: it computes byte offsets and tracks
/// validity, but holds no reference to memory.  Positions outside the range
/// are representable: seeking there simply marks the cursor invalid, and
/// the position and offset accessors refuse to answer until a later
/// [`seek_to`](Self::seek_to) returns it to range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCursor {
    range: InclusiveRange,
    attribute_offset: usize,
    element_size: usize,
    element: i64,
    byte_offset: i64,
    validity: Validity,
}

impl LinearCursor {
    /// Construct a cursor positioned at `range.lower()`.
    ///
    /// Fails with [`Error::Invariant`] if the range's lower bound is
    /// negative, `element_size` is zero, or `attribute_offset` does not fall
    /// inside an element.
    pub fn new(
        range: InclusiveRange,
        attribute_offset: usize,
        element_size: usize,
    ) -> Result<Self, Error> {
        if range.lower() < 0 {
            return Err(Error::Invariant("range lower bound must be non-negative"));
        }
        if element_size == 0 {
            return Err(Error::Invariant("element size must be positive"));
        }
        if attribute_offset >= element_size {
            return Err(Error::Invariant(
                "attribute offset must fall inside the element",
            ));
        }
        let mut cursor = Self {
            range,
            attribute_offset,
            element_size,
            element: 0,
            byte_offset: 0,
            validity: Validity::OutOfRange,
        };
        cursor.seek_to(range.lower());
        Ok(cursor)
    }

    /// Seek to an absolute element index.
    ///
    /// Any index is accepted; indices outside the range leave the cursor
    /// invalid until a later seek returns it.
    pub fn seek_to(&mut self, element: i64) {
        self.element = element;
        self.byte_offset =
            element * self.element_size as i64 + self.attribute_offset as i64;
        self.validity = Validity::of(self.range.contains(element));
    }

    /// Advance to the next element.  One step past the upper bound the
    /// cursor becomes invalid and stays so.
    pub fn next(&mut self) {
        self.seek_to(self.element + 1);
    }

    /// `true` iff advancing would land on an element within range.
    pub fn has_next(&self) -> bool {
        self.element + 1 <= self.range.upper()
    }

    /// `true` iff the current position lies within the range.
    pub fn is_valid(&self) -> bool {
        self.validity.is_in_range()
    }

    /// The current element index.  Fails with [`Error::InvalidPosition`]
    /// while the cursor is out of range.
    pub fn element(&self) -> Result<i64, Error> {
        if !self.validity.is_in_range() {
            return Err(Error::InvalidPosition);
        }
        Ok(self.element)
    }

    /// The byte offset of the current element's attribute,
    /// `element * element_size + attribute_offset`.  Fails with
    /// [`Error::InvalidPosition`] while the cursor is out of range.
    pub fn byte_offset(&self) -> Result<usize, Error> {
        if !self.validity.is_in_range() {
            return Err(Error::InvalidPosition);
        }
        Ok(self.byte_offset as usize)
    }

    /// The range this cursor may visit.
    pub fn range(&self) -> InclusiveRange {
        self.range
    }

    /// Size in bytes of one element.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Bytes the range's elements span, counted from offset zero.  This is
    /// what a backing region must hold for every reachable offset to be in
    /// bounds.
    pub(crate) fn required_capacity(&self) -> usize {
        (self.range.upper() as usize + 1) * self.element_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: i64, upper: i64) -> InclusiveRange {
        InclusiveRange::new(lower, upper).unwrap()
    }

    #[test]
    fn offsets_with_attribute() {
        let mut c = LinearCursor::new(range(0, 9), 4, 8).unwrap();
        assert!(c.is_valid());
        assert_eq!(c.byte_offset().unwrap(), 4);
        c.seek_to(5);
        assert_eq!(c.byte_offset().unwrap(), 5 * 8 + 4);
        assert_eq!(c.element().unwrap(), 5);
    }

    #[test]
    fn has_next_until_upper() {
        let mut c = LinearCursor::new(range(0, 9), 0, 8).unwrap();
        for expected in 0..=9 {
            assert_eq!(c.element().unwrap(), expected);
            assert_eq!(c.has_next(), expected < 9);
            c.next();
        }
        assert!(!c.is_valid());
        assert_eq!(c.element(), Err(Error::InvalidPosition));
        assert_eq!(c.byte_offset(), Err(Error::InvalidPosition));
    }

    #[test]
    fn seek_recovers_validity() {
        let mut c = LinearCursor::new(range(2, 4), 0, 2).unwrap();
        c.seek_to(17);
        assert!(!c.is_valid());
        c.seek_to(3);
        assert!(c.is_valid());
        assert_eq!(c.byte_offset().unwrap(), 6);
    }

    #[test]
    fn nonzero_lower_bound_starts_there() {
        let c = LinearCursor::new(range(3, 7), 1, 4).unwrap();
        assert_eq!(c.element().unwrap(), 3);
        assert_eq!(c.byte_offset().unwrap(), 3 * 4 + 1);
    }

    #[test]
    fn construction_invariants() {
        assert_eq!(
            LinearCursor::new(range(-1, 4), 0, 4),
            Err(Error::Invariant("range lower bound must be non-negative"))
        );
        assert_eq!(
            LinearCursor::new(range(0, 4), 0, 0),
            Err(Error::Invariant("element size must be positive"))
        );
        assert_eq!(
            LinearCursor::new(range(0, 4), 4, 4),
            Err(Error::Invariant(
                "attribute offset must fall inside the element"
            ))
        );
    }

    #[test]
    fn required_capacity_covers_range() {
        let c = LinearCursor::new(range(0, 9), 4, 8).unwrap();
        assert_eq!(c.required_capacity(), 80);
        let c = LinearCursor::new(range(2, 6), 0, 3).unwrap();
        assert_eq!(c.required_capacity(), 21);
    }
}
