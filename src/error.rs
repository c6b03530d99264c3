// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Errors reported by cursors, codec-bearing accessors, and update allocators.

The failure modes here are deliberately few.  Everything structural is caught
at construction time; per-element accesses can only fail by being out of
position (or by asking a cursor for a component count it was not built with).
Nothing in this crate retries.
*/

/// The error type for cursor construction, element access, and update
/// allocation.
///
/// Variants map onto the three phases where things can go wrong:
///
/// * Construction: [`Error::Invariant`] and [`Error::Capacity`].  These are
///   fatal to the construction; there is nothing to retry.
/// * Element access: [`Error::InvalidPosition`].  The cursor itself remains
///   usable; a corrective [`seek_to`](crate::cursors::area::AreaCursor::seek_to)
///   returns it to a valid state.
/// * Update allocation: [`Error::Range`], when the requested sub-extent is
///   not included in the resource's extent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A structural precondition was violated at construction time, or a
    /// typed accessor was called with a component count that does not match
    /// the bound format.
    #[error("invariant violated: {0}")]
    Invariant(&'static str),

    /// The backing byte region is smaller than the outer extent requires.
    ///
    /// This is checked once, when a byte-region cursor is constructed.
    /// After the check passes, offset arithmetic is trusted for the life of
    /// the cursor and no per-access capacity checks occur.
    #[error("byte region holds {actual} bytes but the addressed extent requires {required}")]
    Capacity {
        /// Bytes the outer extent can address.
        required: usize,
        /// Bytes the region actually holds.
        actual: usize,
    },

    /// A get/put (or a position read) was attempted while the cursor lies
    /// outside its addressable extent.
    ///
    /// This signals over-iteration by the caller.  The cursor and its region
    /// are still usable after a corrective seek.
    #[error("cursor position is outside the addressable extent")]
    InvalidPosition,

    /// An update's sub-extent is not included in the resource's full extent.
    #[error("update extent is not included in the resource extent")]
    Range,
}
