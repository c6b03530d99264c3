// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Staging-region allocation for buffer and texture updates.

An update is the one place this crate allocates: a zeroed, natively
byte-ordered region sized to the extent being replaced, plus the addressing
information a binding layer needs to copy it to the device.  The caller
fills (or drains) the region through the typed cursors the update hands
out; the device copy itself happens elsewhere and is none of our business.
*/

pub mod buffer;
pub mod index;
pub mod texture;
