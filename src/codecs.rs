// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Stateless numeric codecs.

Everything here is a pure function over integers and floats; no codec holds
state, allocates, or fails at runtime.  The cursor layer composes these with
an addressing model to produce typed element access.
*/

pub mod fixed_point;
pub mod packed;
pub(crate) mod scalar;
