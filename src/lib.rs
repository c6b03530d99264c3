/*! texels_and_vertices is the staging-memory layer of a GPU middleware stack:
format-aware cursors and codecs for filling and draining the raw byte regions
that back GPU-bound vertex buffers and 2D textures.

A binding layer (the part of a renderer that owns devices, buffers, and
textures) has a recurring problem: it holds a byte region of known extents,
the bytes encode typed elements (normalized fixed-point integers, half
floats, packed 565/5551/4444/10-10-10-2 words, plain ints and floats), and
something has to walk every element in a well-defined order, converting
between the packed representation and logical numbers, without ever reading
or writing outside the addressed region.  That walk is this crate.

# What's here

| Layer | Types | Job |
|-------|-------|-----|
| [`ranges`] | `InclusiveRange`, `Area` | inclusive 1D/2D extents and their inclusion algebra |
| [`cursors::linear`], [`cursors::area`] | `LinearCursor`, `AreaCursor` | pure offset arithmetic: seek/advance/validity, no memory access |
| [`codecs`] | fixed-point, packed, `half::f16` | stateless conversions between wire bits and logical numbers |
| [`cursors::attribute`], [`cursors::texel`] | `AttributeReader/Writer`, `TexelReader/Writer` | an addressing model + a codec + a borrowed byte region = typed sequential get/put |
| [`updates`] | `BufferUpdate`, `TextureUpdate`, `IndexUpdate` | allocate a correctly-sized staging region for a full or partial resource update |

Structural mistakes (inner extent outside outer, region too small, attribute
overrunning its element) fail at construction; after that, per-element access
is allocation-free and does no capacity checks.  Over-iterating a cursor is
reported, not undefined: accessors return
[`Error::InvalidPosition`](Error::InvalidPosition) until a `seek_to` brings
the cursor back in range.

# Example

```
use texels_and_vertices::formats::{ScalarType, TexelFormat};
use texels_and_vertices::updates::buffer::{BufferDescriptor, BufferUpdate, VertexLayout};
use texels_and_vertices::updates::texture::{TextureDescriptor, TextureUpdate};

// Stage a small interleaved vertex buffer...
let mut layout = VertexLayout::new();
layout.add_field("position", ScalarType::F32, 2)?;
layout.add_field("color", ScalarType::U8, 4)?;
let buffer = BufferDescriptor::new(layout, 3, "triangle")?;
let mut update = BufferUpdate::new_replacing_all(&buffer);

let mut positions = update.writer("position")?;
positions.put2f([0.0, 1.0])?;
positions.put2f([-1.0, -1.0])?;
positions.put2f([1.0, -1.0])?;

let mut colors = update.writer("color")?;
while colors.is_valid() {
    colors.put4f([1.0, 0.0, 0.0, 1.0])?;
}

// ...and a texture region, then hand both to the binding layer.
let texture = TextureDescriptor::new(16, 16, TexelFormat::Rgba8U, "brush")?;
let mut tex_update = TextureUpdate::new_replacing_all(&texture);
let mut texels = tex_update.writer()?;
while texels.is_valid() {
    texels.put4f([0.2, 0.4, 0.8, 1.0])?;
}
# Ok::<(), texels_and_vertices::Error>(())
```

# What's not here

No GPU API surface, no device I/O, no shader semantics.  The binding layer
supplies extents and consumes filled regions; everything between is in-memory
arithmetic, synchronous and single-threaded.  Cursors borrow their regions
with ordinary Rust lifetimes, so "the region outlives the cursor" and "no
concurrent mutation mid-scan" are enforced by the borrow checker rather than
by convention.
*/

pub mod codecs;
pub mod cursors;
mod error;
pub mod formats;
pub mod ranges;
pub mod updates;

pub use error::Error;
