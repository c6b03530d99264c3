// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
2D texture update regions.

A [`TextureDescriptor`] stands in for a GPU texture: dimensions and texel
format.  A [`TextureUpdate`] is the staging region for replacing the whole
texture or a sub-area of it.  The region is *dense*, sized and strided to
the update area alone; the binding layer places it at the update's
absolute area during the device copy, so the cursors handed out here work
in update-local coordinates starting at (0, 0).
*/

use crate::Error;
use crate::cursors::texel::{TexelReader, TexelWriter};
use crate::formats::TexelFormat;
use crate::ranges::Area;

/// A 2D texture's addressed shape: dimensions plus texel format.
#[derive(Debug, Clone)]
pub struct TextureDescriptor {
    width: u16,
    height: u16,
    format: TexelFormat,
    area: Area,
    debug_name: &'static str,
}

impl TextureDescriptor {
    /// Describe a `width × height` texture of `format` texels.
    ///
    /// Fails with [`Error::Invariant`] if either dimension is zero.
    pub fn new(
        width: u16,
        height: u16,
        format: TexelFormat,
        debug_name: &'static str,
    ) -> Result<Self, Error> {
        let area = Area::of_size(width as i64, height as i64)?;
        Ok(Self {
            width,
            height,
            format,
            area,
            debug_name,
        })
    }

    /// Width in texels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The texel format.
    pub fn format(&self) -> TexelFormat {
        self.format
    }

    /// The texture's full area, `[0, width-1] × [0, height-1]`.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Name used in logs.
    pub fn debug_name(&self) -> &'static str {
        self.debug_name
    }
}

/// A cube map's addressed shape: face edge length plus texel format.
///
/// Cube faces are square and uniformly sized, so one descriptor covers all
/// six; which face an update lands on is the binding layer's parameter at
/// copy time, not part of the staged region.
#[derive(Debug, Clone)]
pub struct TextureCubeDescriptor {
    size: u16,
    format: TexelFormat,
    area: Area,
    debug_name: &'static str,
}

impl TextureCubeDescriptor {
    /// Describe a cube map with `size × size` faces of `format` texels.
    ///
    /// Fails with [`Error::Invariant`] if `size` is zero.
    pub fn new(size: u16, format: TexelFormat, debug_name: &'static str) -> Result<Self, Error> {
        let area = Area::of_size(size as i64, size as i64)?;
        Ok(Self {
            size,
            format,
            area,
            debug_name,
        })
    }

    /// Edge length of each face, in texels.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// The texel format.
    pub fn format(&self) -> TexelFormat {
        self.format
    }

    /// One face's full area, `[0, size-1] × [0, size-1]`.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Name used in logs.
    pub fn debug_name(&self) -> &'static str {
        self.debug_name
    }
}

/// A staging region replacing all or a sub-area of a texture.
///
/// # Example
///
/// ```
/// use texels_and_vertices::formats::TexelFormat;
/// use texels_and_vertices::updates::texture::{TextureDescriptor, TextureUpdate};
///
/// let texture = TextureDescriptor::new(4, 4, TexelFormat::Rgba8U, "splash")?;
/// let mut update = TextureUpdate::new_replacing_all(&texture);
///
/// let mut w = update.writer()?;
/// while w.is_valid() {
///     w.put4f([1.0, 0.5, 0.25, 1.0])?;
/// }
/// assert_eq!(update.data().len(), 4 * 4 * 4);
/// # Ok::<(), texels_and_vertices::Error>(())
/// ```
#[derive(Debug)]
pub struct TextureUpdate {
    data: Vec<u8>,
    area: Area,
    format: TexelFormat,
}

impl TextureUpdate {
    /// An update replacing the entirety of `texture`.
    pub fn new_replacing_all(texture: &TextureDescriptor) -> Self {
        Self::allocate(texture.format, texture.area, texture.debug_name)
    }

    /// An update replacing `area` only (absolute texture coordinates).
    ///
    /// Fails with [`Error::Range`] iff `area` is not included in the
    /// texture's area.
    pub fn new_replacing_area(texture: &TextureDescriptor, area: Area) -> Result<Self, Error> {
        if !area.is_included_in(&texture.area) {
            return Err(Error::Range);
        }
        Ok(Self::allocate(texture.format, area, texture.debug_name))
    }

    /// An update replacing the entirety of one face of `cube`.
    pub fn new_replacing_all_cube(cube: &TextureCubeDescriptor) -> Self {
        Self::allocate(cube.format, cube.area, cube.debug_name)
    }

    /// An update replacing `area` of one face of `cube` (absolute face
    /// coordinates).
    ///
    /// Fails with [`Error::Range`] iff `area` is not included in the face's
    /// area.
    pub fn new_replacing_area_cube(
        cube: &TextureCubeDescriptor,
        area: Area,
    ) -> Result<Self, Error> {
        if !area.is_included_in(&cube.area) {
            return Err(Error::Range);
        }
        Ok(Self::allocate(cube.format, area, cube.debug_name))
    }

    fn allocate(format: TexelFormat, area: Area, debug_name: &'static str) -> Self {
        let size = area.width() as usize * area.height() as usize * format.bytes_per_texel();
        let size_u64 = size as u64;
        logwise::trace_sync!(
            "TextureUpdate: allocating {size} bytes for {name}",
            size = size_u64,
            name = logwise::privacy::LogIt(debug_name)
        );
        Self {
            data: vec![0; size],
            area,
            format,
        }
    }

    /// The absolute sub-area of the texture this update replaces.
    pub fn area(&self) -> Area {
        self.area
    }

    /// The texel format.
    pub fn format(&self) -> TexelFormat {
        self.format
    }

    /// The staging bytes, sized `width × height × bytes_per_texel` of the
    /// update area.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A writing cursor over the whole region, in update-local coordinates
    /// (`[0, w-1] × [0, h-1]`).
    pub fn writer(&mut self) -> Result<TexelWriter<'_>, Error> {
        let local = Area::of_size(self.area.width(), self.area.height())?;
        TexelWriter::new(&mut self.data, local, local, self.format)
    }

    /// A reading cursor over the whole region; the counterpart of
    /// [`writer`](Self::writer) for draining a downloaded region.
    pub fn reader(&self) -> Result<TexelReader<'_>, Error> {
        let local = Area::of_size(self.area.width(), self.area.height())?;
        TexelReader::new(&self.data, local, local, self.format)
    }
}
