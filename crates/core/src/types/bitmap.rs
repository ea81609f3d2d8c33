//! Owned raster buffers

use super::format::PixelFormat;
use crate::errors::{Error, Result};
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BITMAP_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a bitmap allocation, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitmapId(u64);

impl BitmapId {
    fn next() -> Self {
        Self(NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for BitmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// An owned raster buffer.
///
/// A `Bitmap` is not `Clone`: handing one to a pool moves it, so
/// the same allocation can never be pooled twice. Use [`Bitmap::duplicate`]
/// to copy pixels into a fresh allocation.
///
/// The backing allocation may be larger than the current layout needs after
/// [`Bitmap::reconfigure`] shrinks it; `byte_count` reports the layout and
/// `allocation_byte_count` the memory actually held.
pub struct Bitmap {
    id: BitmapId,
    width: u32,
    height: u32,
    format: PixelFormat,
    mutable: bool,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Allocate a zeroed, mutable bitmap
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let size = format.byte_size(width, height)?;
        // byte_size guarantees the size fits in usize
        let len = usize::try_from(size).map_err(|_| Error::SizeOverflow {
            width,
            height,
            format,
        })?;

        Ok(Self {
            id: BitmapId::next(),
            width,
            height,
            format,
            mutable: true,
            pixels: vec![0; len],
        })
    }

    pub fn id(&self) -> BitmapId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Mark the bitmap immutable. Immutable bitmaps cannot be reused.
    pub fn set_immutable(&mut self) {
        self.mutable = false;
    }

    /// Bytes needed by the current width, height and format
    pub fn byte_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * self.format.bytes_per_pixel()
    }

    /// Bytes held by the backing allocation
    pub fn allocation_byte_count(&self) -> u64 {
        self.pixels.len() as u64
    }

    /// Pixels of the current layout
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.byte_count() as usize]
    }

    /// Mutable pixels of the current layout, `None` for immutable bitmaps
    pub fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        if !self.mutable {
            return None;
        }
        let len = self.byte_count() as usize;
        Some(&mut self.pixels[..len])
    }

    /// Reinterpret the existing allocation with a new layout.
    ///
    /// Pixel contents are left as they are; call [`Bitmap::erase`] to clear them.
    pub fn reconfigure(&mut self, width: u32, height: u32, format: PixelFormat) -> Result<()> {
        let required = format.byte_size(width, height)?;
        let available = self.allocation_byte_count();
        if required > available {
            return Err(Error::ReconfigureTooLarge {
                width,
                height,
                format,
                required,
                available,
            });
        }

        self.width = width;
        self.height = height;
        self.format = format;
        Ok(())
    }

    /// Zero every byte of the allocation
    pub fn erase(&mut self) {
        self.pixels.fill(0);
    }

    /// Copy this bitmap into a new mutable allocation with its own id
    pub fn duplicate(&self) -> Bitmap {
        Bitmap {
            id: BitmapId::next(),
            width: self.width,
            height: self.height,
            format: self.format,
            mutable: true,
            pixels: self.pixels.clone(),
        }
    }
}

impl Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bitmap@{}({}x{},{})",
            self.id, self.width, self.height, self.format
        )
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("mutable", &self.mutable)
            .field("allocation_byte_count", &self.pixels.len())
            .finish()
    }
}
