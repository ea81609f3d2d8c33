//! Size-class best fit strategy

use crate::strategy::store::GroupedStore;
use crate::strategy::traits::LruPoolStrategy;
use parking_lot::RwLock;
use tilepool_core::{Bitmap, PixelFormat};

/// Largest size class, as a multiple of the requested bytes, that may serve a request
pub const MAX_SIZE_MULTIPLE: u64 = 8;

/// Size class: layout bytes within one pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct SizeKey {
    format: PixelFormat,
    size: u64,
}

/// Pools bitmaps by layout size and format.
///
/// A bitmap is classed by the bytes of its current layout, not by its
/// allocation, so a bitmap that was reconfigured smaller is always found
/// again by its own width, height and format. A request is served by the
/// smallest class that holds it, as long as that class is at most
/// [`MAX_SIZE_MULTIPLE`] times the request. The allocation is never smaller
/// than the class, so reconfiguring to the request stays within it.
pub struct SizeConfigStrategy {
    store: RwLock<GroupedStore<SizeKey>>,
}

impl SizeConfigStrategy {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(GroupedStore::new()),
        }
    }

    /// Formats whose allocations can be reconfigured to `format`, in preference order
    fn compatible_formats(format: PixelFormat) -> &'static [PixelFormat] {
        match format {
            PixelFormat::Argb8888 => &[PixelFormat::Argb8888, PixelFormat::RgbaF16],
            PixelFormat::RgbaF16 => &[PixelFormat::RgbaF16],
            PixelFormat::Alpha8 => &[PixelFormat::Alpha8],
            PixelFormat::Rgb565 => &[PixelFormat::Rgb565],
            PixelFormat::Argb4444 => &[PixelFormat::Argb4444],
            PixelFormat::Rgba1010102 => &[PixelFormat::Rgba1010102],
        }
    }

    fn find_key(
        store: &GroupedStore<SizeKey>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Option<SizeKey> {
        let required = format.byte_size(width, height).ok()?;
        let largest = required.saturating_mul(MAX_SIZE_MULTIPLE);

        Self::compatible_formats(format)
            .iter()
            .find_map(|&candidate| {
                let lower = SizeKey {
                    format: candidate,
                    size: required,
                };
                let upper = SizeKey {
                    format: candidate,
                    size: largest,
                };
                store.first_key_in(lower..=upper).copied()
            })
    }

    fn class_of(bitmap: &Bitmap) -> SizeKey {
        SizeKey {
            format: bitmap.format(),
            size: bitmap.byte_count(),
        }
    }

    fn describe(size: u64, format: PixelFormat) -> String {
        format!("[{size}]({format})")
    }
}

impl Default for SizeConfigStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl LruPoolStrategy for SizeConfigStrategy {
    fn put(&self, bitmap: Bitmap) {
        let key = Self::class_of(&bitmap);
        self.store.write().insert(key, bitmap);
    }

    fn get(&self, width: u32, height: u32, format: PixelFormat) -> Option<Bitmap> {
        let mut store = self.store.write();
        let key = Self::find_key(&store, width, height, format)?;
        let mut bitmap = store.take_newest(&key)?;

        if let Err(e) = bitmap.reconfigure(width, height, format) {
            tracing::warn!(
                bitmap = %bitmap,
                error = %e,
                "Pooled bitmap could not be reconfigured, keeping it pooled"
            );
            store.insert(key, bitmap);
            return None;
        }

        Some(bitmap)
    }

    fn exist(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        let store = self.store.read();
        Self::find_key(&store, width, height, format).is_some()
    }

    fn remove_last(&self) -> Option<Bitmap> {
        self.store.write().take_oldest()
    }

    fn log_bitmap(&self, bitmap: &Bitmap) -> String {
        let key = Self::class_of(bitmap);
        Self::describe(key.size, key.format)
    }

    fn log_request(&self, width: u32, height: u32, format: Option<PixelFormat>) -> String {
        let format = format.unwrap_or(PixelFormat::DEFAULT);
        let size = u64::from(width)
            .saturating_mul(u64::from(height))
            .saturating_mul(format.bytes_per_pixel());
        Self::describe(size, format)
    }

    fn get_size(&self, bitmap: &Bitmap) -> u64 {
        bitmap.allocation_byte_count()
    }

    fn len(&self) -> usize {
        self.store.read().len()
    }
}

impl std::fmt::Debug for SizeConfigStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizeConfigStrategy")
            .field("len", &self.len())
            .finish()
    }
}
