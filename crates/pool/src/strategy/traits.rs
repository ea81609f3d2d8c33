//! Core pooling strategy trait definition

use tilepool_core::{Bitmap, PixelFormat};

/// Strategy for storing and matching reusable bitmaps.
///
/// Implementations are shared between threads. `put`, `get` and
/// `remove_last` are mutually exclusive; `exist` observes a consistent
/// snapshot and may run alongside other readers. Strategies never evict on
/// their own: byte budgets are enforced by the pool driving them.
pub trait LruPoolStrategy: Send + Sync {
    /// Take ownership of `bitmap` and mark it most recently used
    fn put(&self, bitmap: Bitmap);

    /// Remove and return a bitmap that can hold a `width` x `height` raster
    /// in `format`, laid out for that request
    fn get(&self, width: u32, height: u32, format: PixelFormat) -> Option<Bitmap>;

    /// Whether `get` with the same arguments would currently succeed
    fn exist(&self, width: u32, height: u32, format: PixelFormat) -> bool;

    /// Remove and return the least recently put bitmap
    fn remove_last(&self) -> Option<Bitmap>;

    /// Describe the size class of `bitmap` for logging
    fn log_bitmap(&self, bitmap: &Bitmap) -> String;

    /// Describe the size class a request would map to
    fn log_request(&self, width: u32, height: u32, format: Option<PixelFormat>) -> String;

    /// Bytes accounted for `bitmap`
    fn get_size(&self, bitmap: &Bitmap) -> u64;

    /// Number of pooled bitmaps
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
