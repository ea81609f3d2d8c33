//! Exact attribute match strategy

use crate::strategy::store::GroupedStore;
use crate::strategy::traits::LruPoolStrategy;
use parking_lot::RwLock;
use tilepool_core::{Bitmap, PixelFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct AttributeKey {
    width: u32,
    height: u32,
    format: PixelFormat,
}

/// Pools bitmaps by width, height and format; only exact matches are reused
pub struct AttributeStrategy {
    store: RwLock<GroupedStore<AttributeKey>>,
}

impl AttributeStrategy {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(GroupedStore::new()),
        }
    }

    fn key_of(bitmap: &Bitmap) -> AttributeKey {
        AttributeKey {
            width: bitmap.width(),
            height: bitmap.height(),
            format: bitmap.format(),
        }
    }
}

impl Default for AttributeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl LruPoolStrategy for AttributeStrategy {
    fn put(&self, bitmap: Bitmap) {
        let key = Self::key_of(&bitmap);
        self.store.write().insert(key, bitmap);
    }

    fn get(&self, width: u32, height: u32, format: PixelFormat) -> Option<Bitmap> {
        let key = AttributeKey {
            width,
            height,
            format,
        };
        self.store.write().take_newest(&key)
    }

    fn exist(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        let key = AttributeKey {
            width,
            height,
            format,
        };
        self.store.read().contains(&key)
    }

    fn remove_last(&self) -> Option<Bitmap> {
        self.store.write().take_oldest()
    }

    fn log_bitmap(&self, bitmap: &Bitmap) -> String {
        self.log_request(bitmap.width(), bitmap.height(), Some(bitmap.format()))
    }

    fn log_request(&self, width: u32, height: u32, format: Option<PixelFormat>) -> String {
        match format {
            Some(format) => format!("[{width}x{height}], {format}"),
            None => format!("[{width}x{height}], any"),
        }
    }

    fn get_size(&self, bitmap: &Bitmap) -> u64 {
        bitmap.allocation_byte_count()
    }

    fn len(&self) -> usize {
        self.store.read().len()
    }
}

impl std::fmt::Debug for AttributeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeStrategy")
            .field("len", &self.len())
            .finish()
    }
}
