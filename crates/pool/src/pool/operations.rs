//! Pool put/get operations

use super::types::{LruBitmapPool, RejectedBitmap};
use crate::errors::{PoolError, RecoveryHint, RejectReason, Result};
use crate::stats::PoolStatistics;
use std::sync::atomic::Ordering;
use tilepool_core::{Bitmap, PixelFormat};
use tracing::{debug, warn};

impl LruBitmapPool {
    /// Hand `bitmap` to the pool.
    ///
    /// Refused bitmaps come back inside [`RejectedBitmap`]; the caller is
    /// expected to drop them. Accepting a bitmap may evict older ones to
    /// stay within the byte budget.
    pub fn put(&self, bitmap: Bitmap) -> std::result::Result<(), RejectedBitmap> {
        let size = self.strategy.get_size(&bitmap);
        let mut budget = self.budget.lock();

        if let Some(reason) = self.reject_reason(&bitmap, size, budget.max_size) {
            self.stats.record_rejection();
            let description = self.strategy.log_bitmap(&bitmap);
            warn!(bitmap = %bitmap, %reason, "Rejected bitmap");

            let recovery_hint = match &reason {
                RejectReason::TooLarge { size, .. } => RecoveryHint::IncreaseCapacity {
                    suggested_bytes: *size,
                },
                _ => RecoveryHint::Recycle,
            };
            return Err(RejectedBitmap {
                bitmap,
                error: PoolError::Rejected {
                    bitmap: description,
                    reason,
                    recovery_hint,
                },
            });
        }

        let description = self.strategy.log_bitmap(&bitmap);
        self.strategy.put(bitmap);
        budget.current_size += size;
        self.stats.record_put();
        debug!(
            bitmap = %description,
            current_size = budget.current_size,
            max_size = budget.max_size,
            "Put bitmap"
        );

        let max_size = budget.max_size;
        self.evict_locked(&mut budget, max_size);
        Ok(())
    }

    fn reject_reason(&self, bitmap: &Bitmap, size: u64, max_size: u64) -> Option<RejectReason> {
        if !bitmap.is_mutable() {
            Some(RejectReason::Immutable)
        } else if !self.allowed_formats.contains(&bitmap.format()) {
            Some(RejectReason::FormatNotAllowed {
                format: bitmap.format(),
            })
        } else if size > max_size {
            Some(RejectReason::TooLarge { size, max_size })
        } else {
            None
        }
    }

    /// Take a reusable bitmap with its pixels erased
    pub fn get(&self, width: u32, height: u32, format: PixelFormat) -> Result<Option<Bitmap>> {
        let mut bitmap = self.get_dirty(width, height, format)?;
        if let Some(bitmap) = bitmap.as_mut() {
            bitmap.erase();
        }
        Ok(bitmap)
    }

    /// Take a reusable bitmap without clearing its previous pixels
    pub fn get_dirty(
        &self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Option<Bitmap>> {
        format.byte_size(width, height)?;

        let mut budget = self.budget.lock();
        match self.strategy.get(width, height, format) {
            Some(bitmap) => {
                let size = self.strategy.get_size(&bitmap);
                budget.current_size = budget.current_size.saturating_sub(size);
                self.stats.record_hit();
                debug!(
                    request = %self.strategy.log_request(width, height, Some(format)),
                    bitmap = %bitmap,
                    current_size = budget.current_size,
                    "Pool hit"
                );
                Ok(Some(bitmap))
            }
            None => {
                self.stats.record_miss();
                debug!(
                    request = %self.strategy.log_request(width, height, Some(format)),
                    "Pool miss"
                );
                Ok(None)
            }
        }
    }

    /// Take a reusable bitmap, allocating a new one on a miss
    pub fn get_or_allocate(&self, width: u32, height: u32, format: PixelFormat) -> Result<Bitmap> {
        match self.get(width, height, format)? {
            Some(bitmap) => Ok(bitmap),
            None => Ok(Bitmap::new(width, height, format)?),
        }
    }

    /// Whether `get` with the same arguments would currently return a bitmap
    pub fn exist(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        self.strategy.exist(width, height, format)
    }

    pub fn log_bitmap(&self, bitmap: &Bitmap) -> String {
        self.strategy.log_bitmap(bitmap)
    }

    pub fn log_request(&self, width: u32, height: u32, format: Option<PixelFormat>) -> String {
        self.strategy.log_request(width, height, format)
    }

    pub fn get_size(&self, bitmap: &Bitmap) -> u64 {
        self.strategy.get_size(bitmap)
    }

    pub fn max_size(&self) -> u64 {
        self.budget.lock().max_size
    }

    pub fn current_size(&self) -> u64 {
        self.budget.lock().current_size
    }

    pub fn len(&self) -> usize {
        self.strategy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategy.is_empty()
    }

    /// Snapshot the pool counters
    pub fn statistics(&self) -> PoolStatistics {
        let budget = self.budget.lock();
        PoolStatistics {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            puts: self.stats.puts.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            rejections: self.stats.rejections.load(Ordering::Relaxed),
            current_size: budget.current_size,
            max_size: budget.max_size,
            pooled_count: self.strategy.len(),
            stats_since: self.stats.stats_since,
        }
    }
}
