//! Pool eviction and trimming

use super::types::{Budget, LruBitmapPool, TrimLevel};
use crate::config::{scaled_size, validate_multiplier};
use crate::errors::Result;
use tilepool_core::Bitmap;
use tracing::{debug, info, warn};

impl LruBitmapPool {
    /// Evict and return the least recently put bitmap
    pub fn remove_last(&self) -> Option<Bitmap> {
        let mut budget = self.budget.lock();
        let bitmap = self.strategy.remove_last()?;
        budget.current_size = budget
            .current_size
            .saturating_sub(self.strategy.get_size(&bitmap));
        self.stats.record_eviction();
        debug!(bitmap = %bitmap, current_size = budget.current_size, "Removed last bitmap");
        Some(bitmap)
    }

    /// Evict least recently put bitmaps until at most `size` bytes remain
    pub fn trim_to_size(&self, size: u64) {
        let mut budget = self.budget.lock();
        self.evict_locked(&mut budget, size);
    }

    /// Drop every pooled bitmap
    pub fn clear(&self) {
        info!("Clearing bitmap pool");
        self.trim_to_size(0);
    }

    /// Scale the budget relative to the configured max size, evicting if it shrank
    pub fn set_size_multiplier(&self, multiplier: f64) -> Result<()> {
        validate_multiplier(multiplier)?;

        let mut budget = self.budget.lock();
        budget.max_size = scaled_size(self.initial_max_size, multiplier);
        info!(multiplier, max_size = budget.max_size, "Changed pool size multiplier");

        let max_size = budget.max_size;
        self.evict_locked(&mut budget, max_size);
        Ok(())
    }

    /// React to host memory pressure
    pub fn trim_memory(&self, level: TrimLevel) {
        match level {
            TrimLevel::Background | TrimLevel::Moderate | TrimLevel::Complete => {
                info!(?level, "Trimming pool memory: clearing");
                self.clear();
            }
            TrimLevel::UiHidden | TrimLevel::RunningCritical => {
                let mut budget = self.budget.lock();
                let target = budget.max_size / 2;
                info!(?level, target, "Trimming pool memory: halving");
                self.evict_locked(&mut budget, target);
            }
            TrimLevel::RunningModerate | TrimLevel::RunningLow => {
                debug!(?level, "Ignoring trim level");
            }
        }
    }

    /// Evict until `budget.current_size <= target`; caller holds the budget lock
    pub(super) fn evict_locked(&self, budget: &mut Budget, target: u64) {
        while budget.current_size > target {
            let Some(bitmap) = self.strategy.remove_last() else {
                warn!(
                    current_size = budget.current_size,
                    "Pool accounting out of sync with strategy, resetting size"
                );
                budget.current_size = 0;
                break;
            };

            budget.current_size = budget
                .current_size
                .saturating_sub(self.strategy.get_size(&bitmap));
            self.stats.record_eviction();
            debug!(
                bitmap = %self.strategy.log_bitmap(&bitmap),
                current_size = budget.current_size,
                target,
                "Evicted bitmap"
            );
        }
    }
}
